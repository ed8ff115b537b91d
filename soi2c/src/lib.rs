/***************************************************************************************************
 * Copyright (c) 2022-2023, Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * soi2c module definition
 *
 * Serial-over-I2C request/response transactor for JSONB-speaking peripherals such as the
 * Notecard. This crate is `no_std` and allocator-free; all bus access and timing is injected
 * through the `I2cPort` trait, and the single transaction buffer is caller-owned.
 **************************************************************************************************/

// Default configuration
#![no_std]
#![warn(missing_docs)]

//! # SOI2C
//!
//! `soi2c` drives a half-duplex request/response protocol over an I²C link against a
//! peripheral that exposes no interrupt line. A newline-terminated request (typically a sealed
//! JSONB frame from `soi_minijsonb`) is written in length-prefixed segments of at most 250
//! bytes; the newline-terminated response is then polled for in chunks, each read preceded by
//! a two-byte ticket naming the requested size and each reply carrying an
//! `[available, returned]` header ahead of the data.
//!
//! The transaction context owns nothing but the peripheral address and the injected
//! [`I2cPort`]: transmit, receive and delay are supplied by the caller, so the engine runs
//! unchanged on any HAL and under test doubles.
//!
//! A single buffer is shared between the request and the response within one transaction. It
//! is aliased between the write path and the read path, so do not keep pointers into it across
//! a call to [`Soi2c::transact`].

// Pull in std if we are testing or if it is defined as feature (because we run tests on a
// platform supporting I/O and full feature set.
#[cfg(any(feature = "std", test))]
extern crate std;

// If we are really building no_std, pull in core as well. It is aliased as std so that "use"
// statements are always the same
#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

/// The `error` module contains the transaction statuses and their numeric wire codes.
pub mod error;
/// The `port` module defines the injected I2C primitives.
pub mod port;
/// The `transaction` module implements the chunked write / polled read state machine.
pub mod transaction;

pub use crate::error::{SOI2CError, STATUS_OK};
pub use crate::port::{I2cPort, PortError};
pub use crate::transaction::{Soi2c, TransactionFlags, MAX_SEGMENT, NOTECARD_I2C_ADDR};
