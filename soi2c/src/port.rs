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
 * SOI2C port abstraction
 *
 * The injected I2C primitives. The transaction engine owns no bus and no clock: everything it
 * does with the outside world goes through an implementation of this trait, which makes the
 * engine testable in-process and portable across HALs.
 **************************************************************************************************/
use std::fmt;

/// An I/O fault reported by an injected I2C primitive. Deliberately opaque: the engine maps it
/// to a transmit or receive status depending on which primitive raised it, and retries are the
/// caller's business.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PortError;

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("I2C port fault")
    }
}

/// The I2C primitives a transaction engine drives.
///
/// All three calls block; the engine never sleeps except through [`I2cPort::delay_ms`]. A port
/// is exclusively owned by its [`crate::Soi2c`] context, so implementations need no internal
/// locking.
pub trait I2cPort {
    /// Write `src` to the peripheral at 7-bit address `addr` as one bus transaction.
    fn transmit(&mut self, addr: u8, src: &[u8]) -> Result<(), PortError>;

    /// Read exactly `dst.len()` bytes from the peripheral at `addr` into `dst`.
    fn receive(&mut self, addr: u8, dst: &mut [u8]) -> Result<(), PortError>;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
