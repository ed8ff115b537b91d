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
 * SOI2C status handling
 *
 * Failure statuses for the serial-over-I2C transaction engine, together with the numeric codes
 * used when the status crosses a C-shaped boundary. Success is not an enum member: Rust callers
 * get `Ok(..)`, and `STATUS_OK` (0) covers the wire representation.
 **************************************************************************************************/
use std::result;

#[cfg(any(feature = "full", test))]
use thiserror::Error;

/// An alias for Result<T, SOI2CError> used throughout this crate.
pub type Result<T> = result::Result<T, SOI2CError>;

/// Numeric status for a successful transaction.
pub const STATUS_OK: u32 = 0;

/// Set of failure statuses a transaction can produce.
///
/// `Config` and `MissingTerminator` are programmer errors. `TxBufferOverflow` and
/// `IoBadSizeReturned` suggest buffer sizing problems or a desynchronized peripheral, which a
/// reset may recover. `IoTimeout` is retryable. A failed transaction leaves the shared buffer
/// in an undefined state; reset or discard it.
#[cfg_attr(any(feature = "full", test), derive(Copy, Clone, PartialEq, Eq, Error, Debug))]
#[cfg_attr(all(not(feature = "full"), not(test)), derive(Copy, Clone, PartialEq, Eq, Debug))]
pub enum SOI2CError {
    /// The context or buffer is unusable, e.g. the buffer is smaller than one frame envelope.
    #[cfg_attr(any(feature = "full", test), error("Transaction context is misconfigured"))]
    Config,
    /// The request in the buffer carries no newline terminator.
    #[cfg_attr(any(feature = "full", test), error("Request is not newline-terminated"))]
    MissingTerminator,
    /// No room for the one-byte segment length prefix ahead of the request.
    #[cfg_attr(any(feature = "full", test), error("No headroom to packetize the request"))]
    TxBufferOverflow,
    /// The peripheral still has response bytes but the buffer cannot take any more.
    #[cfg_attr(any(feature = "full", test), error("Response does not fit the buffer"))]
    RxBufferOverflow,
    /// The transmit primitive reported a bus fault.
    #[cfg_attr(any(feature = "full", test), error("I2C transmit failed"))]
    IoTransmit,
    /// The receive primitive reported a bus fault.
    #[cfg_attr(any(feature = "full", test), error("I2C receive failed"))]
    IoReceive,
    /// The poll budget lapsed with no terminated response.
    #[cfg_attr(any(feature = "full", test), error("Timed out waiting for the response"))]
    IoTimeout,
    /// The peripheral returned a different chunk size than was requested.
    #[cfg_attr(any(feature = "full", test), error("Peripheral returned an unexpected chunk size"))]
    IoBadSizeReturned,
}

/// Convert SOI2CError values into the numerical status codes used on C-shaped boundaries.
impl From<SOI2CError> for u32 {
    fn from(e: SOI2CError) -> u32 {
        match e {
            SOI2CError::Config => 1,
            SOI2CError::MissingTerminator => 2,
            SOI2CError::TxBufferOverflow => 3,
            SOI2CError::RxBufferOverflow => 4,
            SOI2CError::IoTransmit => 5,
            SOI2CError::IoReceive => 6,
            SOI2CError::IoTimeout => 7,
            SOI2CError::IoBadSizeReturned => 8,
        }
    }
}
