/***************************************************************************************************
 * Copyright (c) 2022-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * soi_minijsonb JSONB Error API
 *
 * A compact, memory efficient, deserializer and serializer for the JSONB binary JSON encoding.
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
use std::result;

#[cfg(any(feature = "full", test))]
use thiserror::Error;

/// An alias for Result<T, JSONBError> used throughout this crate.
pub type Result<T> = result::Result<T, JSONBError>;

/// `JSONBError` provides information about errors encoding or decoding JSONB frames.
#[cfg_attr(any(feature = "full", test), derive(Copy, Clone, PartialEq, Error, Debug))]
#[cfg_attr(all(not(feature = "full"), not(test)), derive(Copy, Clone, PartialEq, Debug))]
pub enum JSONBError {
    /// Buffer too short to encode or decode the next item
    #[cfg_attr(any(feature = "full", test), error("Buffer insufficient to process the next item"))]
    EndOfBuffer,
    /// The encode buffer overran and latched; no frame was produced.
    #[cfg_attr(any(feature = "full", test), error("Encode buffer overran; frame not sealed"))]
    Overrun,
    /// An operation was issued in a state where it cannot succeed, e.g. sealing twice.
    #[cfg_attr(any(feature = "full", test), error("Operation not valid in the current buffer state"))]
    BadState,
    /// The buffer does not carry the `{:` header / `:}` trailer envelope.
    #[cfg_attr(any(feature = "full", test), error("Missing or damaged frame envelope"))]
    BadFrame,
    /// Encoding is illegal or unsupported (e.g. an unknown opcode)
    #[cfg_attr(any(feature = "full", test), error("Encoding is illegal or unsupported"))]
    MalformedEncoding,
    /// A string or item name contains an invalid UTF8 sequence
    #[cfg_attr(any(feature = "full", test), error("A string contains an invalid UTF8 sequence"))]
    UTF8Error,
    /// Attempt to convert an item to an incompatible type.
    #[cfg_attr(any(feature = "full", test), error("Attempt to convert an item of incompatible type"))]
    IncompatibleType,
}
