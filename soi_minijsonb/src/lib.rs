/***************************************************************************************************
 * Copyright (c) 2022-2023 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * soi_minijsonb module definition
 *
 * A compact, memory efficient, deserializer and serializer for the JSONB binary JSON encoding.
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

// Default configuration
#![no_std]
#![warn(missing_docs)]

//! # SOI_MINIJSONB
//!
//! The `soi_minijsonb` crate implements JSONB, a tagged binary encoding of JSON-like data used
//! to talk to serial-over-I²C peripherals such as the Notecard. A single opcode byte introduces
//! every datum; objects and arrays are explicit begin/end markers around a flat record stream;
//! integers and floats carry their wire width in the opcode's low nibble. A sealed frame wraps
//! the record stream in a `{:` ... `:}` envelope whose payload is COBS-encoded against the
//! newline terminator, so a receiver can resynchronize on `\n` at any point in the byte stream.
//!
//! The default configuration does not require an allocator: encoding and decoding both operate
//! on a byte buffer of your choice, and sealing rearranges the buffer in place rather than
//! allocating a second one. An allocator (the `full` feature) adds `Vec<u8>`-backed growable
//! buffers and a diagnostic printer, but is never needed by the wire implementation.
//!
//! ## Features
//!
//! - All JSONB wire types: objects, arrays, `null`, booleans, NUL-terminated UTF-8 strings,
//!   length-prefixed binary blobs, signed and unsigned integers of 1/2/4/8 bytes, and IEEE-754
//!   floats of 4 and 8 bytes, all little-endian.
//! - Encoder failures latch into the buffer instead of erroring on every insert; embedded
//!   callers check once, when sealing.
//! - Forward-only enumeration of decoded payloads plus tolerant, keyed getters that return
//!   zero/empty defaults so response handling can avoid error plumbing.
//! - COBS with a configurable forbidden byte, exposed on its own for framing other streams.
//!
//! ## Example
//!
//! Encode `{"temp": 72, "ok": true}`, seal it, and read it back:
//!
//! ```
//! use soi_minijsonb::decoder::SequenceBuffer;
//! use soi_minijsonb::encoder::EncodeBuffer;
//! use soi_minijsonb::error::JSONBError;
//!
//! fn main() -> Result<(), JSONBError> {
//!     let mut bytes = [0u8; 128];
//!
//!     let mut buf = EncodeBuffer::new(&mut bytes);
//!     buf.object_begin()
//!         .insert_item("temp", &72u8)
//!         .insert_item("ok", &true)
//!         .object_end();
//!     buf.seal()?;
//!     let frame_len = buf.len();
//!
//!     let frame = &mut bytes[..frame_len];
//!     assert!(frame.starts_with(b"{:"));
//!     assert_eq!(frame[frame_len - 1], b'\n');
//!
//!     let response = SequenceBuffer::parse(frame)?;
//!     assert_eq!(response.get_i32("temp"), 72);
//!     assert!(response.get_bool("ok"));
//!     assert_eq!(response.get_str("missing"), "");
//!     Ok(())
//! }
//! ```

// Pull in std if we are testing or if it is defined as feature (because we run tests on a
// platform supporting I/O and full feature set.
#[cfg(any(feature = "std", test))]
extern crate std;

// If we are really building no_std, pull in core as well. It is aliased as std so that "use"
// statements are always the same
#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

pub(crate) mod ast;
pub(crate) mod buffer;
pub(crate) mod cobs;
pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
#[cfg(any(feature = "full", test))]
mod jsonb_diag;

/// The `error` module contains error definitions used throughout `soi_minijsonb`.
pub mod error;

/// The `types` module exports the main [`types::JSONB`] structure which represents a single
/// JSONB item.
pub mod types {
    pub use super::ast::JSONB;
}

/// The `encoder` module exports the [`encoder::EncodeBuffer`] type and the
/// [`encoder::EncodeItem`] trait, which are used to encode values as JSONB records and seal
/// them into wire frames.
pub mod encoder {
    pub use super::encode::{EncodeBuffer, EncodeItem};
}

/// The `decoder` module exports types for parsing wire frames and enumerating or looking up
/// the records inside them.
pub mod decoder {
    pub use super::decode::{Record, RecordIterator, SequenceBuffer};
}

/// The `storage` module exports the byte storage capability behind encode and transaction
/// buffers. `Vec<u8>` implements [`storage::Storage`] when the `full` feature is enabled.
pub mod storage {
    pub use super::buffer::{FixedBuf, Storage};
}

/// The `framing` module exposes the COBS byte-stuffing primitives used by frame sealing, for
/// callers that frame other byte streams over the same link.
pub mod framing {
    pub use super::cobs::{decode_in_place, encode_buf, encode_within, encoded_len, guaranteed_fit};
}

/// The `opcodes` module exports the JSONB wire constants: one tag byte per datum kind plus the
/// frame envelope bytes.
pub mod opcodes {
    pub use super::constants::*;
}

/// Debug helpers, available with the `full` feature: a JSON-like `Display` rendering of
/// decoded payloads and a hex dumper for raw frames.
#[cfg(any(feature = "full", test))]
pub mod debug {
    pub use super::jsonb_diag::print_hex;
    pub use super::jsonb_diag::Diag;
}
