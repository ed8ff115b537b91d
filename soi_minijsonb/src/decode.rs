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
 * JSONB Decoder
 *
 * A compact, memory efficient deserializer for the JSONB binary JSON encoding. This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator: frames are COBS-decoded in place and every string or blob
 * is borrowed straight out of the caller's buffer.
 **************************************************************************************************/
use crate::ast::JSONB;
use crate::cobs;
use crate::constants::*;
use crate::error::{JSONBError, Result};

use std::convert::{TryFrom, TryInto};
use std::str::from_utf8;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * JSONB Sequence Buffer definitions
 **************************************************************************************************/

/// A buffer holding a decoded JSONB payload: the flat stream of tagged records between the
/// frame envelope. The buffer has lifetime `'buf`, which must be longer than any borrow from
/// the buffer itself.
///
/// Enumeration is single-pass and forward-only; constructing a fresh iterator rewinds to the
/// start of the stream.
#[derive(Debug, Copy, Clone)]
pub struct SequenceBuffer<'buf> {
    /// Underlying reference to the decoded payload
    pub bytes: &'buf [u8],
}

impl<'buf> SequenceBuffer<'buf> {
    /// Construct a `SequenceBuffer` over an already-decoded payload.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn new(payload: &'buf [u8]) -> SequenceBuffer<'buf> {
        SequenceBuffer { bytes: payload }
    }

    /// Parse a wire frame in place.
    ///
    /// Leading and trailing control bytes (anything below 0x20, which covers the newline
    /// terminator) are ignored, the `{:` / `:}` envelope is verified and stripped, and the
    /// interior is COBS-decoded in place. On success the returned buffer borrows the decoded
    /// payload from within `frame`; `frame`'s contents are consumed by the in-place decode and
    /// must not be reused as a frame afterwards.
    #[cfg_attr(feature = "trace", trace)]
    pub fn parse(frame: &'buf mut [u8]) -> Result<SequenceBuffer<'buf>> {
        let mut lo = 0usize;
        let mut hi = frame.len();
        while lo < hi && frame[lo] < 0x20 {
            lo += 1;
        }
        while hi > lo && frame[hi - 1] < 0x20 {
            hi -= 1;
        }
        let body = &mut frame[lo..hi];
        if body.len() < FRAME_HEADER.len() + FRAME_TRAILER.len()
            || !body.starts_with(FRAME_HEADER)
            || !body.ends_with(FRAME_TRAILER)
        {
            return Err(JSONBError::BadFrame);
        }
        let inner_len = body.len() - FRAME_HEADER.len() - FRAME_TRAILER.len();
        let inner = &mut body[FRAME_HEADER.len()..FRAME_HEADER.len() + inner_len];
        let decoded = cobs::decode_in_place(inner, FRAME_TERMINATOR);
        let start = lo + FRAME_HEADER.len();
        Ok(SequenceBuffer {
            bytes: &frame[start..start + decoded],
        })
    }

    /// Length in bytes of the decoded payload.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Look up a top-level object item by name.
    ///
    /// Only immediate children of the outermost object are considered: records inside nested
    /// objects or arrays are skipped via a nesting counter, and the scan stops at the
    /// END_OBJECT that closes the outermost object.
    pub fn get(&self, name: &str) -> Option<Record<'buf>> {
        let mut depth = 0usize;
        for rec in self.into_iter() {
            match rec.opcode {
                OP_BEGIN_OBJECT | OP_BEGIN_ARRAY => {
                    if depth == 1 && rec.key == Some(name) {
                        return Some(rec);
                    }
                    depth += 1;
                }
                OP_END_OBJECT | OP_END_ARRAY => {
                    if depth <= 1 {
                        return None;
                    }
                    depth -= 1;
                }
                _ => {
                    if depth == 1 && rec.key == Some(name) {
                        return Some(rec);
                    }
                }
            }
        }
        None
    }

    /// Return the string stored under `name`, or `""` when the item is missing or is not a
    /// string.
    pub fn get_str(&self, name: &str) -> &'buf str {
        match self.get(name).and_then(|r| r.value().ok()) {
            Some(JSONB::Str(s)) => s,
            _ => "",
        }
    }

    /// Return the blob stored under `name`, or an empty slice when missing or not a blob.
    pub fn get_bin(&self, name: &str) -> &'buf [u8] {
        match self.get(name).and_then(|r| r.value().ok()) {
            Some(JSONB::Bin(b)) => b,
            _ => &[],
        }
    }

    /// Return `true` iff the item stored under `name` is TRUE. FALSE, NULL, a missing item and
    /// a non-boolean item all read as `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        matches!(
            self.get(name).and_then(|r| r.value().ok()),
            Some(JSONB::True)
        )
    }

    /// Return the number stored under `name` widened to `i64`, or 0 when missing or
    /// non-numeric. All numeric wire types are accepted; unsigned and float sources convert
    /// with `as` cast semantics.
    pub fn get_i64(&self, name: &str) -> i64 {
        self.get(name)
            .and_then(|r| r.value().ok())
            .and_then(|v| v.as_i64())
            .unwrap_or(0)
    }

    /// As [`SequenceBuffer::get_i64`], cast down to `i32`.
    #[inline]
    pub fn get_i32(&self, name: &str) -> i32 {
        self.get_i64(name) as i32
    }

    /// Return the number stored under `name` widened to `u64`, or 0 when missing or
    /// non-numeric.
    pub fn get_u64(&self, name: &str) -> u64 {
        self.get(name)
            .and_then(|r| r.value().ok())
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }

    /// As [`SequenceBuffer::get_u64`], cast down to `u32`.
    #[inline]
    pub fn get_u32(&self, name: &str) -> u32 {
        self.get_u64(name) as u32
    }

    /// Return the number stored under `name` widened to `f64`, or 0.0 when missing or
    /// non-numeric.
    pub fn get_f64(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(|r| r.value().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// As [`SequenceBuffer::get_f64`], cast down to `f32`.
    #[inline]
    pub fn get_f32(&self, name: &str) -> f32 {
        self.get_f64(name) as f32
    }

    /// Peripheral convention: error replies carry an `err` string at top level.
    #[inline]
    pub fn get_err(&self) -> &'buf str {
        self.get_str("err")
    }
}

/***************************************************************************************************
 * Record enumeration
 **************************************************************************************************/

/// One enumerated record: the opcode, its payload, the folded-in key when the record is an
/// object item, and whether the record is the first inside its container.
///
/// `payload` is the value bytes only: the string bytes without the NUL, the blob bytes without
/// the length prefix, the little-endian bytes of a number, empty for structural and constant
/// records.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Record<'buf> {
    /// `true` iff the previous record was BEGIN_OBJECT or BEGIN_ARRAY, or this is the first
    /// record in the stream.
    pub first: bool,
    /// The item name when the record was introduced by an ITEM opcode.
    pub key: Option<&'buf str>,
    /// The value opcode.
    pub opcode: u8,
    /// The value bytes.
    pub payload: &'buf [u8],
}

impl<'buf> Record<'buf> {
    /// Decode the payload into a typed [`JSONB`] item.
    pub fn value(&self) -> Result<JSONB<'buf>> {
        let p = self.payload;
        match self.opcode {
            OP_BEGIN_OBJECT => Ok(JSONB::BeginObject),
            OP_END_OBJECT => Ok(JSONB::EndObject),
            OP_BEGIN_ARRAY => Ok(JSONB::BeginArray),
            OP_END_ARRAY => Ok(JSONB::EndArray),
            OP_NULL => Ok(JSONB::Null),
            OP_TRUE => Ok(JSONB::True),
            OP_FALSE => Ok(JSONB::False),
            OP_STRING => match from_utf8(p) {
                Ok(s) => Ok(JSONB::Str(s)),
                Err(_) => Err(JSONBError::UTF8Error),
            },
            OP_BIN8 | OP_BIN16 | OP_BIN24 | OP_BIN32 => Ok(JSONB::Bin(p)),
            OP_INT8 => Ok(JSONB::Int8(i8::from_le_bytes(le_bytes(p)?))),
            OP_INT16 => Ok(JSONB::Int16(i16::from_le_bytes(le_bytes(p)?))),
            OP_INT32 => Ok(JSONB::Int32(i32::from_le_bytes(le_bytes(p)?))),
            OP_INT64 => Ok(JSONB::Int64(i64::from_le_bytes(le_bytes(p)?))),
            OP_UINT8 => Ok(JSONB::UInt8(u8::from_le_bytes(le_bytes(p)?))),
            OP_UINT16 => Ok(JSONB::UInt16(u16::from_le_bytes(le_bytes(p)?))),
            OP_UINT32 => Ok(JSONB::UInt32(u32::from_le_bytes(le_bytes(p)?))),
            OP_UINT64 => Ok(JSONB::UInt64(u64::from_le_bytes(le_bytes(p)?))),
            OP_FLOAT => Ok(JSONB::Float32(f32::from_le_bytes(le_bytes(p)?))),
            OP_DOUBLE => Ok(JSONB::Float64(f64::from_le_bytes(le_bytes(p)?))),
            _ => Err(JSONBError::MalformedEncoding),
        }
    }
}

/// Convert a payload slice into the fixed-size array a numeric conversion expects.
#[inline]
fn le_bytes<const N: usize>(p: &[u8]) -> Result<[u8; N]> {
    p.try_into().map_err(|_| JSONBError::MalformedEncoding)
}

/// `SequenceBuffer` iterator adapter keeping track of the current parse position and the last
/// opcode seen, which drives first-in-container detection.
#[derive(Debug, Copy, Clone)]
pub struct RecordIterator<'buf> {
    buf: &'buf [u8],
    index: usize,
    last_opcode: u8,
}

impl<'buf> IntoIterator for SequenceBuffer<'buf> {
    type Item = Record<'buf>;
    type IntoIter = RecordIterator<'buf>;

    fn into_iter(self) -> Self::IntoIter {
        RecordIterator {
            buf: self.bytes,
            index: 0,
            last_opcode: OP_INVALID,
        }
    }
}

impl<'buf> RecordIterator<'buf> {
    /// Parse a single record. On exit `self.index` points at the start of the next record.
    fn record(&mut self) -> Result<Record<'buf>> {
        let first = matches!(
            self.last_opcode,
            OP_INVALID | OP_BEGIN_OBJECT | OP_BEGIN_ARRAY
        );
        let mut opcode = self.read_byte()?;
        let mut key = None;
        if opcode == OP_ITEM {
            let name = self.read_name()?;
            key = Some(name);
            opcode = self.read_byte()?;
        }
        let payload = self.read_payload(opcode)?;
        self.last_opcode = opcode;
        Ok(Record {
            first,
            key,
            opcode,
            payload,
        })
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        if self.index < self.buf.len() {
            let b = self.buf[self.index];
            self.index += 1;
            Ok(b)
        } else {
            Err(JSONBError::EndOfBuffer)
        }
    }

    /// Read a NUL-terminated UTF-8 name, leaving the cursor just past the NUL.
    fn read_name(&mut self) -> Result<&'buf str> {
        let rest = &self.buf[self.index..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(JSONBError::EndOfBuffer)?;
        self.index += nul + 1;
        from_utf8(&rest[..nul]).map_err(|_| JSONBError::UTF8Error)
    }

    /// Take `len` payload bytes, advancing the cursor past them.
    fn read_extent(&mut self, len: usize) -> Result<&'buf [u8]> {
        if self.index + len <= self.buf.len() {
            let bytes = &self.buf[self.index..self.index + len];
            self.index += len;
            Ok(bytes)
        } else {
            Err(JSONBError::EndOfBuffer)
        }
    }

    /// Consume the payload of a record whose opcode byte has just been read.
    fn read_payload(&mut self, opcode: u8) -> Result<&'buf [u8]> {
        match opcode {
            OP_BEGIN_OBJECT | OP_END_OBJECT | OP_BEGIN_ARRAY | OP_END_ARRAY | OP_NULL
            | OP_TRUE | OP_FALSE => self.read_extent(0),
            OP_STRING => {
                let rest = &self.buf[self.index..];
                let nul = rest
                    .iter()
                    .position(|&b| b == 0)
                    .ok_or(JSONBError::EndOfBuffer)?;
                self.index += nul + 1;
                Ok(&rest[..nul])
            }
            OP_BIN8 | OP_BIN16 | OP_BIN24 | OP_BIN32 => {
                let width = usize::from(opcode & OP_WIDTH_MASK);
                let lenbytes = self.read_extent(width)?;
                let mut len = 0usize;
                for (i, &b) in lenbytes.iter().enumerate() {
                    len |= usize::from(b) << (8 * i);
                }
                self.read_extent(len)
            }
            OP_INT8 | OP_INT16 | OP_INT32 | OP_INT64 | OP_UINT8 | OP_UINT16 | OP_UINT32
            | OP_UINT64 | OP_FLOAT | OP_DOUBLE => {
                // Low nibble is the payload width: 4 for FLOAT, 8 for DOUBLE
                self.read_extent(usize::from(opcode & OP_WIDTH_MASK))
            }
            _ => Err(JSONBError::MalformedEncoding),
        }
    }
}

impl<'buf> Iterator for RecordIterator<'buf> {
    type Item = Record<'buf>;

    /// Advance one record. Enumeration ends at the end of the payload, and also on an unknown
    /// opcode or a truncated record; the cursor is not rewound.
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.buf.len() {
            match self.record() {
                Ok(rec) => Some(rec),
                _ => None,
            }
        } else {
            None
        }
    }
}

/// `TryFrom` extraction for callers that know the expected type of a record.
impl<'buf> TryFrom<Record<'buf>> for JSONB<'buf> {
    type Error = JSONBError;

    fn try_from(rec: Record<'buf>) -> Result<JSONB<'buf>> {
        rec.value()
    }
}
