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
 * soi_minijsonb JSONB item type
 *
 * A compact, memory efficient, deserializer and serializer for the JSONB binary JSON encoding.
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
use crate::error::JSONBError;

use std::convert::TryFrom;

/// The data type for JSONB items. String and blob values borrow immutably from the underlying
/// decode buffer, which must therefore outlive the item itself - this is the `'buf` lifetime.
///
/// Unlike formats with preferred serialization, JSONB keeps the wire width of every number: an
/// `Int8` and an `Int64` holding the same value are different encodings, and both survive a
/// decode unchanged. The structural markers appear here as well because the decoder surfaces
/// a flat stream of records rather than a tree.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum JSONB<'buf> {
    /// `{` - opens an object
    BeginObject,
    /// `}` - closes an object
    EndObject,
    /// `[` - opens an array
    BeginArray,
    /// `]` - closes an array
    EndArray,
    /// JSON `null`
    Null,
    /// JSON `true`
    True,
    /// JSON `false`
    False,
    /// UTF-8 string
    Str(&'buf str),
    /// Binary blob
    Bin(&'buf [u8]),
    /// Signed integer, 1 byte on the wire
    Int8(i8),
    /// Signed integer, 2 bytes on the wire
    Int16(i16),
    /// Signed integer, 4 bytes on the wire
    Int32(i32),
    /// Signed integer, 8 bytes on the wire
    Int64(i64),
    /// Unsigned integer, 1 byte on the wire
    UInt8(u8),
    /// Unsigned integer, 2 bytes on the wire
    UInt16(u16),
    /// Unsigned integer, 4 bytes on the wire
    UInt32(u32),
    /// Unsigned integer, 8 bytes on the wire
    UInt64(u64),
    /// IEEE-754 binary32
    Float32(f32),
    /// IEEE-754 binary64
    Float64(f64),
}

impl<'buf> JSONB<'buf> {
    /// Widen any numeric item to `i64`. Unsigned and float sources are converted with Rust `as`
    /// cast semantics. Returns `None` for non-numeric items.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            JSONB::Int8(v) => Some(v as i64),
            JSONB::Int16(v) => Some(v as i64),
            JSONB::Int32(v) => Some(v as i64),
            JSONB::Int64(v) => Some(v),
            JSONB::UInt8(v) => Some(v as i64),
            JSONB::UInt16(v) => Some(v as i64),
            JSONB::UInt32(v) => Some(v as i64),
            JSONB::UInt64(v) => Some(v as i64),
            JSONB::Float32(v) => Some((v as f64) as i64),
            JSONB::Float64(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Widen any numeric item to `u64`, with `as` cast semantics for signed and float sources.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            JSONB::Int8(v) => Some((v as i64) as u64),
            JSONB::Int16(v) => Some((v as i64) as u64),
            JSONB::Int32(v) => Some((v as i64) as u64),
            JSONB::Int64(v) => Some(v as u64),
            JSONB::UInt8(v) => Some(v as u64),
            JSONB::UInt16(v) => Some(v as u64),
            JSONB::UInt32(v) => Some(v as u64),
            JSONB::UInt64(v) => Some(v),
            JSONB::Float32(v) => Some((v as f64) as u64),
            JSONB::Float64(v) => Some(v as u64),
            _ => None,
        }
    }

    /// Widen any numeric item to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            JSONB::Int8(v) => Some(v as f64),
            JSONB::Int16(v) => Some(v as f64),
            JSONB::Int32(v) => Some(v as f64),
            JSONB::Int64(v) => Some(v as f64),
            JSONB::UInt8(v) => Some(v as f64),
            JSONB::UInt16(v) => Some(v as f64),
            JSONB::UInt32(v) => Some(v as f64),
            JSONB::UInt64(v) => Some(v as f64),
            JSONB::Float32(v) => Some(v as f64),
            JSONB::Float64(v) => Some(v),
            _ => None,
        }
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: From value to JSONB. Always succeeds
 **************************************************************************************************/

/// Convert a bool into JSONB
impl<'buf> From<bool> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: bool) -> Self {
        if v {
            Self::True
        } else {
            Self::False
        }
    }
}

/// Convert a u8 into JSONB
impl<'buf> From<u8> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: u8) -> Self {
        Self::UInt8(v)
    }
}

/// Convert a u16 into JSONB
impl<'buf> From<u16> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: u16) -> Self {
        Self::UInt16(v)
    }
}

/// Convert a u32 into JSONB
impl<'buf> From<u32> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

/// Convert a u64 into JSONB
impl<'buf> From<u64> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

/// Convert an i8 into JSONB
impl<'buf> From<i8> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: i8) -> Self {
        Self::Int8(v)
    }
}

/// Convert an i16 into JSONB
impl<'buf> From<i16> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

/// Convert an i32 into JSONB
impl<'buf> From<i32> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

/// Convert an i64 into JSONB
impl<'buf> From<i64> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

/// Convert an f32 into JSONB
impl<'buf> From<f32> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

/// Convert an f64 into JSONB
impl<'buf> From<f64> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

/// Convert a &str into JSONB
impl<'buf> From<&'buf str> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: &'buf str) -> Self {
        Self::Str(v)
    }
}

/// Convert a byte slice into JSONB
impl<'buf> From<&'buf [u8]> for JSONB<'buf> {
    #[inline(always)]
    fn from(v: &'buf [u8]) -> Self {
        Self::Bin(v)
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: From JSONB to value. May fail on an incompatible item
 **************************************************************************************************/

impl<'buf> TryFrom<JSONB<'buf>> for i64 {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        item.as_i64().ok_or(JSONBError::IncompatibleType)
    }
}

impl<'buf> TryFrom<JSONB<'buf>> for u64 {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        item.as_u64().ok_or(JSONBError::IncompatibleType)
    }
}

impl<'buf> TryFrom<JSONB<'buf>> for f64 {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        item.as_f64().ok_or(JSONBError::IncompatibleType)
    }
}

impl<'buf> TryFrom<JSONB<'buf>> for bool {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        match item {
            JSONB::True => Ok(true),
            JSONB::False => Ok(false),
            _ => Err(JSONBError::IncompatibleType),
        }
    }
}

impl<'buf> TryFrom<JSONB<'buf>> for &'buf str {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        match item {
            JSONB::Str(s) => Ok(s),
            _ => Err(JSONBError::IncompatibleType),
        }
    }
}

impl<'buf> TryFrom<JSONB<'buf>> for &'buf [u8] {
    type Error = JSONBError;

    fn try_from(item: JSONB<'buf>) -> Result<Self, Self::Error> {
        match item {
            JSONB::Bin(b) => Ok(b),
            _ => Err(JSONBError::IncompatibleType),
        }
    }
}
