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
 * JSONB Encoder
 *
 * A compact, memory efficient serializer for the JSONB binary JSON encoding. This serializer is
 * designed for use in constrained systems and requires neither the Rust standard library nor an
 * allocator: the caller supplies the buffer, and sealing rearranges it in place so that a single
 * fixed allocation carries both the raw payload and the finished frame.
 **************************************************************************************************/
use crate::ast::JSONB;
use crate::buffer::Storage;
use crate::cobs;
use crate::constants::*;
use crate::error::{JSONBError, Result};

use std::fmt;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Encode Buffer
 **************************************************************************************************/

enum Store<'buf> {
    Fixed(&'buf mut [u8]),
    Growable(&'buf mut dyn Storage),
}

impl fmt::Debug for Store<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Fixed(b) => write!(f, "Fixed({})", b.len()),
            Store::Growable(s) => write!(f, "Growable({})", s.capacity()),
        }
    }
}

impl<'buf> Store<'buf> {
    #[inline]
    fn capacity(&self) -> usize {
        match self {
            Store::Fixed(b) => b.len(),
            Store::Growable(s) => s.capacity(),
        }
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Store::Fixed(b) => b,
            Store::Growable(s) => s.as_slice(),
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Store::Fixed(b) => b,
            Store::Growable(s) => s.as_mut_slice(),
        }
    }

    fn grow(&mut self, needed: usize) -> bool {
        match self {
            Store::Fixed(b) => needed <= b.len(),
            Store::Growable(s) => s.grow(needed),
        }
    }
}

/// `EncodeBuffer` wraps caller-supplied storage and keeps track of the insert position, an
/// overrun flag and an error flag.
///
/// Failed appends do not return errors: once either flag latches, every further append is a
/// silent no-op and [`EncodeBuffer::seal`] refuses to produce a frame. Embedded callers check
/// once, after sealing, instead of branching on every insert.
#[derive(Debug)]
pub struct EncodeBuffer<'buf> {
    store: Store<'buf>,
    used: usize,
    overrun: bool,
    err: bool,
    sealed: bool,
}

impl<'buf> EncodeBuffer<'buf> {
    /// Construct an instance of `EncodeBuffer` over a fixed slice. The same underlying buffer
    /// can be re-used by constructing a fresh `EncodeBuffer` on it.
    #[cfg_attr(feature = "trace", trace)]
    pub fn new(bytes: &'buf mut [u8]) -> EncodeBuffer<'buf> {
        EncodeBuffer {
            store: Store::Fixed(bytes),
            used: 0,
            overrun: false,
            err: false,
            sealed: false,
        }
    }

    /// Construct an instance of `EncodeBuffer` over growable [`Storage`]. The pointer and
    /// capacity are re-read after every grow, so the storage may reallocate freely.
    #[cfg_attr(feature = "trace", trace)]
    pub fn with_storage(store: &'buf mut dyn Storage) -> EncodeBuffer<'buf> {
        EncodeBuffer {
            store: Store::Growable(store),
            used: 0,
            overrun: false,
            err: false,
            sealed: false,
        }
    }

    /// Append one record: an opcode byte (suppressed when `opcode` is [`OP_INVALID`]) followed
    /// by `payload`. All typed inserts funnel through here so the overrun rules hold on every
    /// path.
    fn append(&mut self, opcode: u8, payload: &[u8]) {
        if self.overrun || self.err || self.sealed {
            return;
        }
        let tag = usize::from(opcode != OP_INVALID);
        let need = self.used + tag + payload.len();
        if need > self.store.capacity() {
            // The grower may refuse, or may return less than requested; re-check either way.
            if !self.store.grow(need) || need > self.store.capacity() {
                self.overrun = true;
                return;
            }
        }
        let used = self.used;
        let bytes = self.store.bytes_mut();
        if tag != 0 {
            bytes[used] = opcode;
        }
        bytes[used + tag..need].copy_from_slice(payload);
        self.used = need;
    }

    /// Insert an [`EncodeItem`] into the buffer.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn insert(&mut self, item: &dyn EncodeItem) -> &mut Self {
        item.encode(self);
        self
    }

    /// Emit an object key record. Must be followed by exactly one value-emitting insert; this
    /// is not enforced.
    #[cfg_attr(feature = "trace", trace)]
    pub fn item(&mut self, name: &str) -> &mut Self {
        self.append(OP_ITEM, name.as_bytes());
        self.append(OP_INVALID, &[0]);
        self
    }

    /// Insert a `(name, value)` pair into the enclosing object. Equivalent to
    /// [`EncodeBuffer::item`] followed by [`EncodeBuffer::insert`].
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn insert_item(&mut self, name: &str, value: &dyn EncodeItem) -> &mut Self {
        self.item(name);
        self.insert(value)
    }

    /// Open an object.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn object_begin(&mut self) -> &mut Self {
        self.append(OP_BEGIN_OBJECT, &[]);
        self
    }

    /// Close the innermost open object.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn object_end(&mut self) -> &mut Self {
        self.append(OP_END_OBJECT, &[]);
        self
    }

    /// Open an array.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn array_begin(&mut self) -> &mut Self {
        self.append(OP_BEGIN_ARRAY, &[]);
        self
    }

    /// Close the innermost open array.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn array_end(&mut self) -> &mut Self {
        self.append(OP_END_ARRAY, &[]);
        self
    }

    /// Insert the first `n` bytes of `s` as a string record with an explicit NUL terminator.
    /// The selected prefix must not itself contain NUL; this is not enforced.
    #[cfg_attr(feature = "trace", trace)]
    pub fn insert_str_len(&mut self, s: &str, n: usize) -> &mut Self {
        let bytes = s.as_bytes();
        self.append(OP_STRING, &bytes[..n.min(bytes.len())]);
        self.append(OP_INVALID, &[0]);
        self
    }

    /// Seal the buffer into a wire frame: `{:`, the COBS-encoded payload, `:}` and a newline.
    ///
    /// The raw payload is first shifted toward the end of the buffer by the worst-case COBS
    /// expansion, then encoded downward into the vacated space, so no second buffer is needed.
    /// After sealing, [`EncodeBuffer::encoded`] returns the complete frame.
    #[cfg_attr(feature = "trace", trace)]
    pub fn seal(&mut self) -> Result<()> {
        if self.overrun {
            return Err(JSONBError::Overrun);
        }
        if self.err || self.sealed {
            self.err = true;
            return Err(JSONBError::BadState);
        }
        // The frame needs the payload, its worst-case COBS expansion, and the envelope. The
        // expansion headroom depends on the capacity itself, so after growing re-derive it and
        // check again; capacity strictly increases, which bounds the loop.
        let headroom = loop {
            let cap = self.store.capacity();
            if cap >= FRAME_SIGLEN {
                let body_cap = cap - FRAME_SIGLEN;
                let headroom = body_cap - cobs::guaranteed_fit(body_cap);
                if self.used + headroom <= body_cap {
                    break headroom;
                }
                let need = self.used + headroom + FRAME_SIGLEN + 1;
                if !self.store.grow(need) || self.store.capacity() <= cap {
                    self.overrun = true;
                    return Err(JSONBError::Overrun);
                }
            } else if !self.store.grow(FRAME_SIGLEN) || self.store.capacity() < FRAME_SIGLEN {
                self.overrun = true;
                return Err(JSONBError::Overrun);
            }
        };

        let used = self.used;
        let shift = headroom + FRAME_HEADER.len();
        let bytes = self.store.bytes_mut();
        bytes.copy_within(0..used, shift);
        bytes[..FRAME_HEADER.len()].copy_from_slice(FRAME_HEADER);
        let enc = cobs::encode_within(bytes, shift, used, FRAME_HEADER.len(), FRAME_TERMINATOR);
        let tail = FRAME_HEADER.len() + enc;
        bytes[tail..tail + FRAME_TRAILER.len()].copy_from_slice(FRAME_TRAILER);
        bytes[tail + FRAME_TRAILER.len()] = FRAME_TERMINATOR;
        self.used = tail + FRAME_TRAILER.len() + 1;
        self.sealed = true;
        Ok(())
    }

    /// Return a slice containing the bytes written so far: the raw tagged payload before
    /// [`EncodeBuffer::seal`], the complete frame after it.
    #[cfg_attr(feature = "trace", trace)]
    pub fn encoded(&self) -> Result<&[u8]> {
        if self.overrun {
            Err(JSONBError::Overrun)
        } else if self.err {
            Err(JSONBError::BadState)
        } else {
            Ok(&self.store.bytes()[..self.used])
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    /// `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Current capacity of the underlying storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// `true` once an append has been dropped for lack of space. Latched.
    #[inline]
    pub fn is_overrun(&self) -> bool {
        self.overrun
    }

    /// `true` once the buffer has been misused, e.g. sealed twice. Latched.
    #[inline]
    pub fn is_err(&self) -> bool {
        self.err
    }
}

/***************************************************************************************************
 * Encode Item
 **************************************************************************************************/

/// The `EncodeItem` trait encapsulates encoding operations as anything that can be serialized
/// as a JSONB record. The implementing Rust type chooses the wire width: an `i8` always
/// serializes as a 1-byte signed integer, an `i64` always as 8 bytes.
///
/// Items are `Debug` so that traced inserts can print them.
pub trait EncodeItem: fmt::Debug {
    /// Append this value to `buf` as one tagged record.
    fn encode(&self, buf: &mut EncodeBuffer);
}

impl EncodeItem for i8 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_INT8, &self.to_le_bytes());
    }
}

impl EncodeItem for i16 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_INT16, &self.to_le_bytes());
    }
}

impl EncodeItem for i32 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_INT32, &self.to_le_bytes());
    }
}

impl EncodeItem for i64 {
    /// The full 64-bit range is accepted.
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_INT64, &self.to_le_bytes());
    }
}

impl EncodeItem for u8 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_UINT8, &self.to_le_bytes());
    }
}

impl EncodeItem for u16 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_UINT16, &self.to_le_bytes());
    }
}

impl EncodeItem for u32 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_UINT32, &self.to_le_bytes());
    }
}

impl EncodeItem for u64 {
    /// The full 64-bit range is accepted.
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_UINT64, &self.to_le_bytes());
    }
}

impl EncodeItem for f32 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_FLOAT, &self.to_le_bytes());
    }
}

impl EncodeItem for f64 {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_DOUBLE, &self.to_le_bytes());
    }
}

impl EncodeItem for bool {
    #[inline]
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(if *self { OP_TRUE } else { OP_FALSE }, &[]);
    }
}

impl EncodeItem for &str {
    /// Encode a `&str` as a NUL-terminated string record.
    fn encode(&self, buf: &mut EncodeBuffer) {
        buf.append(OP_STRING, self.as_bytes());
        buf.append(OP_INVALID, &[0]);
    }
}

impl EncodeItem for &[u8] {
    /// Encode a byte slice as a blob record, using the smallest length width that can hold
    /// its length.
    fn encode(&self, buf: &mut EncodeBuffer) {
        let len = self.len() as u64;
        let lenle = len.to_le_bytes();
        let opcode = match len {
            0..=0xff => OP_BIN8,
            0x100..=0xffff => OP_BIN16,
            0x1_0000..=0xff_ffff => OP_BIN24,
            0x100_0000..=0xffff_ffff => OP_BIN32,
            _ => {
                buf.err = true;
                return;
            }
        };
        let width = usize::from(opcode & OP_WIDTH_MASK);
        buf.append(opcode, &lenle[..width]);
        buf.append(OP_INVALID, self);
    }
}

impl<'buf> EncodeItem for JSONB<'buf> {
    fn encode(&self, buf: &mut EncodeBuffer) {
        match *self {
            JSONB::BeginObject => {
                buf.object_begin();
            }
            JSONB::EndObject => {
                buf.object_end();
            }
            JSONB::BeginArray => {
                buf.array_begin();
            }
            JSONB::EndArray => {
                buf.array_end();
            }
            JSONB::Null => buf.append(OP_NULL, &[]),
            JSONB::True => buf.append(OP_TRUE, &[]),
            JSONB::False => buf.append(OP_FALSE, &[]),
            JSONB::Str(s) => s.encode(buf),
            JSONB::Bin(b) => b.encode(buf),
            JSONB::Int8(v) => v.encode(buf),
            JSONB::Int16(v) => v.encode(buf),
            JSONB::Int32(v) => v.encode(buf),
            JSONB::Int64(v) => v.encode(buf),
            JSONB::UInt8(v) => v.encode(buf),
            JSONB::UInt16(v) => v.encode(buf),
            JSONB::UInt32(v) => v.encode(buf),
            JSONB::UInt64(v) => v.encode(buf),
            JSONB::Float32(v) => v.encode(buf),
            JSONB::Float64(v) => v.encode(buf),
        }
    }
}
