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
 * soi_minijsonb JSONB constants
 *
 * A compact, memory efficient, deserializer and serializer for the JSONB binary JSON encoding.
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

/// Sentinel opcode. Never valid on the wire; internally it marks an append that carries payload
/// bytes only, with no leading tag byte.
pub const OP_INVALID: u8 = 0x00;

/// Opens an object
pub const OP_BEGIN_OBJECT: u8 = 0x10;
/// Closes an object
pub const OP_END_OBJECT: u8 = 0x11;
/// Opens an array
pub const OP_BEGIN_ARRAY: u8 = 0x12;
/// Closes an array
pub const OP_END_ARRAY: u8 = 0x13;

/// The JSON `null` value
pub const OP_NULL: u8 = 0x20;
/// The JSON `true` value
pub const OP_TRUE: u8 = 0x21;
/// The JSON `false` value
pub const OP_FALSE: u8 = 0x22;

/// Object key. Followed by a NUL-terminated UTF-8 name, then one more tagged datum (the value)
pub const OP_ITEM: u8 = 0x30;

/// NUL-terminated UTF-8 string
pub const OP_STRING: u8 = 0x40;

/// Binary blob, 1-byte length
pub const OP_BIN8: u8 = 0x51;
/// Binary blob, 2-byte little-endian length
pub const OP_BIN16: u8 = 0x52;
/// Binary blob, 3-byte little-endian length
pub const OP_BIN24: u8 = 0x53;
/// Binary blob, 4-byte little-endian length
pub const OP_BIN32: u8 = 0x54;

/// Signed 8-bit integer
pub const OP_INT8: u8 = 0x61;
/// Signed 16-bit integer, little-endian
pub const OP_INT16: u8 = 0x62;
/// Signed 32-bit integer, little-endian
pub const OP_INT32: u8 = 0x64;
/// Signed 64-bit integer, little-endian
pub const OP_INT64: u8 = 0x68;

/// Unsigned 8-bit integer
pub const OP_UINT8: u8 = 0x71;
/// Unsigned 16-bit integer, little-endian
pub const OP_UINT16: u8 = 0x72;
/// Unsigned 32-bit integer, little-endian
pub const OP_UINT32: u8 = 0x74;
/// Unsigned 64-bit integer, little-endian
pub const OP_UINT64: u8 = 0x78;

/// IEEE-754 binary32, little-endian
pub const OP_FLOAT: u8 = 0x84;
/// IEEE-754 binary64, little-endian
pub const OP_DOUBLE: u8 = 0x88;

/// For the integer and float opcodes, the low nibble is the payload byte count.
pub const OP_WIDTH_MASK: u8 = 0x0F;

/// Frame header, the two ASCII bytes `{:`
pub const FRAME_HEADER: &[u8] = b"{:";
/// Frame trailer, the two ASCII bytes `:}`
pub const FRAME_TRAILER: &[u8] = b":}";
/// Frame terminator. Also the COBS forbidden byte, so it cannot occur inside the sealed payload.
pub const FRAME_TERMINATOR: u8 = b'\n';
/// Total framing overhead: header, trailer and the terminator byte.
pub const FRAME_SIGLEN: usize = 5;
