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
 * soi_minijsonb COBS codec
 *
 * Consistent Overhead Byte Stuffing with a configurable forbidden byte. The classic algorithm
 * removes 0x00 from its output; XORing every output byte (length codes and data alike) with the
 * forbidden byte shifts the unrepresentable value so that any byte may serve as the frame
 * terminator. Frame sealing uses 0x0A.
 **************************************************************************************************/
#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Longest run of data bytes a single length code can cover.
const MAX_BLOCK: usize = 254;

/// Return the largest raw payload length that is guaranteed to fit in `cap` bytes once encoded.
///
/// Worst-case encoding overhead is one leading code byte, one code byte per 254 data bytes, and
/// one final code byte. This is a `const fn` so it can size fixed buffers.
pub const fn guaranteed_fit(cap: usize) -> usize {
    let overhead = 1 + cap / MAX_BLOCK + 1;
    if cap > overhead {
        cap - overhead
    } else {
        0
    }
}

/// Return the exact encoded length of `src` without producing any output.
///
/// The result is independent of the forbidden byte: XORing is a bijection on byte values and
/// never changes the block structure.
#[cfg_attr(feature = "trace", trace)]
pub fn encoded_len(src: &[u8]) -> usize {
    let mut len = 1usize;
    let mut code = 1u8;
    for &b in src {
        if b != 0 {
            len += 1;
            code += 1;
        }
        if b == 0 || code == 0xff {
            len += 1;
            code = 1;
        }
    }
    len
}

/// Encode `src` into `dst` so that no output byte equals `forbidden`. Returns the number of
/// bytes written, which is never more than `encoded_len(src)`.
///
/// # Panics
///
/// If `dst` is shorter than `encoded_len(src)`.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_buf(src: &[u8], dst: &mut [u8], forbidden: u8) -> usize {
    let mut code_at = 0usize;
    let mut wr = 1usize;
    let mut code = 1u8;
    for &b in src {
        if b != 0 {
            dst[wr] = b ^ forbidden;
            wr += 1;
            code += 1;
        }
        if b == 0 || code == 0xff {
            dst[code_at] = code ^ forbidden;
            code = 1;
            code_at = wr;
            wr += 1;
        }
    }
    dst[code_at] = code ^ forbidden;
    wr
}

/// Encode within a single buffer, reading `src_len` bytes starting at `src_start` and writing
/// the encoding from `dst_start` upward. Returns the encoded length.
///
/// The regions may overlap provided `src_start - dst_start` is at least the worst-case
/// expansion of the source (`2 + src_len / 254`); the write cursor then never catches the read
/// cursor. Frame sealing arranges exactly this by shifting the raw payload up first.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_within(
    buf: &mut [u8],
    src_start: usize,
    src_len: usize,
    dst_start: usize,
    forbidden: u8,
) -> usize {
    debug_assert!(dst_start + 2 + src_len / MAX_BLOCK <= src_start);
    let mut code_at = dst_start;
    let mut wr = dst_start + 1;
    let mut code = 1u8;
    for rd in src_start..src_start + src_len {
        let b = buf[rd];
        if b != 0 {
            buf[wr] = b ^ forbidden;
            wr += 1;
            code += 1;
        }
        if b == 0 || code == 0xff {
            buf[code_at] = code ^ forbidden;
            code = 1;
            code_at = wr;
            wr += 1;
        }
    }
    buf[code_at] = code ^ forbidden;
    wr - dst_start
}

/// Decode `buf` in place, returning the decoded length. The decoded form is never longer than
/// the encoded form, so the output always fits at the front of `buf`.
///
/// Malformed input is not reported: a length code that runs past the end of the buffer, or a
/// code byte that decodes to zero, simply ends decoding with a short result. Callers detect
/// damage downstream, from truncated records.
#[cfg_attr(feature = "trace", trace)]
pub fn decode_in_place(buf: &mut [u8], forbidden: u8) -> usize {
    let mut rd = 0usize;
    let mut wr = 0usize;
    let mut code = 0xffu8;
    let mut copy = 0u8;
    while rd < buf.len() {
        if copy != 0 {
            buf[wr] = buf[rd] ^ forbidden;
            wr += 1;
            rd += 1;
        } else {
            if code != 0xff {
                // A shorter-than-maximum block implies a forbidden byte in the raw data
                buf[wr] = 0;
                wr += 1;
            }
            code = buf[rd] ^ forbidden;
            rd += 1;
            copy = code;
            if code == 0 {
                break;
            }
        }
        copy -= 1;
    }
    wr
}

// Tests for the overlap discipline of encode_within; the public API tests live in tests/cobs.rs.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_within_minimum_gap() {
        // 3 raw bytes shifted up by the worst-case margin of 2
        let mut buf = [0u8; 16];
        buf[2..5].copy_from_slice(&[1, 2, 3]);
        let n = encode_within(&mut buf, 2, 3, 0, 0);
        assert_eq!(n, 4);
        assert_eq!(&buf[..4], &[4, 1, 2, 3]);
    }

    #[test]
    fn encode_within_zero_runs() {
        let mut buf = [0u8; 16];
        buf[3..7].copy_from_slice(&[0, 7, 0, 0]);
        let n = encode_within(&mut buf, 3, 4, 0, 0);
        assert_eq!(n, 5);
        assert_eq!(&buf[..5], &[1, 2, 7, 1, 1]);
    }

    #[test]
    fn guaranteed_fit_clamps_at_zero() {
        assert_eq!(guaranteed_fit(0), 0);
        assert_eq!(guaranteed_fit(2), 0);
        assert_eq!(guaranteed_fit(3), 1);
    }
}
