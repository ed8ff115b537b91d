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
 * Test cases for the COBS codec with a configurable forbidden byte.
 **************************************************************************************************/

extern crate soi_minijsonb;

use soi_minijsonb::framing::{decode_in_place, encode_buf, encoded_len, guaranteed_fit};

fn encode_vec(src: &[u8], forbidden: u8) -> Vec<u8> {
    let mut dst = vec![0u8; encoded_len(src)];
    let n = encode_buf(src, &mut dst, forbidden);
    dst.truncate(n);
    dst
}

fn decode_vec(encoded: &[u8], forbidden: u8) -> Vec<u8> {
    let mut work = encoded.to_vec();
    let n = decode_in_place(&mut work, forbidden);
    work.truncate(n);
    work
}

fn sample_inputs() -> Vec<Vec<u8>> {
    vec![
        vec![],
        vec![0x00],
        vec![0x00; 5],
        vec![1, 2, 3],
        vec![0x0a],
        vec![0x0a, 0x00, 0x0a, 0xff],
        (1u16..=255).map(|v| v as u8).collect(),
        vec![0xab; 254],
        vec![0xab; 255],
        (0u16..300).map(|v| (v % 256) as u8).collect(),
    ]
}

#[test]
fn cobs_round_trip() {
    for src in sample_inputs() {
        for forbidden in [0x00u8, 0x0a, 0x42, 0xff] {
            let encoded = encode_vec(&src, forbidden);
            assert_eq!(
                decode_vec(&encoded, forbidden),
                src,
                "round trip failed, forbidden={:#04x}, len={}",
                forbidden,
                src.len()
            );
        }
    }
}

#[test]
fn cobs_output_never_contains_forbidden_byte() {
    for src in sample_inputs() {
        for forbidden in [0x00u8, 0x0a, 0x42, 0xff] {
            let encoded = encode_vec(&src, forbidden);
            assert!(
                encoded.iter().all(|&b| b != forbidden),
                "forbidden byte {:#04x} leaked into encoding",
                forbidden
            );
        }
    }
}

#[test]
fn cobs_length_oracle() {
    for src in sample_inputs() {
        let expected = encode_vec(&src, 0).len();
        assert_eq!(encoded_len(&src), expected);
        // The XOR shift changes values, never the block structure
        assert_eq!(encode_vec(&src, 0x0a).len(), expected);
    }
}

#[test]
fn cobs_xor_shift_is_a_relabelling() {
    for src in sample_inputs() {
        let plain = encode_vec(&src, 0);
        let shifted = encode_vec(&src, 0x0a);
        let unshifted: Vec<u8> = shifted.iter().map(|&b| b ^ 0x0a).collect();
        assert_eq!(unshifted, plain);
    }
}

#[test]
fn cobs_block_boundary_254() {
    // 254 non-zero bytes: one full block plus an empty trailing group
    let src = [0xabu8; 254];
    let encoded = encode_vec(&src, 0);
    assert_eq!(encoded.len(), 256);
    assert_eq!(encoded[0], 0xff);
    assert!(encoded[1..255].iter().all(|&b| b == 0xab));
    assert_eq!(encoded[255], 0x01);
}

#[test]
fn cobs_block_boundary_255() {
    // 255 non-zero bytes: a full block, then a one-byte group
    let src = [0xabu8; 255];
    let encoded = encode_vec(&src, 0);
    assert_eq!(encoded.len(), 257);
    assert_eq!(encoded[0], 0xff);
    assert!(encoded[1..255].iter().all(|&b| b == 0xab));
    assert_eq!(encoded[255], 0x02);
    assert_eq!(encoded[256], 0xab);
}

#[test]
fn cobs_single_zero() {
    assert_eq!(encode_vec(&[0x00], 0), vec![0x01, 0x01]);
    assert_eq!(decode_vec(&[0x01, 0x01], 0), vec![0x00]);
}

#[test]
fn cobs_empty_input() {
    assert_eq!(encode_vec(&[], 0), vec![0x01]);
    assert_eq!(decode_vec(&[0x01], 0), Vec::<u8>::new());
}

#[test]
fn cobs_truncated_input_decodes_short() {
    // The length code promises four data bytes but only two are present
    let mut work = vec![0x05u8, 0x11, 0x22];
    let n = decode_in_place(&mut work, 0);
    assert_eq!(&work[..n], &[0x11, 0x22]);
}

#[test]
fn cobs_zero_code_terminates_decode() {
    // After the XOR shift a raw 0x0a byte is a zero code, which ends the stream. The
    // inter-group zero for the finished short block lands first, then decoding stops and the
    // trailing junk byte is never touched.
    let mut work = vec![0x03u8 ^ 0x0a, 0x31 ^ 0x0a, 0x32 ^ 0x0a, 0x0a, 0x99];
    let n = decode_in_place(&mut work, 0x0a);
    assert_eq!(n, 3);
    assert_eq!(&work[..n], &[0x31, 0x32, 0x00]);
}

#[test]
fn guaranteed_fit_budget() {
    assert_eq!(guaranteed_fit(0), 0);
    assert_eq!(guaranteed_fit(2), 0);
    assert_eq!(guaranteed_fit(3), 1);
    assert_eq!(guaranteed_fit(254), 251);
    assert_eq!(guaranteed_fit(255), 252);
    assert_eq!(guaranteed_fit(508), 504);
}

#[test]
fn guaranteed_fit_is_conservative() {
    // Worst case data (no zeroes): anything within the guarantee must encode into cap bytes
    for cap in [8usize, 64, 255, 300, 600] {
        let fit = guaranteed_fit(cap);
        let src = vec![0x55u8; fit];
        assert!(encoded_len(&src) <= cap, "cap={} fit={}", cap, fit);
    }
}
