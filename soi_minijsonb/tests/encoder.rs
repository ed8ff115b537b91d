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
 * Test cases for the JSONB encoder: record layout, width selection, overrun latching and frame
 * sealing.
 **************************************************************************************************/

extern crate soi_minijsonb;

use soi_minijsonb::encoder::EncodeBuffer;
use soi_minijsonb::error::JSONBError;
use soi_minijsonb::storage::Storage;
use soi_minijsonb::types::JSONB;

/// Growable test storage over a Vec, standing in for a host-side reallocating buffer.
#[derive(Debug)]
struct GrowStore {
    data: Vec<u8>,
}

impl GrowStore {
    fn new(cap: usize) -> Self {
        GrowStore {
            data: vec![0; cap],
        }
    }
}

impl Storage for GrowStore {
    fn as_slice(&self) -> &[u8] {
        &self.data
    }
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
    fn grow(&mut self, needed: usize) -> bool {
        if needed > self.data.len() {
            self.data.resize(needed, 0);
        }
        true
    }
}

#[test]
fn encode_simple_object_record_stream() -> Result<(), JSONBError> {
    // {"temp": 72, "ok": true}
    let expected: &[u8] = &[
        0x10, 0x30, b't', b'e', b'm', b'p', 0x00, 0x71, 0x48, 0x30, b'o', b'k', 0x00, 0x21, 0x11,
    ];
    let mut bytes = [0u8; 64];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.object_begin()
        .insert_item("temp", &72u8)
        .insert_item("ok", &true)
        .object_end();
    assert_eq!(buf.encoded()?, expected);
    Ok(())
}

#[test]
fn encode_integer_widths() -> Result<(), JSONBError> {
    let cases: &[(&dyn soi_minijsonb::encoder::EncodeItem, &[u8])] = &[
        (&-1i8, &[0x61, 0xff]),
        (&0x1122i16, &[0x62, 0x22, 0x11]),
        (&-2i32, &[0x64, 0xfe, 0xff, 0xff, 0xff]),
        (
            &i64::MIN,
            &[0x68, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80],
        ),
        (&0x9fu8, &[0x71, 0x9f]),
        (&0xbeefu16, &[0x72, 0xef, 0xbe]),
        (&0xdead_beefu32, &[0x74, 0xef, 0xbe, 0xad, 0xde]),
        (
            &u64::MAX,
            &[0x78, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
    ];
    for (item, expected) in cases {
        let mut bytes = [0u8; 16];
        let mut buf = EncodeBuffer::new(&mut bytes);
        buf.insert(*item);
        assert_eq!(buf.encoded()?, *expected);
    }
    Ok(())
}

#[test]
fn encode_floats() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 32];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&1.5f32).insert(&-2.25f64);
    let mut expected = vec![0x84u8];
    expected.extend_from_slice(&1.5f32.to_le_bytes());
    expected.push(0x88);
    expected.extend_from_slice(&(-2.25f64).to_le_bytes());
    assert_eq!(buf.encoded()?, expected.as_slice());
    Ok(())
}

#[test]
fn encode_constants_and_strings() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 32];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&JSONB::Null)
        .insert(&false)
        .insert(&"hi")
        .insert_str_len("hello", 3);
    let expected: &[u8] = &[
        0x20, 0x22, 0x40, b'h', b'i', 0x00, 0x40, b'h', b'e', b'l', 0x00,
    ];
    assert_eq!(buf.encoded()?, expected);
    Ok(())
}

#[test]
fn encode_blob_width_selection() -> Result<(), JSONBError> {
    // 3 bytes: 1-byte length field
    let mut bytes = [0u8; 16];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&[0x00u8, 0x0a, 0xff].as_slice());
    assert_eq!(buf.encoded()?, &[0x51, 0x03, 0x00, 0x0a, 0xff]);

    // 300 bytes: 2-byte little-endian length field
    let blob = vec![0x5au8; 300];
    let mut bytes = vec![0u8; 400];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&blob.as_slice());
    let encoded = buf.encoded()?;
    assert_eq!(&encoded[..3], &[0x52, 0x2c, 0x01]);
    assert_eq!(encoded.len(), 3 + 300);
    Ok(())
}

#[test]
fn encode_item_then_value() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 16];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.item("v");
    buf.insert(&JSONB::Null);
    assert_eq!(buf.encoded()?, &[0x30, b'v', 0x00, 0x20]);
    Ok(())
}

#[test]
fn overrun_latches_and_drops_later_appends() {
    let mut bytes = [0u8; 4];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&1u8);
    assert!(!buf.is_overrun());
    buf.insert(&"much too long for this buffer");
    assert!(buf.is_overrun());
    let before = buf.len();
    buf.insert(&2u8);
    assert_eq!(buf.len(), before);
    assert_eq!(buf.seal(), Err(JSONBError::Overrun));
    assert!(buf.encoded().is_err());
}

#[test]
fn seal_budget_is_exact() {
    // 10 payload bytes need 10 + headroom(2) + siglen(5) = 17 bytes of capacity
    for (cap, expect_ok) in [(17usize, true), (16usize, false)] {
        let mut bytes = vec![0u8; cap];
        let mut buf = EncodeBuffer::new(&mut bytes);
        for _ in 0..10 {
            buf.insert(&JSONB::Null);
        }
        assert_eq!(buf.len(), 10);
        let sealed = buf.seal();
        assert_eq!(sealed.is_ok(), expect_ok, "cap={}", cap);
        assert_eq!(buf.is_overrun(), !expect_ok);
    }
}

#[test]
fn seal_produces_envelope_without_interior_newline() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 128];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.object_begin()
        .insert_item("b", &[0x00u8, 0x0a, 0xff].as_slice())
        .object_end();
    buf.seal()?;
    let frame = buf.encoded()?;
    assert!(frame.starts_with(b"{:"));
    assert!(frame.ends_with(b":}\n"));
    // The terminator must be the only newline in the frame
    assert!(frame[..frame.len() - 1].iter().all(|&b| b != b'\n'));
    Ok(())
}

#[test]
fn seal_of_empty_payload() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 8];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.seal()?;
    assert_eq!(buf.encoded()?, &[0x7b, 0x3a, 0x0b, 0x3a, 0x7d, 0x0a]);
    Ok(())
}

#[test]
fn seal_twice_is_an_error() {
    let mut bytes = [0u8; 32];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.insert(&1u8);
    assert!(buf.seal().is_ok());
    assert_eq!(buf.seal(), Err(JSONBError::BadState));
    assert!(buf.is_err());
}

#[test]
fn growable_storage_extends_on_demand() -> Result<(), JSONBError> {
    let mut store = GrowStore::new(4);
    let mut buf = EncodeBuffer::with_storage(&mut store);
    buf.object_begin()
        .insert_item("msg", &"a string that cannot fit in four bytes")
        .object_end();
    assert!(!buf.is_overrun());
    buf.seal()?;
    assert!(buf.encoded()?.starts_with(b"{:"));
    Ok(())
}
