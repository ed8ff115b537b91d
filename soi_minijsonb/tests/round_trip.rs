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
 * Encode-seal-parse round trip over every representable wire type.
 **************************************************************************************************/

extern crate soi_minijsonb;

use soi_minijsonb::decoder::SequenceBuffer;
use soi_minijsonb::encoder::EncodeBuffer;
use soi_minijsonb::error::JSONBError;
use soi_minijsonb::types::JSONB;

#[test]
fn every_wire_type_survives_a_frame() -> Result<(), JSONBError> {
    let blob: &[u8] = &[0x00, 0x0a, 0x7f, 0xff, 0x0d];
    let mut bytes = [0u8; 512];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.object_begin()
        .insert_item("i8", &-5i8)
        .insert_item("i16", &-300i16)
        .insert_item("i32", &-70_000i32)
        .insert_item("i64", &i64::MIN)
        .insert_item("u8", &200u8)
        .insert_item("u16", &60_000u16)
        .insert_item("u32", &4_000_000_000u32)
        .insert_item("u64", &u64::MAX)
        .insert_item("f32", &3.5f32)
        .insert_item("f64", &-2.25f64)
        .insert_item("s", &"hello")
        .insert_item("empty", &"")
        .insert_item("bin", &blob)
        .insert_item("yes", &true)
        .insert_item("no", &false)
        .insert_item("nil", &JSONB::Null);
    buf.item("arr")
        .array_begin()
        .insert(&1u8)
        .insert(&"two")
        .insert(&JSONB::Null)
        .array_end();
    buf.item("obj")
        .object_begin()
        .insert_item("inner", &9u8)
        .object_end();
    buf.object_end();

    // The raw record stream must come back bit-identical after seal + parse
    let raw = buf.encoded()?.to_vec();
    buf.seal()?;
    let frame_len = buf.len();
    let seq = SequenceBuffer::parse(&mut bytes[..frame_len])?;
    assert_eq!(seq.bytes, raw.as_slice());

    assert_eq!(seq.get_i32("i8"), -5);
    assert_eq!(seq.get_i32("i16"), -300);
    assert_eq!(seq.get_i32("i32"), -70_000);
    assert_eq!(seq.get_i64("i64"), i64::MIN);
    assert_eq!(seq.get_u32("u8"), 200);
    assert_eq!(seq.get_u32("u16"), 60_000);
    assert_eq!(seq.get_u32("u32"), 4_000_000_000);
    assert_eq!(seq.get_u64("u64"), u64::MAX);
    assert_eq!(seq.get_f32("f32"), 3.5);
    assert_eq!(seq.get_f64("f64"), -2.25);
    assert_eq!(seq.get_str("s"), "hello");
    assert_eq!(seq.get_str("empty"), "");
    assert_eq!(seq.get_bin("bin"), blob);
    assert!(seq.get_bool("yes"));
    assert!(!seq.get_bool("no"));
    assert!(!seq.get_bool("nil"));
    assert_eq!(seq.get("nil").unwrap().value()?, JSONB::Null);
    Ok(())
}

#[test]
fn enumeration_matches_typed_values() -> Result<(), JSONBError> {
    let mut bytes = [0u8; 128];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.array_begin()
        .insert(&JSONB::Int16(-2))
        .insert(&JSONB::Str("x"))
        .insert(&JSONB::Float64(0.5))
        .insert(&JSONB::Bin(&[1, 2]))
        .array_end();
    buf.seal()?;
    let frame_len = buf.len();
    let seq = SequenceBuffer::parse(&mut bytes[..frame_len])?;

    let items: Vec<JSONB> = seq.into_iter().map(|r| r.value().unwrap()).collect();
    assert_eq!(
        items,
        vec![
            JSONB::BeginArray,
            JSONB::Int16(-2),
            JSONB::Str("x"),
            JSONB::Float64(0.5),
            JSONB::Bin(&[1, 2]),
            JSONB::EndArray,
        ]
    );
    Ok(())
}

#[test]
fn large_payload_spans_cobs_blocks() -> Result<(), JSONBError> {
    // A blob long enough that the sealed frame needs several COBS length codes
    let blob = vec![0x11u8; 700];
    let mut bytes = vec![0u8; 1024];
    let mut buf = EncodeBuffer::new(&mut bytes);
    buf.object_begin()
        .insert_item("big", &blob.as_slice())
        .object_end();
    buf.seal()?;
    let frame_len = buf.len();
    assert!(bytes[..frame_len - 1].iter().all(|&b| b != b'\n'));
    let seq = SequenceBuffer::parse(&mut bytes[..frame_len])?;
    assert_eq!(seq.get_bin("big"), blob.as_slice());
    Ok(())
}
