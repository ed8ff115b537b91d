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
 * JSONB diagnostic notation
 *
 * Debug-only rendering of a decoded record stream in a JSON-like notation, with blobs printed
 * as h'..' hex strings. This is a development aid, not a JSON printer: strings are not escaped
 * and numbers print in their Rust default notation.
 **************************************************************************************************/
use crate::ast::JSONB;
use crate::decode::SequenceBuffer;

use std::fmt;
use std::fmt::Write;
use std::string::String;

/// Wrapper providing a `Display` instance over a decoded payload.
pub struct Diag<'buf>(pub SequenceBuffer<'buf>);

impl fmt::Display for Diag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rec in self.0.into_iter() {
            let closing = matches!(rec.value(), Ok(JSONB::EndObject) | Ok(JSONB::EndArray));
            if !rec.first && !closing {
                f.write_str(", ")?;
            }
            if let Some(key) = rec.key {
                write!(f, "\"{}\": ", key)?;
            }
            match rec.value() {
                Ok(JSONB::BeginObject) => f.write_str("{")?,
                Ok(JSONB::EndObject) => f.write_str("}")?,
                Ok(JSONB::BeginArray) => f.write_str("[")?,
                Ok(JSONB::EndArray) => f.write_str("]")?,
                Ok(JSONB::Null) => f.write_str("null")?,
                Ok(JSONB::True) => f.write_str("true")?,
                Ok(JSONB::False) => f.write_str("false")?,
                Ok(JSONB::Str(s)) => write!(f, "\"{}\"", s)?,
                Ok(JSONB::Bin(b)) => {
                    f.write_str("h'")?;
                    for byte in b {
                        write!(f, "{:02x}", byte)?;
                    }
                    f.write_str("'")?;
                }
                Ok(JSONB::Int8(v)) => write!(f, "{}", v)?,
                Ok(JSONB::Int16(v)) => write!(f, "{}", v)?,
                Ok(JSONB::Int32(v)) => write!(f, "{}", v)?,
                Ok(JSONB::Int64(v)) => write!(f, "{}", v)?,
                Ok(JSONB::UInt8(v)) => write!(f, "{}", v)?,
                Ok(JSONB::UInt16(v)) => write!(f, "{}", v)?,
                Ok(JSONB::UInt32(v)) => write!(f, "{}", v)?,
                Ok(JSONB::UInt64(v)) => write!(f, "{}", v)?,
                Ok(JSONB::Float32(v)) => write!(f, "{}", v)?,
                Ok(JSONB::Float64(v)) => write!(f, "{}", v)?,
                Err(_) => return f.write_str(" <undecodable>"),
            }
        }
        Ok(())
    }
}

/// Render a byte buffer as lowercase hex, e.g. for logging raw frames.
pub fn print_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // String formatting never fails
        let _ = write!(s, "{:02x}", b);
    }
    s
}
