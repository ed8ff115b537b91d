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
 * soi_minijsonb backing storage
 *
 * Byte storage behind the encoder and the SOI2C transaction buffer. On constrained targets this
 * is a caller-supplied fixed slice; hosted callers may supply something that reallocates. The
 * grow seam replaces the C-style grow callback with a capability trait.
 **************************************************************************************************/
use std::fmt;

#[cfg(any(feature = "full", test))]
use std::vec::Vec;

/// Backing storage for an encode or transaction buffer.
///
/// Consumers must re-read the slice and capacity after every call to [`Storage::grow`]: a grower
/// is free to move the bytes. Implementations are `Debug` so that traced calls can print them.
pub trait Storage: fmt::Debug {
    /// The stored bytes. The full capacity is always accessible.
    fn as_slice(&self) -> &[u8];

    /// The stored bytes, mutably.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Current capacity in bytes.
    fn capacity(&self) -> usize {
        self.as_slice().len()
    }

    /// Try to make the capacity at least `needed` bytes, preserving contents. Returns `false`
    /// if the storage cannot grow that far; the capacity is then unchanged.
    fn grow(&mut self, needed: usize) -> bool;
}

/// A fixed-capacity buffer over a caller-owned slice. Never grows.
#[derive(Debug)]
pub struct FixedBuf<'a> {
    bytes: &'a mut [u8],
}

impl<'a> FixedBuf<'a> {
    /// Wrap `bytes` as non-growing storage.
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> FixedBuf<'a> {
        FixedBuf { bytes }
    }
}

impl Storage for FixedBuf<'_> {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.bytes
    }

    #[inline]
    fn grow(&mut self, needed: usize) -> bool {
        needed <= self.bytes.len()
    }
}

/// `Vec<u8>` storage grows by zero-filled resizing. The vector's length, not its reserve, is
/// the capacity seen by consumers.
#[cfg(any(feature = "full", test))]
impl Storage for Vec<u8> {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }

    fn grow(&mut self, needed: usize) -> bool {
        if needed > self.len() {
            self.resize(needed, 0);
        }
        true
    }
}
