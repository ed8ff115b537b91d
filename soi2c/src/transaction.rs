/***************************************************************************************************
 * Copyright (c) 2022-2023, Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * SOI2C transaction engine
 *
 * Half-duplex, chunked request/response over an I2C link. The peripheral has no interrupt line
 * toward the host, so the response side is a polling state machine: the host sends a read
 * ticket naming how many bytes it wants, the peripheral answers with how many are pending and
 * the bytes themselves, and the host loops until a newline has arrived. One caller-supplied
 * buffer carries the outgoing request and is then reused for the reassembled response.
 **************************************************************************************************/
use bitflags::bitflags;

use soi_minijsonb::storage::{FixedBuf, Storage};

use crate::error::{Result, SOI2CError};
use crate::port::I2cPort;

/// Default 7-bit I2C address of a Notecard peripheral.
pub const NOTECARD_I2C_ADDR: u8 = 0x17;

/// Largest payload carried by one write segment.
pub const MAX_SEGMENT: usize = 250;

/// Pause after each transmitted segment, letting the peripheral drain its I2C FIFO.
const SEGMENT_DELAY_MS: u32 = 250;
/// Pause between a read ticket and the matching read.
const TICKET_DELAY_MS: u32 = 1;
/// Idle poll interval while the peripheral has nothing pending.
const POLL_DELAY_MS: u32 = 50;
/// Total poll budget for one response.
const REQUEST_TIMEOUT_MS: u32 = 5000;
/// Every read reply leads with `[available, returned]`.
const CHUNK_HEADER_LEN: usize = 2;
/// Smallest workable transaction buffer: one frame envelope.
const MIN_BUFFER: usize = 5;
/// Size of the scratch buffer used by [`Soi2c::reset`].
const RESET_BUF_LEN: usize = 25;

bitflags! {
    /// Behavior flags for [`Soi2c::transact`].
    pub struct TransactionFlags: u32 {
        /// Fire-and-forget: transmit the request and skip the response phase entirely.
        const NO_RESPONSE = 0x0001;
        /// Receive and discard the response until its newline; the buffer keeps nothing.
        const IGNORE_RESPONSE = 0x0002;
    }
}

/// A serial-over-I2C transaction context: one peripheral address plus the injected port.
///
/// Contexts are caller-owned and single-threaded; drive several peripherals by creating one
/// context per address.
pub struct Soi2c<P: I2cPort> {
    port: P,
    addr: u8,
}

impl<P: I2cPort> Soi2c<P> {
    /// Construct a context for the default Notecard address.
    pub fn new(port: P) -> Soi2c<P> {
        Soi2c {
            port,
            addr: NOTECARD_I2C_ADDR,
        }
    }

    /// Construct a context for a specific peripheral address. Address 0 selects the Notecard
    /// default.
    pub fn with_address(port: P, addr: u8) -> Soi2c<P> {
        Soi2c { port, addr }
    }

    /// The effective peripheral address.
    #[inline]
    pub fn address(&self) -> u8 {
        if self.addr == 0 {
            NOTECARD_I2C_ADDR
        } else {
            self.addr
        }
    }

    /// Consume the context, returning the port.
    pub fn into_port(self) -> P {
        self.port
    }

    /// Run one request/response transaction.
    ///
    /// On entry `buf` holds a newline-terminated request starting at offset 0. The request is
    /// transmitted in length-prefixed segments of at most [`MAX_SEGMENT`] bytes; unless
    /// [`TransactionFlags::NO_RESPONSE`] is set, the response is then polled for, reassembled
    /// at the front of the same buffer, and its length returned. The buffer contents are
    /// consumed either way, and are undefined after a failed transaction.
    pub fn transact(&mut self, flags: TransactionFlags, buf: &mut dyn Storage) -> Result<usize> {
        let addr = self.address();
        let mut cap = buf.capacity();
        if cap < MIN_BUFFER {
            return Err(SOI2CError::Config);
        }

        // The request is everything up to and including the first newline
        let reqlen = match buf.as_slice()[..cap].iter().position(|&b| b == b'\n') {
            Some(i) => i + 1,
            None => return Err(SOI2CError::MissingTerminator),
        };

        // One byte of headroom for the segment length prefix
        if reqlen + 1 > cap {
            return Err(SOI2CError::TxBufferOverflow);
        }
        buf.as_mut_slice().copy_within(0..reqlen, 1);

        let mut remaining = reqlen;
        while remaining > 0 {
            let seg = remaining.min(MAX_SEGMENT);
            let bytes = buf.as_mut_slice();
            bytes[0] = seg as u8;
            self.port
                .transmit(addr, &bytes[..1 + seg])
                .map_err(|_| SOI2CError::IoTransmit)?;
            self.port.delay_ms(SEGMENT_DELAY_MS);
            remaining -= seg;
            if remaining > 0 {
                buf.as_mut_slice().copy_within(1 + seg..1 + seg + remaining, 1);
            }
        }

        if flags.contains(TransactionFlags::NO_RESPONSE) {
            return Ok(0);
        }

        let ignore = flags.contains(TransactionFlags::IGNORE_RESPONSE);
        let mut used = 0usize;
        let mut requested = 0usize;
        let mut newline_seen = false;
        let mut budget = REQUEST_TIMEOUT_MS;
        loop {
            // Read ticket, then the reply: [available, returned] ahead of the chunk itself
            self.port
                .transmit(addr, &[0, requested as u8])
                .map_err(|_| SOI2CError::IoTransmit)?;
            self.port.delay_ms(TICKET_DELAY_MS);
            let (available, returned) = {
                let bytes = buf.as_mut_slice();
                self.port
                    .receive(addr, &mut bytes[used..used + CHUNK_HEADER_LEN + requested])
                    .map_err(|_| SOI2CError::IoReceive)?;
                (usize::from(bytes[used]), usize::from(bytes[used + 1]))
            };
            if returned != requested {
                return Err(SOI2CError::IoBadSizeReturned);
            }
            if returned > 0 {
                let bytes = buf.as_mut_slice();
                let chunk_start = used + CHUNK_HEADER_LEN;
                newline_seen |= bytes[chunk_start..chunk_start + returned]
                    .iter()
                    .any(|&b| b == b'\n');
                if !ignore {
                    // Compact the two header bytes out so the payload stays contiguous
                    bytes.copy_within(chunk_start..chunk_start + returned, used);
                    used += returned;
                }
            }

            requested = available;
            if requested > 0 {
                // Make room before asking, growing if the storage can and clamping otherwise
                let want = used + CHUNK_HEADER_LEN + requested;
                if want > cap && buf.grow(want) {
                    cap = buf.capacity();
                }
                let room = cap.saturating_sub(used + CHUNK_HEADER_LEN);
                if room == 0 {
                    return Err(SOI2CError::RxBufferOverflow);
                }
                requested = requested.min(room);
                continue;
            }
            if newline_seen {
                return Ok(used);
            }
            if budget == 0 {
                return Err(SOI2CError::IoTimeout);
            }
            self.port.delay_ms(POLL_DELAY_MS);
            budget = budget.saturating_sub(POLL_DELAY_MS);
        }
    }

    /// Flush any partial transaction pending on the peripheral.
    ///
    /// Sends a bare newline (padded into a small scratch buffer) and discards whatever reply
    /// the peripheral still has queued, up to and including its newline.
    pub fn reset(&mut self) -> Result<()> {
        let mut bytes = [0u8; RESET_BUF_LEN];
        bytes[0] = b'\n';
        let mut buf = FixedBuf::new(&mut bytes);
        self.transact(TransactionFlags::IGNORE_RESPONSE, &mut buf)?;
        Ok(())
    }
}
