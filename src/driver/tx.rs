//! Transmit encoder
//!
//! The PIO transmitter shifts out one symbol byte per RMII clock pair: bits
//! 1:0 are TXD1:TXD0 and bit 2 is TX_EN. This module expands a frame into
//! that symbol stream:
//!
//! ```text
//! 31 x 0x05 (preamble) | 0x07 (SFD) | 4 symbols per byte, LSB dibit first | 48 x 0x00
//! ```
//!
//! The frame and FCS bytes are expanded the same way; the trailer keeps
//! TX_EN low for the inter-frame gap.

use crate::constants::{
    CRC_SIZE, MAX_TX_FRAME_SIZE, MIN_FRAME_SIZE, PREAMBLE_SYMBOLS, SYMBOL_IDLE, SYMBOL_PREAMBLE,
    SYMBOL_SFD, SYMBOL_TX_EN, SYMBOLS_PER_BYTE, TRAILER_SYMBOLS, TX_SYMBOL_BUFFER_SIZE,
};
use crate::error::{DmaError, DmaResult};

/// Frame staging area and symbol buffer for the transmit DMA.
///
/// The symbol buffer belongs to the DMA channel while a transfer is in
/// flight; the driver only rewrites it after the channel reports idle.
#[derive(Debug)]
pub struct TxBuffers {
    pub(crate) frame: [u8; MAX_TX_FRAME_SIZE],
    pub(crate) symbols: [u8; TX_SYMBOL_BUFFER_SIZE],
}

impl TxBuffers {
    /// Create zeroed buffers (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            frame: [0; MAX_TX_FRAME_SIZE],
            symbols: [0; TX_SYMBOL_BUFFER_SIZE],
        }
    }
}

impl Default for TxBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of symbols produced for a frame of `frame_len` bytes (before padding)
pub const fn symbol_len(frame_len: usize) -> usize {
    let padded = if frame_len < MIN_FRAME_SIZE {
        MIN_FRAME_SIZE
    } else {
        frame_len
    };
    PREAMBLE_SYMBOLS + 1 + (padded + CRC_SIZE) * SYMBOLS_PER_BYTE + TRAILER_SYMBOLS
}

/// Zero-fill `buf[len..MIN_FRAME_SIZE]` and return the padded length.
///
/// `buf` must hold at least [`MIN_FRAME_SIZE`] bytes.
pub fn pad_frame(buf: &mut [u8], len: usize) -> usize {
    if len >= MIN_FRAME_SIZE {
        return len;
    }
    buf[len..MIN_FRAME_SIZE].fill(0);
    MIN_FRAME_SIZE
}

#[inline(always)]
fn push_byte(out: &mut [u8], at: usize, byte: u8) -> usize {
    for k in 0..SYMBOLS_PER_BYTE {
        out[at + k] = SYMBOL_TX_EN | ((byte >> (2 * k)) & 0x03);
    }
    at + SYMBOLS_PER_BYTE
}

/// Expand `frame` followed by `fcs` into `out`.
///
/// Returns the number of symbols written.
///
/// # Errors
///
/// - [`DmaError::InvalidLength`] for an empty frame
/// - [`DmaError::FrameTooLarge`] when `out` cannot hold the stream
pub fn encode_symbols(frame: &[u8], fcs: [u8; CRC_SIZE], out: &mut [u8]) -> DmaResult<usize> {
    if frame.is_empty() {
        return Err(DmaError::InvalidLength);
    }
    let total = PREAMBLE_SYMBOLS + 1 + (frame.len() + CRC_SIZE) * SYMBOLS_PER_BYTE + TRAILER_SYMBOLS;
    if total > out.len() {
        return Err(DmaError::FrameTooLarge);
    }

    out[..PREAMBLE_SYMBOLS].fill(SYMBOL_PREAMBLE);
    out[PREAMBLE_SYMBOLS] = SYMBOL_SFD;

    let mut at = PREAMBLE_SYMBOLS + 1;
    for &byte in frame.iter().chain(fcs.iter()) {
        at = push_byte(out, at, byte);
    }

    out[at..at + TRAILER_SYMBOLS].fill(SYMBOL_IDLE);
    Ok(at + TRAILER_SYMBOLS)
}

// =============================================================================
// Unit Tests
// =============================================================================
