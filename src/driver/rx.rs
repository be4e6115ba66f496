//! Receive decoder
//!
//! The receiver has no length field to go on: the PIO program captures raw
//! bytes from the start-of-frame delimiter until the carrier drops or the
//! window fills. The frame end is found by running the CRC over the window
//! and stopping at the first position where the next four bytes equal the
//! FCS of everything before them.
//!
//! A payload that happens to contain its own running FCS cuts the frame
//! short at that point. The odds are about 2^-32 per byte position.

use crate::constants::CRC_SIZE;
use crate::crc::{Crc32, fcs_bytes};

/// Length of the frame in `window`, excluding the FCS.
///
/// Returns `None` when no prefix of the window is followed by its own FCS,
/// which covers idle windows, truncated captures and line noise alike.
pub fn frame_length(window: &[u8]) -> Option<usize> {
    let mut crc = Crc32::new();
    for (i, &byte) in window.iter().enumerate() {
        crc.push(byte);
        let end = i + 1;
        match window.get(end..end + CRC_SIZE) {
            Some(fcs) if fcs == fcs_bytes(crc.value()) => return Some(end),
            Some(_) => {}
            None => return None,
        }
    }
    None
}

// =============================================================================
// Unit Tests
// =============================================================================
