//! IEEE 802.3 frame check sequence
//!
//! Reflected CRC32 (polynomial 0xEDB88320, initial value all-ones, output
//! complemented). The transmit encoder uses [`crc32`] once per frame; the
//! receive decoder drives a [`Crc32`] byte by byte because it needs the
//! running value after every position of the capture window.

/// Reflected form of the IEEE 802.3 polynomial
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

const INITIAL: u32 = 0xFFFF_FFFF;

static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Running CRC32 accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a new checksum
    pub const fn new() -> Self {
        Self { state: INITIAL }
    }

    /// Feed one byte
    #[inline(always)]
    pub fn push(&mut self, byte: u8) {
        let index = ((self.state ^ byte as u32) & 0xFF) as usize;
        self.state = (self.state >> 8) ^ TABLE[index];
    }

    /// Feed a slice
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.push(byte);
        }
    }

    /// Checksum of everything fed so far.
    ///
    /// Does not consume the accumulator, so more bytes may follow.
    #[inline(always)]
    pub const fn value(&self) -> u32 {
        !self.state
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC32 of `data`
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(data);
    crc.value()
}

/// FCS bytes in wire order (least significant byte first)
#[inline(always)]
pub const fn fcs_bytes(crc: u32) -> [u8; 4] {
    crc.to_le_bytes()
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input() {
        assert_eq!(crc32(&[]), 0);
    }

    #[test]
    fn table_matches_bitwise_definition() {
        fn bitwise(data: &[u8]) -> u32 {
            let mut crc = INITIAL;
            for &byte in data {
                let mut octet = byte;
                for _ in 0..8 {
                    if (crc ^ octet as u32) & 1 != 0 {
                        crc = (crc >> 1) ^ POLYNOMIAL;
                    } else {
                        crc >>= 1;
                    }
                    octet >>= 1;
                }
            }
            !crc
        }

        let data: Vec<u8> = (0..=255u8).chain((0..64u8).map(|i| i.wrapping_mul(7))).collect();
        assert_eq!(crc32(&data), bitwise(&data));
    }

    #[test]
    fn matches_reference_implementation() {
        let frame: Vec<u8> = (0..1514u32).map(|i| (i * 31 + 7) as u8).collect();
        assert_eq!(crc32(&frame), crc32fast::hash(&frame));
    }

    #[test]
    fn running_value_equals_prefix_crc() {
        let data = b"rmii over pio";
        let mut crc = Crc32::new();
        for (i, &byte) in data.iter().enumerate() {
            crc.push(byte);
            assert_eq!(crc.value(), crc32(&data[..=i]));
        }
    }

    #[test]
    fn appended_fcs_leaves_magic_residue() {
        let payload = b"frame payload";
        let mut frame = Vec::from(&payload[..]);
        frame.extend_from_slice(&fcs_bytes(crc32(payload)));

        // Running a CRC over data plus its own FCS always ends in the 802.3 residue
        assert_eq!(crc32(&frame), 0x2144_DF1C);
    }

    #[test]
    fn fcs_is_little_endian() {
        assert_eq!(fcs_bytes(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
    }
}
