//! PADS_BANK0 Register Definitions
//!
//! Electrical pad control. The driver only makes sure inputs are enabled
//! and outputs are not disabled on the pins it claims.

use super::{clear_bits, set_bits};

/// PADS_BANK0 base address
pub const PADS_BANK0_BASE: usize = 0x4001_C000;

/// GPIO0 pad offset; GPIOn at `+ 4n`
pub const GPIO0_OFFSET: usize = 0x04;

/// Output disable
pub const PAD_OD: u32 = 1 << 7;
/// Input enable
pub const PAD_IE: u32 = 1 << 6;

/// PADS_BANK0 registers
pub struct PadsBank0;

impl PadsBank0 {
    /// Enable the input buffer and the output driver of `pin`
    #[inline(always)]
    pub fn enable_pin(pin: u8) {
        let addr = PADS_BANK0_BASE + GPIO0_OFFSET + 4 * pin as usize;
        unsafe {
            set_bits(addr, PAD_IE);
            clear_bits(addr, PAD_OD);
        }
    }
}
