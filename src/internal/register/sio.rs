//! SIO GPIO Register Definitions
//!
//! The single-cycle IO block drives pins selected for `FUNCSEL_SIO`. Each
//! operation has its own set/clear register, so no read-modify-write is
//! ever needed. SIO has no atomic aliases.

use super::{reg_ro, reg_wo};

// =============================================================================
// Base Address and Offsets
// =============================================================================

/// SIO base address
pub const SIO_BASE: usize = 0xD000_0000;

/// Processor core identifier offset (0 or 1, depending on the reader)
pub const CPUID_OFFSET: usize = 0x000;
/// GPIO input levels offset
pub const GPIO_IN_OFFSET: usize = 0x004;
/// GPIO output set offset
pub const GPIO_OUT_SET_OFFSET: usize = 0x014;
/// GPIO output clear offset
pub const GPIO_OUT_CLR_OFFSET: usize = 0x018;
/// GPIO output enable set offset
pub const GPIO_OE_SET_OFFSET: usize = 0x024;
/// GPIO output enable clear offset
pub const GPIO_OE_CLR_OFFSET: usize = 0x028;

// =============================================================================
// Register Access
// =============================================================================

/// SIO GPIO registers
pub struct SioRegs;

impl SioRegs {
    reg_ro!(cpuid, SIO_BASE, CPUID_OFFSET, "the core number of the caller");
    reg_ro!(gpio_in, SIO_BASE, GPIO_IN_OFFSET, "GPIO input levels");
    reg_wo!(set_gpio_out, SIO_BASE, GPIO_OUT_SET_OFFSET, "GPIO output set mask");
    reg_wo!(clear_gpio_out, SIO_BASE, GPIO_OUT_CLR_OFFSET, "GPIO output clear mask");
    reg_wo!(set_gpio_oe, SIO_BASE, GPIO_OE_SET_OFFSET, "GPIO output enable set mask");
    reg_wo!(clear_gpio_oe, SIO_BASE, GPIO_OE_CLR_OFFSET, "GPIO output enable clear mask");

    /// Core executing this code
    #[inline(always)]
    pub fn current_core() -> u8 {
        (Self::cpuid() & 1) as u8
    }
}
