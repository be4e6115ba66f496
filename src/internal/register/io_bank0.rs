//! IO_BANK0 Register Definitions
//!
//! Per-pin function select and the GPIO interrupt matrix. Interrupt state is
//! packed four bits per pin (LEVEL_LOW, LEVEL_HIGH, EDGE_LOW, EDGE_HIGH),
//! eight pins per register. Each core has its own enable and status
//! registers; the raw latch is shared.

use super::{clear_bits, read_reg, set_bits, write_reg};

// =============================================================================
// Base Address and Offsets
// =============================================================================

/// IO_BANK0 base address
pub const IO_BANK0_BASE: usize = 0x4001_4000;

/// GPIO0_CTRL offset; GPIOn_CTRL at `+ 8n`
pub const GPIO0_CTRL_OFFSET: usize = 0x004;
/// Raw interrupt register for GPIO0-7 (write 1 to clear edges)
pub const INTR0_OFFSET: usize = 0x0f0;
/// Processor 0 interrupt enable for GPIO0-7
pub const PROC0_INTE0_OFFSET: usize = 0x100;
/// Processor 0 interrupt status (masked) for GPIO0-7
pub const PROC0_INTS0_OFFSET: usize = 0x120;
/// Distance from the processor 0 interrupt registers to processor 1's
pub const PROC_IRQ_STRIDE: usize = 0x30;

// =============================================================================
// Field Values
// =============================================================================

/// FUNCSEL field mask in GPIOn_CTRL
pub const CTRL_FUNCSEL_MASK: u32 = 0x1F;

/// Pin driven by SIO
pub const FUNCSEL_SIO: u32 = 5;
/// Pin driven by PIO0
pub const FUNCSEL_PIO0: u32 = 6;
/// Pin driven by PIO1
pub const FUNCSEL_PIO1: u32 = 7;

/// EDGE_LOW bit within a pin's interrupt nibble
pub const EVENT_EDGE_LOW: u32 = 1 << 2;

/// Offset of the interrupt register holding `pin`, relative to the first
#[inline(always)]
pub const fn irq_reg_offset(pin: u8) -> usize {
    4 * (pin as usize / 8)
}

/// Offset of `core`'s interrupt enable register holding `pin`
#[inline(always)]
pub const fn inte_offset(core: u8, pin: u8) -> usize {
    PROC0_INTE0_OFFSET + (core as usize & 1) * PROC_IRQ_STRIDE + irq_reg_offset(pin)
}

/// Offset of `core`'s masked interrupt status register holding `pin`
#[inline(always)]
pub const fn ints_offset(core: u8, pin: u8) -> usize {
    PROC0_INTS0_OFFSET + (core as usize & 1) * PROC_IRQ_STRIDE + irq_reg_offset(pin)
}

/// Falling-edge bit for `pin` within its interrupt register
#[inline(always)]
pub const fn edge_low_bit(pin: u8) -> u32 {
    EVENT_EDGE_LOW << (4 * (pin as u32 % 8))
}

/// FUNCSEL value routing a pin to PIO block `pio`
#[inline(always)]
pub const fn funcsel_pio(pio: u8) -> u32 {
    if pio == 0 { FUNCSEL_PIO0 } else { FUNCSEL_PIO1 }
}

// =============================================================================
// Register Access
// =============================================================================

/// IO_BANK0 registers
pub struct IoBank0;

impl IoBank0 {
    /// Route `pin` to a peripheral function.
    ///
    /// Clears all output/input overrides along the way.
    #[inline(always)]
    pub fn set_function(pin: u8, funcsel: u32) {
        let addr = IO_BANK0_BASE + GPIO0_CTRL_OFFSET + 8 * pin as usize;
        unsafe { write_reg(addr, funcsel & CTRL_FUNCSEL_MASK) }
    }

    /// Enable the falling-edge interrupt for `pin` on `core`
    #[inline(always)]
    pub fn enable_edge_low(core: u8, pin: u8) {
        let addr = IO_BANK0_BASE + inte_offset(core, pin);
        unsafe { set_bits(addr, edge_low_bit(pin)) }
    }

    /// Disable the falling-edge interrupt for `pin` on `core`
    #[inline(always)]
    pub fn disable_edge_low(core: u8, pin: u8) {
        let addr = IO_BANK0_BASE + inte_offset(core, pin);
        unsafe { clear_bits(addr, edge_low_bit(pin)) }
    }

    /// Check whether a falling edge on `pin` is pending and enabled for `core`
    #[inline(always)]
    pub fn is_edge_low_pending(core: u8, pin: u8) -> bool {
        let addr = IO_BANK0_BASE + ints_offset(core, pin);
        unsafe { read_reg(addr) & edge_low_bit(pin) != 0 }
    }

    /// Clear a latched falling edge on `pin`
    #[inline(always)]
    pub fn ack_edge_low(pin: u8) {
        let addr = IO_BANK0_BASE + INTR0_OFFSET + irq_reg_offset(pin);
        unsafe { write_reg(addr, edge_low_bit(pin)) }
    }
}
