//! PIO Register Definitions
//!
//! Two PIO blocks, four state machines each. The driver never assembles
//! programs itself: the caller loads them and hands over the register image
//! (`CLKDIV`, `EXECCTRL`, `SHIFTCTRL`, `PINCTRL`). What lives here is what
//! the driver needs on top: enable/restart, FIFO addresses for DMA, forced
//! instructions for pin directions and jumps, and DREQ numbers.

use super::{block_reg_wo, clear_bits, read_reg, set_bits, write_reg};

// =============================================================================
// Base Addresses
// =============================================================================

/// PIO0 base address
pub const PIO0_BASE: usize = 0x5020_0000;

/// PIO1 base address
pub const PIO1_BASE: usize = 0x5030_0000;

// =============================================================================
// Register Offsets
// =============================================================================

/// Control register offset
pub const CTRL_OFFSET: usize = 0x000;
/// FIFO debug register offset
pub const FDEBUG_OFFSET: usize = 0x008;
/// TX FIFO of SM0; SMn at `+ 4n`
pub const TXF0_OFFSET: usize = 0x010;
/// RX FIFO of SM0; SMn at `+ 4n`
pub const RXF0_OFFSET: usize = 0x020;

/// SM0 clock divider offset
pub const SM0_CLKDIV_OFFSET: usize = 0x0c8;
/// SM0 execution control offset
pub const SM0_EXECCTRL_OFFSET: usize = 0x0cc;
/// SM0 shift control offset
pub const SM0_SHIFTCTRL_OFFSET: usize = 0x0d0;
/// SM0 forced-instruction offset
pub const SM0_INSTR_OFFSET: usize = 0x0d8;
/// SM0 pin control offset
pub const SM0_PINCTRL_OFFSET: usize = 0x0dc;
/// Distance between consecutive state machine register sets
pub const SM_STRIDE: usize = 0x18;

// =============================================================================
// CTRL Bits
// =============================================================================

/// SM_ENABLE field shift (one bit per state machine)
pub const CTRL_SM_ENABLE_SHIFT: u32 = 0;
/// SM_RESTART field shift (self-clearing)
pub const CTRL_SM_RESTART_SHIFT: u32 = 4;
/// CLKDIV_RESTART field shift (self-clearing)
pub const CTRL_CLKDIV_RESTART_SHIFT: u32 = 8;

// =============================================================================
// FDEBUG Bits
// =============================================================================

/// TX FIFO stall flag shift (write 1 to clear)
pub const FDEBUG_TXSTALL_SHIFT: u32 = 24;
/// TX FIFO overflow flag shift
pub const FDEBUG_TXOVER_SHIFT: u32 = 16;
/// RX FIFO underflow flag shift
pub const FDEBUG_RXUNDER_SHIFT: u32 = 8;
/// RX FIFO stall flag shift
pub const FDEBUG_RXSTALL_SHIFT: u32 = 0;

// =============================================================================
// SHIFTCTRL / PINCTRL Fields
// =============================================================================

/// Join the TX FIFO into the RX FIFO
pub const SHIFTCTRL_FJOIN_RX: u32 = 1 << 31;

/// SET_BASE field shift
pub const PINCTRL_SET_BASE_SHIFT: u32 = 5;
/// SET_BASE field mask
pub const PINCTRL_SET_BASE_MASK: u32 = 0x1F << 5;
/// SET_COUNT field shift
pub const PINCTRL_SET_COUNT_SHIFT: u32 = 26;
/// SET_COUNT field mask
pub const PINCTRL_SET_COUNT_MASK: u32 = 0x7 << 26;

// =============================================================================
// Instruction Encodings
// =============================================================================

/// `jmp <addr>` (unconditional)
#[inline(always)]
pub const fn instr_jmp(addr: u8) -> u16 {
    (addr & 0x1F) as u16
}

/// `set pins, <value>`
#[inline(always)]
pub const fn instr_set_pins(value: u8) -> u16 {
    0xE000 | (value & 0x1F) as u16
}

/// `set pindirs, <mask>`
#[inline(always)]
pub const fn instr_set_pindirs(mask: u8) -> u16 {
    0xE080 | (mask & 0x1F) as u16
}

/// PINCTRL with the SET group pointed at `base..base + count`
#[inline(always)]
pub const fn pinctrl_with_set_pins(pinctrl: u32, base: u8, count: u8) -> u32 {
    (pinctrl & !(PINCTRL_SET_BASE_MASK | PINCTRL_SET_COUNT_MASK))
        | (((base as u32) << PINCTRL_SET_BASE_SHIFT) & PINCTRL_SET_BASE_MASK)
        | (((count as u32) << PINCTRL_SET_COUNT_SHIFT) & PINCTRL_SET_COUNT_MASK)
}

// =============================================================================
// DREQ
// =============================================================================

/// DMA request line for a state machine FIFO.
///
/// PIO0 TX0-3 are DREQ 0-3, PIO0 RX0-3 are 4-7, PIO1 follows at 8.
#[inline(always)]
pub const fn dreq(pio: u8, sm: u8, is_tx: bool) -> u8 {
    pio * 8 + if is_tx { 0 } else { 4 } + sm
}

// =============================================================================
// PIO Block Handle
// =============================================================================

/// Register handle for one PIO block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PioRegs {
    base: usize,
}

impl PioRegs {
    /// Handle for PIO block `index` (0 or 1)
    #[inline(always)]
    pub const fn new(index: u8) -> Self {
        Self {
            base: if index == 0 { PIO0_BASE } else { PIO1_BASE },
        }
    }

    #[inline(always)]
    const fn addr(&self, offset: usize) -> usize {
        self.base + offset
    }

    #[inline(always)]
    const fn sm_addr(&self, sm: u8, sm0_offset: usize) -> usize {
        self.base + sm0_offset + sm as usize * SM_STRIDE
    }

    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    block_reg_wo!(set_fdebug, FDEBUG_OFFSET, "FDEBUG register (write 1 to clear)");

    // -------------------------------------------------------------------------
    // FIFO addresses
    // -------------------------------------------------------------------------

    /// Address of the TX FIFO of `sm`
    #[inline(always)]
    pub const fn txf_addr(&self, sm: u8) -> usize {
        self.base + TXF0_OFFSET + 4 * sm as usize
    }

    /// Address of the RX FIFO of `sm`
    #[inline(always)]
    pub const fn rxf_addr(&self, sm: u8) -> usize {
        self.base + RXF0_OFFSET + 4 * sm as usize
    }

    // -------------------------------------------------------------------------
    // State machine control
    // -------------------------------------------------------------------------

    /// Enable or disable a state machine.
    ///
    /// Goes through the atomic aliases, so it is safe to call from an
    /// interrupt while the poll loop touches other state machines.
    #[inline(always)]
    pub fn set_sm_enabled(&self, sm: u8, enabled: bool) {
        let bit = 1 << (CTRL_SM_ENABLE_SHIFT + sm as u32);
        unsafe {
            if enabled {
                set_bits(self.addr(CTRL_OFFSET), bit);
            } else {
                clear_bits(self.addr(CTRL_OFFSET), bit);
            }
        }
    }

    /// Reset a state machine's internal state and clock divider phase
    #[inline(always)]
    pub fn restart_sm(&self, sm: u8) {
        let bits =
            (1 << (CTRL_SM_RESTART_SHIFT + sm as u32)) | (1 << (CTRL_CLKDIV_RESTART_SHIFT + sm as u32));
        unsafe { set_bits(self.addr(CTRL_OFFSET), bits) }
    }

    /// Load the configuration registers of a state machine
    pub fn configure_sm(&self, sm: u8, clkdiv: u32, execctrl: u32, shiftctrl: u32, pinctrl: u32) {
        unsafe {
            write_reg(self.sm_addr(sm, SM0_CLKDIV_OFFSET), clkdiv);
            write_reg(self.sm_addr(sm, SM0_EXECCTRL_OFFSET), execctrl);
            write_reg(self.sm_addr(sm, SM0_SHIFTCTRL_OFFSET), shiftctrl);
            write_reg(self.sm_addr(sm, SM0_PINCTRL_OFFSET), pinctrl);
        }
    }

    /// Empty both FIFOs of a state machine.
    ///
    /// Toggling a join bit flushes the FIFOs; toggling it twice restores
    /// the configured join mode.
    pub fn clear_fifos(&self, sm: u8) {
        let addr = self.sm_addr(sm, SM0_SHIFTCTRL_OFFSET);
        unsafe {
            let shiftctrl = read_reg(addr);
            write_reg(addr, shiftctrl ^ SHIFTCTRL_FJOIN_RX);
            write_reg(addr, shiftctrl);
        }
    }

    /// Clear the sticky FIFO debug flags of a state machine
    pub fn clear_debug_flags(&self, sm: u8) {
        let bit = 1u32 << sm;
        self.set_fdebug(
            (bit << FDEBUG_TXSTALL_SHIFT)
                | (bit << FDEBUG_TXOVER_SHIFT)
                | (bit << FDEBUG_RXUNDER_SHIFT)
                | (bit << FDEBUG_RXSTALL_SHIFT),
        );
    }

    /// Execute one instruction immediately on a state machine
    #[inline(always)]
    pub fn exec(&self, sm: u8, instr: u16) {
        unsafe { write_reg(self.sm_addr(sm, SM0_INSTR_OFFSET), instr as u32) }
    }

    /// Set the direction of `count` consecutive pins starting at `base`.
    ///
    /// Temporarily retargets the SET pin group, forces `set pindirs` and
    /// restores PINCTRL. The state machine should be disabled.
    pub fn set_consecutive_pindirs(&self, sm: u8, base: u8, count: u8, output: bool) {
        let addr = self.sm_addr(sm, SM0_PINCTRL_OFFSET);
        let mask = if output { (1u8 << count) - 1 } else { 0 };
        unsafe {
            let saved = read_reg(addr);
            write_reg(addr, pinctrl_with_set_pins(saved, base, count));
            self.exec(sm, instr_set_pindirs(mask));
            write_reg(addr, saved);
        }
    }

    /// Drive `count` consecutive pins starting at `base` low
    pub fn clear_consecutive_pins(&self, sm: u8, base: u8, count: u8) {
        let addr = self.sm_addr(sm, SM0_PINCTRL_OFFSET);
        unsafe {
            let saved = read_reg(addr);
            write_reg(addr, pinctrl_with_set_pins(saved, base, count));
            self.exec(sm, instr_set_pins(0));
            write_reg(addr, saved);
        }
    }
}
