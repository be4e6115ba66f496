//! DMA Controller Register Definitions
//!
//! Twelve independent channels. The driver uses two of them in the simplest
//! mode: byte transfers paced by a PIO DREQ, one side incrementing and the
//! other pinned to a FIFO byte lane.

use super::{block_reg_rw, block_reg_wo, reg_rw};

// =============================================================================
// Base Address and Layout
// =============================================================================

/// DMA block base address
pub const DMA_BASE: usize = 0x5000_0000;

/// Distance between consecutive channel register sets
pub const CHANNEL_STRIDE: usize = 0x40;

/// Number of channels
pub const CHANNEL_COUNT: u8 = 12;

// =============================================================================
// Channel Register Offsets
// =============================================================================

/// Read address register offset
pub const CH_READ_ADDR_OFFSET: usize = 0x00;
/// Write address register offset
pub const CH_WRITE_ADDR_OFFSET: usize = 0x04;
/// Transfer count register offset
pub const CH_TRANS_COUNT_OFFSET: usize = 0x08;
/// Control register offset (writing it starts the channel)
pub const CH_CTRL_TRIG_OFFSET: usize = 0x0C;

/// Channel abort register offset (one bit per channel)
pub const CHAN_ABORT_OFFSET: usize = 0x444;

// =============================================================================
// CTRL Bits
// =============================================================================

/// Channel enable
pub const CTRL_EN: u32 = 1 << 0;
/// Transfer size shift (0 = byte, 1 = halfword, 2 = word)
pub const CTRL_DATA_SIZE_SHIFT: u32 = 2;
/// Increment the read address after each transfer
pub const CTRL_INCR_READ: u32 = 1 << 4;
/// Increment the write address after each transfer
pub const CTRL_INCR_WRITE: u32 = 1 << 5;
/// CHAIN_TO field shift; chaining to itself disables chaining
pub const CTRL_CHAIN_TO_SHIFT: u32 = 11;
/// TREQ_SEL field shift
pub const CTRL_TREQ_SEL_SHIFT: u32 = 15;
/// Channel busy flag (read-only)
pub const CTRL_BUSY: u32 = 1 << 24;

/// Byte transfer size
pub const DATA_SIZE_BYTE: u32 = 0;

/// Byte offset of the most significant byte lane in a FIFO word
///
/// The PIO programs shift bytes in and out at the top of the word, so both
/// DMA channels target the FIFO address plus 3.
pub const FIFO_MSB_LANE: usize = 3;

/// CTRL value for a byte-wide DREQ-paced channel.
#[inline(always)]
pub const fn channel_ctrl(channel: u8, treq: u8, incr_read: bool, incr_write: bool) -> u32 {
    let mut value = CTRL_EN
        | (DATA_SIZE_BYTE << CTRL_DATA_SIZE_SHIFT)
        | (((channel & 0x0F) as u32) << CTRL_CHAIN_TO_SHIFT)
        | (((treq & 0x3F) as u32) << CTRL_TREQ_SEL_SHIFT);
    if incr_read {
        value |= CTRL_INCR_READ;
    }
    if incr_write {
        value |= CTRL_INCR_WRITE;
    }
    value
}

// =============================================================================
// Shared Registers
// =============================================================================

/// Registers shared by all channels
pub struct DmaRegs;

impl DmaRegs {
    reg_rw!(chan_abort, set_chan_abort, DMA_BASE, CHAN_ABORT_OFFSET, "channel abort register");
}

// =============================================================================
// Channel Handle
// =============================================================================

/// Register handle for one DMA channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaChannel {
    index: u8,
}

impl DmaChannel {
    /// Handle for channel `index` (0-11)
    #[inline(always)]
    pub const fn new(index: u8) -> Self {
        Self { index }
    }

    /// Channel number
    #[inline(always)]
    pub const fn index(&self) -> u8 {
        self.index
    }

    #[inline(always)]
    const fn addr(&self, offset: usize) -> usize {
        DMA_BASE + self.index as usize * CHANNEL_STRIDE + offset
    }

    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    block_reg_wo!(set_read_addr, CH_READ_ADDR_OFFSET, "read address");
    block_reg_wo!(set_write_addr, CH_WRITE_ADDR_OFFSET, "write address");
    block_reg_wo!(set_trans_count, CH_TRANS_COUNT_OFFSET, "transfer count");
    block_reg_rw!(ctrl, set_ctrl_trig, CH_CTRL_TRIG_OFFSET, "control register (write triggers)");

    // -------------------------------------------------------------------------
    // Special operations
    // -------------------------------------------------------------------------

    /// Check whether the channel is still transferring
    #[inline(always)]
    pub fn is_busy(&self) -> bool {
        self.ctrl() & CTRL_BUSY != 0
    }

    /// Program and start a transfer
    #[inline(always)]
    pub fn start(&self, read: usize, write: usize, count: usize, ctrl: u32) {
        self.set_read_addr(read as u32);
        self.set_write_addr(write as u32);
        self.set_trans_count(count as u32);
        self.set_ctrl_trig(ctrl);
    }

    /// Abort the transfer and wait until the channel is idle.
    ///
    /// Short and bounded: the abort completes once in-flight bus transfers
    /// have drained.
    pub fn abort(&self) {
        let bit = 1u32 << self.index;
        DmaRegs::set_chan_abort(bit);
        while DmaRegs::chan_abort() & bit != 0 {
            core::hint::spin_loop();
        }
    }
}
