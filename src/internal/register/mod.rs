//! Memory-mapped register definitions for the RP2040 blocks the driver uses
//!
//! This module provides thin accessors over the PIO, DMA, SIO, IO_BANK0,
//! PADS_BANK0 and TIMER registers. All register access is volatile.
//!
//! Fixed blocks (SIO, TIMER, the GPIO banks) are unit structs with
//! associated functions. Blocks that exist per instance (PIO0/1, DMA
//! channels) are small `Copy` handles carrying their base address.

pub mod dma;
pub mod io_bank0;
pub mod pads;
pub mod pio;
pub mod sio;
pub mod timer;

// =============================================================================
// Atomic Register Aliases
// =============================================================================

/// Offset of the atomic bitmask-set alias of a peripheral register
pub const ALIAS_SET: usize = 0x2000;

/// Offset of the atomic bitmask-clear alias
pub const ALIAS_CLR: usize = 0x3000;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Set bits through the atomic set alias (no read-modify-write)
///
/// Safe against concurrent writers in interrupt context.
///
/// # Safety
/// The caller must ensure the address is a peripheral register with aliases.
#[inline(always)]
pub unsafe fn set_bits(addr: usize, bits: u32) {
    unsafe { write_reg(addr + ALIAS_SET, bits) }
}

/// Clear bits through the atomic clear alias (no read-modify-write)
///
/// # Safety
/// The caller must ensure the address is a peripheral register with aliases.
#[inline(always)]
pub unsafe fn clear_bits(addr: usize, bits: u32) {
    unsafe { write_reg(addr + ALIAS_CLR, bits) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor functions for a register of a fixed block.
///
/// # Example
/// ```ignore
/// impl DmaRegs {
///     reg_rw!(chan_abort, set_chan_abort, DMA_BASE, CHAN_ABORT_OFFSET, "channel abort");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn() -> u32 {
            unsafe { $crate::internal::register::read_reg($base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(value: u32) {
            unsafe { $crate::internal::register::write_reg($base + $offset, value) }
        }
    };
}

/// Generate a read-only accessor function for a register of a fixed block.
macro_rules! reg_ro {
    ($read_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn() -> u32 {
            unsafe { $crate::internal::register::read_reg($base + $offset) }
        }
    };
}

/// Generate a write-only accessor function for a register of a fixed block.
macro_rules! reg_wo {
    ($write_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(value: u32) {
            unsafe { $crate::internal::register::write_reg($base + $offset, value) }
        }
    };
}

/// Generate read/write accessor methods for a register of an instance block.
///
/// The handle must provide `fn addr(&self, offset: usize) -> usize`.
///
/// # Example
/// ```ignore
/// impl DmaChannel {
///     block_reg_rw!(ctrl, set_ctrl_trig, CH_CTRL_TRIG_OFFSET, "control register");
/// }
/// ```
macro_rules! block_reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(self.addr($offset)) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(self.addr($offset), value) }
        }
    };
}

/// Generate a write-only accessor method for a register of an instance block.
///
/// The handle must provide `fn addr(&self, offset: usize) -> usize`.
macro_rules! block_reg_wo {
    ($write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(self.addr($offset), value) }
        }
    };
}

// Export macros for use in submodules
pub(crate) use block_reg_rw;
pub(crate) use block_reg_wo;
pub(crate) use reg_ro;
pub(crate) use reg_rw;
pub(crate) use reg_wo;
