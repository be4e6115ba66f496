//! TIMER Register Definitions
//!
//! The free-running 1 MHz microsecond counter.

use super::reg_ro;

/// TIMER base address
pub const TIMER_BASE: usize = 0x4005_4000;

/// Raw low word of the microsecond counter (no latching)
pub const TIMERAWL_OFFSET: usize = 0x28;

/// TIMER registers
pub struct TimerRegs;

impl TimerRegs {
    reg_ro!(timerawl, TIMER_BASE, TIMERAWL_OFFSET, "raw low 32 bits of the microsecond counter");
}
