//! Busy-wait delay on the microsecond timer

use embedded_hal::delay::DelayNs;

use crate::internal::register::timer::TimerRegs;

/// Delay provider spinning on the RP2040 1 MHz timer.
///
/// Resolution is one microsecond; nanosecond requests round up. The timer
/// must be running (it is after the standard clock setup).
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerDelay;

impl TimerDelay {
    /// Create a delay provider
    pub const fn new() -> Self {
        Self
    }

    fn spin_us(us: u32) {
        let start = TimerRegs::timerawl();
        // Wrapping subtraction keeps this correct across the 32-bit rollover
        while TimerRegs::timerawl().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }
}

/// Microseconds needed to cover `ns`, rounded up
pub(crate) const fn ns_to_us(ns: u32) -> u32 {
    ns.div_ceil(1_000)
}

impl DelayNs for TimerDelay {
    fn delay_ns(&mut self, ns: u32) {
        Self::spin_us(ns_to_us(ns));
    }

    fn delay_us(&mut self, us: u32) {
        Self::spin_us(us);
    }
}
