//! Network stack interface
//!
//! The driver pushes received frames and link changes into whatever IP stack
//! sits above it through [`NetStack`]. Transmission goes the other way, with
//! the stack calling [`RmiiTx::transmit`](crate::RmiiTx::transmit).

/// The stack refused a received frame (out of buffers, slot full, ...).
///
/// The driver counts and drops the frame; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rejected;

impl core::fmt::Display for Rejected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("frame rejected by network stack")
    }
}

/// Receiving side of an IP stack
pub trait NetStack {
    /// Hand over one received frame, without its FCS.
    ///
    /// The slice is only valid for the duration of the call; the driver
    /// reuses the receive window right after.
    fn input(&mut self, frame: &[u8]) -> Result<(), Rejected>;

    /// The PHY link went up or down
    fn link_changed(&mut self, up: bool);

    /// Called once per poll iteration so the stack can run its timers
    fn service_timeouts(&mut self) {}
}

impl<S: NetStack + ?Sized> NetStack for &mut S {
    fn input(&mut self, frame: &[u8]) -> Result<(), Rejected> {
        (**self).input(frame)
    }

    fn link_changed(&mut self, up: bool) {
        (**self).link_changed(up);
    }

    fn service_timeouts(&mut self) {
        (**self).service_timeouts();
    }
}
