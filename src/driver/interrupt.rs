//! Carrier-loss interrupt handling.
//!
//! When CRS_DV falls the frame on the wire is over. The receive program
//! cannot signal that by itself, so a GPIO falling-edge interrupt stops the
//! receive state machine and aborts the RX DMA. The next poll then sees an
//! idle channel, scans what was captured and re-arms everything.
//!
//! The handler only holds an [`RxAbort`] capability: it never blocks and
//! never touches the network stack.

use crate::hal::pio::RxAbort;

// =============================================================================
// Carrier Loss Handler
// =============================================================================

/// Interrupt-side half of the receive path.
///
/// # Example
///
/// ```ignore
/// static HANDLER: SharedCarrierHandler<CarrierAbort> = SharedCarrierHandler::new();
///
/// HANDLER.install(poller.carrier_loss_handler()).ok();
///
/// #[interrupt]
/// fn IO_IRQ_BANK0() {
///     HANDLER.on_interrupt();
/// }
/// ```
#[derive(Debug)]
pub struct CarrierLossHandler<A: RxAbort> {
    abort: A,
    events: u32,
}

impl<A: RxAbort> CarrierLossHandler<A> {
    /// Wrap an abort capability
    pub const fn new(abort: A) -> Self {
        Self { abort, events: 0 }
    }

    /// Entry point for the GPIO bank interrupt.
    ///
    /// Returns `true` if the interrupt was a carrier edge and the capture
    /// was stopped. Other GPIO interrupts on the same bank are left alone.
    pub fn on_interrupt(&mut self) -> bool {
        if !self.abort.take_carrier_edge() {
            return false;
        }
        self.on_falling_edge();
        true
    }

    /// Stop the capture unconditionally.
    ///
    /// Disables the receive state machine, aborts the RX DMA and disarms
    /// the interrupt; the poller re-arms it together with the next capture.
    pub fn on_falling_edge(&mut self) {
        self.abort.disable_receiver();
        self.abort.abort_capture();
        self.abort.disarm_carrier_irq();
        self.events = self.events.wrapping_add(1);
    }

    /// Number of captures stopped by a carrier edge
    pub const fn events(&self) -> u32 {
        self.events
    }

    /// Give back the abort capability
    pub fn into_inner(self) -> A {
        self.abort
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
