//! PIO data paths
//!
//! The receive and transmit sides each pair one PIO state machine with one
//! DMA channel. The driver only needs to start transfers, ask whether they
//! are still running, and re-arm the receiver, so those are the seams:
//!
//! - [`TxPath`]: symbol buffer → TX FIFO
//! - [`RxPath`]: RX FIFO → capture window, plus receiver restart and the
//!   carrier-loss interrupt
//! - [`RxAbort`]: the subset of [`RxPath`] an interrupt handler may touch
//!
//! The RP2040 implementations live in [`crate::rp2040`]; tests use mocks.
//!
//! # Safety
//!
//! `start` hands a raw buffer to hardware that keeps writing (or reading) it
//! after the call returns. Callers must keep the buffer alive and must not
//! touch it until `is_busy` reports `false` or the transfer is aborted.

/// Transmit DMA channel feeding the PIO transmitter
pub trait TxPath {
    /// Whether the last transfer is still running
    fn is_busy(&self) -> bool;

    /// Start streaming `len` symbols from `symbols` into the transmitter.
    ///
    /// Returns immediately.
    ///
    /// # Safety
    ///
    /// The buffer must stay valid and unmodified until `is_busy` returns
    /// `false`, and no other transfer may be running.
    unsafe fn start(&mut self, symbols: *const u8, len: usize);
}

/// Interrupt-safe receive controls
///
/// Every method must be callable from interrupt context: no blocking, no
/// locks, register writes only.
pub trait RxAbort {
    /// Stop the receive state machine
    fn disable_receiver(&mut self);

    /// Abort the running capture; the channel reports idle afterwards
    fn abort_capture(&mut self);

    /// Disable the carrier falling-edge interrupt
    fn disarm_carrier_irq(&mut self);

    /// Acknowledge a pending carrier falling edge.
    ///
    /// Returns `false` when the interrupt came from something else.
    fn take_carrier_edge(&mut self) -> bool;
}

/// Receive DMA channel fed by the PIO receiver
pub trait RxPath {
    /// Handle given to the carrier-loss interrupt
    type Abort: RxAbort;

    /// Whether the capture is still running
    fn is_busy(&self) -> bool;

    /// Start capturing `len` bytes into `window`.
    ///
    /// # Safety
    ///
    /// The window must stay valid and must not be read or written until
    /// `is_busy` returns `false`.
    unsafe fn start(&mut self, window: *mut u8, len: usize);

    /// Reset the receive program to its entry point and enable it
    fn restart_receiver(&mut self);

    /// Acknowledge any stale edge and enable the carrier falling-edge
    /// interrupt
    fn arm_carrier_irq(&mut self);

    /// Create the restricted handle for the interrupt handler
    fn abort_handle(&self) -> Self::Abort;
}
