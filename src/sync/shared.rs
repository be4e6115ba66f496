//! ISR-safe wrappers using critical sections.
//!
//! Provides [`SharedStack`] for an IP stack used by both the poll loop and
//! the application, and [`SharedCarrierHandler`] as the static slot the GPIO
//! interrupt reaches the carrier-loss handler through. Only the stack sits
//! behind the critical section; the interrupt path is lock-free.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::primitives::CriticalSectionCell;
use crate::driver::interrupt::CarrierLossHandler;
use crate::hal::pio::RxAbort;
use crate::netif::{NetStack, Rejected};

// =============================================================================
// Shared Stack
// =============================================================================

/// Network stack behind a critical-section lock.
///
/// Every [`NetStack`] call made by the poll loop runs with interrupts
/// disabled, so application code taking the same lock never observes the
/// stack halfway through a frame.
///
/// # Example
///
/// ```ignore
/// static STACK: SharedStack<MyStack> = SharedStack::new(MyStack::new());
///
/// poller.poll(&mut &STACK);
///
/// STACK.with(|stack| stack.send_udp(...));
/// ```
pub struct SharedStack<S> {
    inner: CriticalSectionCell<S>,
}

impl<S> SharedStack<S> {
    /// Wrap a stack (const, suitable for static initialization).
    pub const fn new(stack: S) -> Self {
        Self {
            inner: CriticalSectionCell::new(stack),
        }
    }

    /// Execute a closure with exclusive access to the stack.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut S) -> R,
    {
        self.inner.try_with(f)
    }
}

impl<S: Default> Default for SharedStack<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: NetStack> NetStack for &SharedStack<S> {
    fn input(&mut self, frame: &[u8]) -> Result<(), Rejected> {
        self.inner.with(|stack| stack.input(frame))
    }

    fn link_changed(&mut self, up: bool) {
        self.inner.with(|stack| stack.link_changed(up));
    }

    fn service_timeouts(&mut self) {
        self.inner.with(|stack| stack.service_timeouts());
    }
}

// =============================================================================
// Shared Carrier Handler
// =============================================================================

/// Static slot for the carrier-loss handler.
///
/// Filled once by [`install`](Self::install); interrupts arriving before
/// that are ignored. The interrupt path uses only atomic loads and stores
/// (no compare-and-swap, which the Cortex-M0+ lacks) and never enters a
/// critical section, so it cannot wait on the poller holding
/// [`SharedStack`], even from the other core.
///
/// The abort handle is `Copy`: each interrupt works on its own copy of the
/// register handle, so concurrent invocations never alias.
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
pub struct SharedCarrierHandler<A: RxAbort + Copy> {
    slot: UnsafeCell<MaybeUninit<A>>,
    ready: AtomicBool,
    events: AtomicU32,
}

// SAFETY: the slot is written once, under a critical section, before
// `ready` is published with Release ordering; afterwards it is only read.
unsafe impl<A: RxAbort + Copy + Send> Sync for SharedCarrierHandler<A> {}

impl<A: RxAbort + Copy> SharedCarrierHandler<A> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            slot: UnsafeCell::new(MaybeUninit::uninit()),
            ready: AtomicBool::new(false),
            events: AtomicU32::new(0),
        }
    }

    /// Install the handler.
    ///
    /// Install before enabling `IO_IRQ_BANK0` in the NVIC.
    ///
    /// # Errors
    /// Hands the handler back if one is already installed.
    pub fn install(&self, handler: CarrierLossHandler<A>) -> Result<(), CarrierLossHandler<A>> {
        critical_section::with(|_| {
            if self.ready.load(Ordering::Acquire) {
                return Err(handler);
            }
            self.events.store(handler.events(), Ordering::Relaxed);
            // SAFETY: `ready` is false and installers are serialized by the
            // critical section, so nothing else reads or writes the slot.
            unsafe { (*self.slot.get()).write(handler.into_inner()) };
            self.ready.store(true, Ordering::Release);
            Ok(())
        })
    }

    /// Whether a handler is installed
    pub fn is_installed(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Forward a GPIO bank interrupt.
    ///
    /// Returns `true` if a capture was stopped.
    pub fn on_interrupt(&self) -> bool {
        let Some(abort) = self.abort() else {
            return false;
        };
        let stopped = CarrierLossHandler::new(abort).on_interrupt();
        if stopped {
            self.count_event();
        }
        stopped
    }

    /// Stop the capture without checking the interrupt source
    pub fn on_falling_edge(&self) {
        if let Some(abort) = self.abort() {
            CarrierLossHandler::new(abort).on_falling_edge();
            self.count_event();
        }
    }

    /// Number of captures stopped so far, zero when nothing is installed
    pub fn events(&self) -> u32 {
        self.events.load(Ordering::Relaxed)
    }

    #[inline(always)]
    fn abort(&self) -> Option<A> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }
        // SAFETY: `ready` is only set after the slot was initialized, and
        // the slot is never written again.
        Some(unsafe { (*self.slot.get()).assume_init_read() })
    }

    // Load/store only; a lost increment between cores only skews the count
    #[inline(always)]
    fn count_event(&self) {
        let events = self.events.load(Ordering::Relaxed);
        self.events.store(events.wrapping_add(1), Ordering::Relaxed);
    }
}

impl<A: RxAbort + Copy> Default for SharedCarrierHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
