//! Synchronization Support
//!
//! Wrappers for state shared between the poll loop, the application and the
//! GPIO interrupt. The stack sits behind a critical section; the interrupt
//! slot is lock-free so the interrupt never waits on the stack:
//!
//! - **Primitives** (`primitives`)
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!
//! - **Shared Wrappers** (`shared`)
//!   - [`SharedStack`] - Network stack behind a lock, usable as a [`NetStack`](crate::NetStack)
//!   - [`SharedCarrierHandler`] - Lock-free static slot for the carrier-loss handler
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::sync::{SharedCarrierHandler, SharedStack};
//!
//! static STACK: SharedStack<MyStack> = SharedStack::new(MyStack::new());
//! static HANDLER: SharedCarrierHandler<CarrierAbort> = SharedCarrierHandler::new();
//!
//! fn main() -> ! {
//!     let mut eth = RmiiEthernet::init(config, parts, buffers).unwrap();
//!     HANDLER.install(eth.carrier_loss_handler()).ok();
//!     eth.run_forever(&mut &STACK)
//! }
//!
//! #[interrupt]
//! fn IO_IRQ_BANK0() {
//!     HANDLER.on_interrupt();
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::{SharedCarrierHandler, SharedStack};
