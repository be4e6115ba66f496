//! Hardware Abstraction Layer
//!
//! This module provides the seams between the portable driver logic and
//! the hardware underneath it.
//!
//! # Modules
//!
//! - [`mdio`]: Bit-banged MDIO bus for PHY communication
//! - [`pio`]: PIO/DMA receive and transmit paths
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL, or
//! [`TimerDelay`](crate::rp2040::TimerDelay) from the register backend.

pub mod mdio;
pub mod pio;

// Re-export commonly used types
pub use mdio::{BitBangMdio, MdioBus, MdioDataPin};
pub use pio::{RxAbort, RxPath, TxPath};
