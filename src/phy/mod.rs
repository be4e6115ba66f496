//! Ethernet PHY Drivers
//!
//! This module provides the PHY driver trait and a generic clause-22
//! implementation used by the RMII driver.
//!
//! # Architecture
//!
//! The PHY layer is independent of the MAC, communicating only through the
//! [`MdioBus`](crate::hal::mdio::MdioBus) interface. This allows:
//!
//! - Reuse with any MDIO backend (bit-banged GPIO or a mock)
//! - Easy addition of chip-specific drivers
//! - Testing with mock MDIO implementations
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::hal::mdio::BitBangMdio;
//! use ph_rp2040_rmii::phy::{GenericPhy, PhyDriver};
//!
//! let mut mdio = BitBangMdio::new(mdc, mdio_pin, delay);
//!
//! // Scan the bus and configure 10BASE-T auto-negotiation
//! let mut phy = GenericPhy::discover(&mut mdio)?;
//! phy.init(&mut mdio)?;
//!
//! loop {
//!     if let Some(up) = phy.poll_link(&mut mdio)? {
//!         // link changed
//!     }
//! }
//! ```

pub mod generic;

pub use generic::{GenericPhy, PhyDriver, ieee802_3};

// Re-export IEEE 802.3 standard register definitions from mdio
pub use crate::hal::mdio::{anar, bmcr, bmsr, phy_reg};
