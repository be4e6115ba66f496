//! External Stack Integrations
//!
//! The driver talks to any IP stack through [`NetStack`](crate::NetStack).
//! This module provides ready-made adapters:
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - [`SmoltcpBridge`] implements both `NetStack` and `smoltcp::phy::Device`
//!   - RX/TX token support
//!   - Requires `smoltcp` feature
//!
//! # Feature Flags
//!
//! - `smoltcp`: Enables smoltcp integration (`smoltcp` submodule)
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::integration::smoltcp::SmoltcpBridge;
//!
//! let mut bridge = SmoltcpBridge::new(tx);
//! poller.poll(&mut bridge);
//! iface.poll(now, &mut bridge, &mut sockets);
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{BridgeRxToken, BridgeTxToken, SmoltcpBridge, ethernet_address};
