//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! [`SmoltcpBridge`] sits between the RMII poll loop and a
//! [smoltcp](https://docs.rs/smoltcp) interface. The poller pushes frames
//! into it through [`NetStack`]; smoltcp pulls them back out through
//! `smoltcp::phy::Device` and transmits through the same object.
//!
//! The bridge holds a single received frame. A second frame arriving before
//! smoltcp picked up the first is rejected and counted by the poller.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_rp2040_rmii::integration::smoltcp::{SmoltcpBridge, ethernet_address};
//!
//! let (tx, mut poller) = RmiiEthernet::init(config, parts, buffers)?.split();
//! let mut bridge = SmoltcpBridge::new(tx);
//!
//! let config = Config::new(ethernet_address(&bridge).into());
//! let mut iface = Interface::new(config, &mut bridge, Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//!
//! loop {
//!     poller.poll(&mut bridge);
//!     iface.poll(now(), &mut bridge, &mut sockets);
//! }
//! ```
//!
//! # Features
//!
//! This module is only available when the `smoltcp` feature is enabled in Cargo.toml:
//! ```toml
//! [dependencies]
//! ph-rp2040-rmii = { version = "0.1", features = ["smoltcp"] }
//! ```

use crate::constants::MAX_TX_FRAME_SIZE;
use crate::driver::rmii::RmiiTx;
use crate::hal::pio::TxPath;
use crate::netif::{NetStack, Rejected};

use smoltcp::phy::{ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

// =============================================================================
// Bridge
// =============================================================================

/// smoltcp device backed by the RMII transmit half and a one-frame inbox
pub struct SmoltcpBridge<T: TxPath> {
    tx: RmiiTx<T>,
    rx_frame: [u8; MAX_TX_FRAME_SIZE],
    rx_len: Option<usize>,
    link_up: bool,
    tx_dropped: u32,
}

impl<T: TxPath> SmoltcpBridge<T> {
    /// Wrap the transmit half of an initialized interface
    pub const fn new(tx: RmiiTx<T>) -> Self {
        Self {
            tx,
            rx_frame: [0; MAX_TX_FRAME_SIZE],
            rx_len: None,
            link_up: false,
            tx_dropped: 0,
        }
    }

    /// Whether a received frame is waiting for smoltcp
    pub fn rx_pending(&self) -> bool {
        self.rx_len.is_some()
    }

    /// Link state as last reported by the poller
    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// Frames smoltcp built that could not be sent
    pub fn tx_dropped(&self) -> u32 {
        self.tx_dropped
    }

    /// The transmit half
    pub fn tx(&mut self) -> &mut RmiiTx<T> {
        &mut self.tx
    }

    /// Give back the transmit half
    pub fn into_inner(self) -> RmiiTx<T> {
        self.tx
    }
}

impl<T: TxPath> NetStack for SmoltcpBridge<T> {
    fn input(&mut self, frame: &[u8]) -> Result<(), Rejected> {
        if self.rx_len.is_some() || frame.len() > MAX_TX_FRAME_SIZE {
            return Err(Rejected);
        }
        self.rx_frame[..frame.len()].copy_from_slice(frame);
        self.rx_len = Some(frame.len());
        Ok(())
    }

    fn link_changed(&mut self, up: bool) {
        self.link_up = up;
    }
}

// =============================================================================
// RX Token
// =============================================================================

/// Receive token for smoltcp
///
/// Borrows the frame held by the bridge. The inbox is already emptied when
/// the token is handed out.
pub struct BridgeRxToken<'a> {
    frame: &'a [u8],
}

impl smoltcp::phy::RxToken for BridgeRxToken<'_> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(self.frame)
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token for smoltcp
///
/// smoltcp writes the frame straight into the driver's staging buffer.
pub struct BridgeTxToken<'a, T: TxPath> {
    tx: &'a mut RmiiTx<T>,
    dropped: &'a mut u32,
}

impl<T: TxPath> smoltcp::phy::TxToken for BridgeTxToken<'_, T> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let (result, sent) = self.tx.fill_and_send(len, f);

        if let Err(_e) = sent {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp frame of {} bytes dropped: {}", len, _e);

            *self.dropped = self.dropped.wrapping_add(1);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<T: TxPath> Device for SmoltcpBridge<T> {
    type RxToken<'a>
        = BridgeRxToken<'a>
    where
        Self: 'a;
    type TxToken<'a>
        = BridgeTxToken<'a, T>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        let len = self.rx_len.take()?;

        // Disjoint field borrows: the inbox for RX, the driver for TX
        let Self {
            tx,
            rx_frame,
            tx_dropped,
            ..
        } = self;

        Some((
            BridgeRxToken {
                frame: &rx_frame[..len],
            },
            BridgeTxToken {
                tx,
                dropped: tx_dropped,
            },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        Some(BridgeTxToken {
            tx: &mut self.tx,
            dropped: &mut self.tx_dropped,
        })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();

        caps.medium = Medium::Ethernet;

        // Ethernet medium counts the 14 byte header
        caps.max_transmission_unit = MAX_TX_FRAME_SIZE;

        // One inbox slot, one symbol buffer
        caps.max_burst_size = Some(1);

        // No checksum offload: the PIO only moves bits
        caps.checksum = ChecksumCapabilities::default();

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
///
/// This is a convenience function for creating smoltcp interface configurations.
pub fn ethernet_address<T: TxPath>(bridge: &SmoltcpBridge<T>) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(*bridge.tx.mac_address())
}
