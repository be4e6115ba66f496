//! Generic PHY Driver
//!
//! This module defines the common interface for Ethernet PHY drivers and a
//! generic clause-22 implementation that works with any 10/100 PHY, based
//! only on the IEEE 802.3 standard registers.

use crate::constants::{DEFAULT_PHY_ADDR, PHY_ABSENT, PHY_ANAR_VALUE, PHY_BMCR_VALUE};
use crate::error::Result;
use crate::hal::mdio::{MAX_PHY_ADDR, MdioBus, phy_reg, read_phy_id};

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Trait for Ethernet PHY drivers
///
/// The RMII driver only needs the PHY to negotiate a 10BASE-T link and to
/// report its link bit. Chip-specific drivers may do more in `init`.
///
/// # Example Implementation
///
/// ```ignore
/// struct MyPhy {
///     addr: u8,
///     last_link_up: bool,
/// }
///
/// impl PhyDriver for MyPhy {
///     fn address(&self) -> u8 { self.addr }
///
///     fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
///         ieee802_3::advertise_10base_t(mdio, self.addr)
///     }
///
///     // ... other methods
/// }
/// ```
pub trait PhyDriver {
    /// Get the PHY address (0-31)
    fn address(&self) -> u8;

    /// Initialize the PHY
    ///
    /// Configures the advertisement and (re)starts auto-negotiation.
    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Check if the link is up
    ///
    /// Returns `true` if PHY has detected a valid link partner.
    fn is_link_up<M: MdioBus>(&self, mdio: &mut M) -> Result<bool>;

    /// Poll for link changes
    ///
    /// Returns `Some(up)` exactly once per transition, `None` while the
    /// link bit is unchanged.
    fn poll_link<M: MdioBus>(&mut self, mdio: &mut M) -> Result<Option<bool>>;

    /// Read the PHY identifier (OUI + model + revision)
    ///
    /// Returns a 32-bit value: `(PHYIDR1 << 16) | PHYIDR2`
    fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32>;
}

// =============================================================================
// Generic Clause-22 PHY
// =============================================================================

/// PHY driven purely through the standard registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GenericPhy {
    addr: u8,
    detected: bool,
    last_link_up: bool,
}

impl GenericPhy {
    /// Create a driver for a PHY at a known address
    pub const fn new(addr: u8) -> Self {
        Self {
            addr,
            detected: true,
            last_link_up: false,
        }
    }

    /// Scan addresses 0..=31 and adopt the first PHY that answers.
    ///
    /// A PHY answers when register 0 reads anything but `0xFFFF`. When
    /// nothing answers the driver falls back to address 0 and reports
    /// `is_detected() == false`; such a link never comes up, but the
    /// driver keeps running.
    pub fn discover<M: MdioBus>(mdio: &mut M) -> Result<Self> {
        for addr in 0..=MAX_PHY_ADDR {
            if Self::probe(mdio, addr)? {
                #[cfg(feature = "defmt")]
                defmt::info!("PHY found at address {}", addr);
                return Ok(Self::new(addr));
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "no PHY answered, falling back to address {}",
            DEFAULT_PHY_ADDR
        );

        Ok(Self {
            addr: DEFAULT_PHY_ADDR,
            detected: false,
            last_link_up: false,
        })
    }

    /// Check whether a PHY answers at `addr`
    pub fn probe<M: MdioBus>(mdio: &mut M, addr: u8) -> Result<bool> {
        Ok(mdio.read(addr, phy_reg::BMCR)? != PHY_ABSENT)
    }

    /// Whether discovery found a PHY
    pub const fn is_detected(&self) -> bool {
        self.detected
    }

    /// Link state as of the last [`poll_link`](PhyDriver::poll_link)
    pub const fn last_link_up(&self) -> bool {
        self.last_link_up
    }
}

impl PhyDriver for GenericPhy {
    fn address(&self) -> u8 {
        self.addr
    }

    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        ieee802_3::advertise_10base_t(mdio, self.addr)?;
        self.last_link_up = false;
        Ok(())
    }

    fn is_link_up<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        ieee802_3::is_link_up(mdio, self.addr)
    }

    fn poll_link<M: MdioBus>(&mut self, mdio: &mut M) -> Result<Option<bool>> {
        let link_up = self.is_link_up(mdio)?;
        if link_up == self.last_link_up {
            return Ok(None);
        }
        self.last_link_up = link_up;
        Ok(Some(link_up))
    }

    fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32> {
        read_phy_id(mdio, self.addr)
    }
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::hal::mdio::bmsr;

    /// Read BMSR and check link status bit
    pub fn is_link_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
    }

    /// Advertise 10BASE-T full and half duplex, then enable and restart
    /// auto-negotiation.
    ///
    /// The advertisement must be written first; BMCR kicks off the
    /// negotiation with whatever ANAR holds at that moment.
    pub fn advertise_10base_t<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        mdio.write(phy_addr, phy_reg::ANAR, PHY_ANAR_VALUE)?;
        mdio.write(phy_addr, phy_reg::BMCR, PHY_BMCR_VALUE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
