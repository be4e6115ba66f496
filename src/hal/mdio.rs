//! MDIO (Management Data Input/Output) HAL
//!
//! This module provides the clause-22 management bus used to talk to the
//! external PHY. The RP2040 has no SMI peripheral, so [`BitBangMdio`]
//! drives MDC and MDIO directly from two GPIOs with fixed software delays.
//!
//! # Frame Format
//!
//! ```text
//! PRE(32x1) ST(01) OP(10 rd / 01 wr) PHYAD(5) REGAD(5) TA(2) DATA(16)
//! ```
//!
//! Address and data fields are sent MSB-first. The data line is sampled
//! right after the rising edge of MDC.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::constants::{MDIO_HALF_PERIOD_US, MDIO_PREAMBLE_BITS};
use crate::error::{ConfigError, IoError, Result};

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

const OP_READ: [bool; 2] = [true, false];
const OP_WRITE: [bool; 2] = [false, true];

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends, allowing
/// the PHY driver to work with various MDIO implementations.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

/// Bidirectional MDIO data line
///
/// The line is driven by the MAC for the preamble, header and write data,
/// and released to the PHY for the read turnaround and data.
pub trait MdioDataPin: InputPin + OutputPin {
    /// Switch the pin to output (MAC drives the line)
    fn drive(&mut self) -> core::result::Result<(), Self::Error>;

    /// Switch the pin to input (PHY drives the line)
    fn release(&mut self) -> core::result::Result<(), Self::Error>;
}

#[inline(always)]
fn pin<T, E>(result: core::result::Result<T, E>) -> Result<T> {
    result.map_err(|_| IoError::PhyError.into())
}

fn check_addresses(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg_addr > MAX_REG_ADDR {
        return Err(ConfigError::InvalidConfig.into());
    }
    Ok(())
}

// =============================================================================
// Bit-Banged MDIO
// =============================================================================

/// Software clause-22 MDIO master
///
/// Each bit takes two half periods of [`MDIO_HALF_PERIOD_US`]. The delay
/// provider must not be preempted for long, or MDC stretches; PHYs tolerate
/// slow clocks, so this only affects throughput.
#[derive(Debug)]
pub struct BitBangMdio<MDC, MDIO, D> {
    mdc: MDC,
    mdio: MDIO,
    delay: D,
    half_period_us: u32,
}

impl<MDC, MDIO, D> BitBangMdio<MDC, MDIO, D>
where
    MDC: OutputPin,
    MDIO: MdioDataPin,
    D: DelayNs,
{
    /// Create a bus from the clock pin, the data pin and a delay provider
    pub fn new(mdc: MDC, mdio: MDIO, delay: D) -> Self {
        Self {
            mdc,
            mdio,
            delay,
            half_period_us: MDIO_HALF_PERIOD_US,
        }
    }

    /// Override the MDC half period
    #[must_use]
    pub fn with_half_period_us(mut self, half_period_us: u32) -> Self {
        self.half_period_us = half_period_us;
        self
    }

    /// Give back the pins and the delay provider
    pub fn free(self) -> (MDC, MDIO, D) {
        (self.mdc, self.mdio, self.delay)
    }

    fn clock_out(&mut self, bit: bool) -> Result<()> {
        pin(self.mdc.set_low())?;
        self.delay.delay_us(self.half_period_us);
        pin(self.mdio.set_state(PinState::from(bit)))?;
        pin(self.mdc.set_high())?;
        self.delay.delay_us(self.half_period_us);
        Ok(())
    }

    fn clock_in(&mut self) -> Result<bool> {
        pin(self.mdc.set_low())?;
        self.delay.delay_us(self.half_period_us);
        pin(self.mdc.set_high())?;
        let bit = pin(self.mdio.is_high())?;
        self.delay.delay_us(self.half_period_us);
        Ok(bit)
    }

    fn clock_out_field(&mut self, value: u16, width: u32) -> Result<()> {
        for shift in (0..width).rev() {
            self.clock_out((value >> shift) & 1 != 0)?;
        }
        Ok(())
    }

    fn header(&mut self, op: [bool; 2], phy_addr: u8, reg_addr: u8) -> Result<()> {
        pin(self.mdc.set_low())?;
        pin(self.mdio.drive())?;

        for _ in 0..MDIO_PREAMBLE_BITS {
            self.clock_out(true)?;
        }

        // ST
        self.clock_out(false)?;
        self.clock_out(true)?;

        self.clock_out(op[0])?;
        self.clock_out(op[1])?;

        self.clock_out_field(phy_addr as u16, 5)?;
        self.clock_out_field(reg_addr as u16, 5)
    }
}

impl<MDC, MDIO, D> MdioBus for BitBangMdio<MDC, MDIO, D>
where
    MDC: OutputPin,
    MDIO: MdioDataPin,
    D: DelayNs,
{
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        check_addresses(phy_addr, reg_addr)?;

        self.header(OP_READ, phy_addr, reg_addr)?;

        // Turnaround: the PHY takes the line
        pin(self.mdio.release())?;
        self.clock_out(false)?;
        self.clock_out(false)?;

        let mut value = 0u16;
        for _ in 0..16 {
            value = (value << 1) | self.clock_in()? as u16;
        }
        Ok(value)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        check_addresses(phy_addr, reg_addr)?;

        self.header(OP_WRITE, phy_addr, reg_addr)?;

        // TA
        self.clock_out(true)?;
        self.clock_out(false)?;

        self.clock_out_field(value, 16)?;

        pin(self.mdio.release())
    }
}

// =============================================================================
// PHY Register Definitions (IEEE 802.3 standard registers)
// =============================================================================

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: u8 = 4;
}

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Restart auto-negotiation
    pub const AN_RESTART: u16 = 1 << 9;
}

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// Link status
    pub const LINK_STATUS: u16 = 1 << 2;
}

/// ANAR (Auto-Negotiation Advertisement Register) bits
pub mod anar {
    /// 10BASE-T full duplex
    pub const T10_FD: u16 = 1 << 6;
    /// 10BASE-T half duplex
    pub const T10_HD: u16 = 1 << 5;
    /// IEEE 802.3 selector value
    pub const SELECTOR_IEEE802_3: u16 = 0x0001;
}

// =============================================================================
// PHY Helper Functions
// =============================================================================

/// Read the PHY identifier
pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
    let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
    let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
    Ok((id1 << 16) | id2)
}

// =============================================================================
// Unit Tests
// =============================================================================
