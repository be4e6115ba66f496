//! Centralized Constants
//!
//! This module provides a single source of truth for all magic numbers and
//! configuration constants used throughout the RMII driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame/Buffer sizes**: Ethernet frame dimensions and DMA buffer sizes
//! - **Symbol stream**: The byte-per-symbol encoding fed to the PIO transmitter
//! - **Management bus**: MDIO bit-bang timing and PHY configuration values
//! - **Default configuration**: PIO, state machine and pin defaults
//!
//! # Note
//!
//! Hardware register bit definitions remain in their respective modules
//! (`internal/register/*.rs`) as they are specific to those hardware blocks.

use crate::hal::mdio::{anar, bmcr};

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Maximum Ethernet frame size including CRC (1500 + 14 header + 4 CRC)
pub const MAX_FRAME_SIZE: usize = 1518;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// Largest frame accepted by `transmit` (header + MTU, FCS appended by the driver)
pub const MAX_TX_FRAME_SIZE: usize = ETH_HEADER_SIZE + MTU;

/// CRC/FCS size at end of frame
pub const CRC_SIZE: usize = 4;

/// Minimum Ethernet frame size (excluding CRC)
pub const MIN_FRAME_SIZE: usize = 60;

/// Receive capture window filled by the RX DMA channel
pub const RX_WINDOW_SIZE: usize = MAX_FRAME_SIZE;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

// =============================================================================
// Symbol Stream
// =============================================================================

/// Number of preamble symbols emitted before the start-of-frame delimiter
pub const PREAMBLE_SYMBOLS: usize = 31;

/// Preamble symbol (TX_EN set, dibit `01`)
pub const SYMBOL_PREAMBLE: u8 = 0x05;

/// Start-of-frame delimiter symbol (TX_EN set, dibit `11`)
pub const SYMBOL_SFD: u8 = 0x07;

/// Transmit-enable marker bit carried by every data symbol
pub const SYMBOL_TX_EN: u8 = 0x04;

/// Idle symbol (TX_EN low)
pub const SYMBOL_IDLE: u8 = 0x00;

/// 2-bit symbols per byte
pub const SYMBOLS_PER_BYTE: usize = 4;

/// Trailing idle symbols (12 byte times of inter-frame gap)
pub const TRAILER_SYMBOLS: usize = 12 * SYMBOLS_PER_BYTE;

/// Size of the expanded transmit symbol buffer for the largest frame
pub const TX_SYMBOL_BUFFER_SIZE: usize =
    PREAMBLE_SYMBOLS + 1 + (MAX_TX_FRAME_SIZE + CRC_SIZE) * SYMBOLS_PER_BYTE + TRAILER_SYMBOLS;

// =============================================================================
// MDIO/MDC (IEEE 802.3 Clause 22)
// =============================================================================

/// MDC half period in microseconds (~500 kHz bit-banged clock)
pub const MDIO_HALF_PERIOD_US: u32 = 1;

/// Number of one-bits clocked out before every management frame
pub const MDIO_PREAMBLE_BITS: u32 = 32;

/// Register 0 value read back from an address with no PHY behind it
pub const PHY_ABSENT: u16 = 0xFFFF;

/// PHY address used when discovery finds nothing
pub const DEFAULT_PHY_ADDR: u8 = 0;

/// Auto-negotiation advertisement: 10BASE-T full + half duplex, IEEE 802.3 selector
pub const PHY_ANAR_VALUE: u16 = anar::T10_FD | anar::T10_HD | anar::SELECTOR_IEEE802_3;

/// BMCR value written after the advertisement: enable and restart auto-negotiation
pub const PHY_BMCR_VALUE: u16 = bmcr::AN_ENABLE | bmcr::AN_RESTART;

// =============================================================================
// Default Configuration
// =============================================================================

/// Default PIO block
pub const DEFAULT_PIO: u8 = 0;

/// Default first state machine (RX uses it, TX uses the next one)
pub const DEFAULT_SM_START: u8 = 0;

/// Default RX pin base (RX0, RX1, CRS_DV)
pub const DEFAULT_RX_PIN_BASE: u8 = 6;

/// Default TX pin base (TX0, TX1, TX_EN)
pub const DEFAULT_TX_PIN_BASE: u8 = 10;

/// Default MDIO pin (MDC is the next pin)
pub const DEFAULT_MDIO_PIN_BASE: u8 = 14;

/// Pins per RMII data group
pub const RMII_GROUP_PINS: u8 = 3;

/// Pins per management group
pub const MDIO_GROUP_PINS: u8 = 2;

/// Highest user GPIO on the RP2040
pub const MAX_GPIO: u8 = 29;

/// Number of PIO blocks
pub const PIO_BLOCKS: u8 = 2;

/// State machines per PIO block
pub const PIO_STATE_MACHINES: u8 = 4;

/// First three bytes of a derived station address.
///
/// The Raspberry Pi OUI with the locally-administered bit set, so derived
/// addresses never collide with factory-assigned ones.
pub const DERIVED_MAC_PREFIX: [u8; 3] = [0xBA, 0x27, 0xEB];
