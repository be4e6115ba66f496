//! Configuration types for the RP2040 RMII driver

use crate::constants::{
    DEFAULT_MDIO_PIN_BASE, DEFAULT_PIO, DEFAULT_RX_PIN_BASE, DEFAULT_SM_START,
    DEFAULT_TX_PIN_BASE, DERIVED_MAC_PREFIX, MAC_ADDR_LEN, MAX_GPIO, MDIO_GROUP_PINS, PIO_BLOCKS,
    PIO_STATE_MACHINES, RMII_GROUP_PINS,
};
use crate::error::{ConfigError, ConfigResult};

/// Length of the RP2040 flash unique id
pub const BOARD_ID_LEN: usize = 8;

// =============================================================================
// Pin Assignments
// =============================================================================

// The PIO programs address their pins relative to a base, so each group is a
// run of consecutive GPIOs:
//
// | Group | Pin      | Direction | Description                |
// |-------|----------|-----------|----------------------------|
// | RX    | base     | Input     | Receive Data 0             |
// | RX    | base + 1 | Input     | Receive Data 1             |
// | RX    | base + 2 | Input     | Carrier Sense / Data Valid |
// | TX    | base     | Output    | Transmit Data 0            |
// | TX    | base + 1 | Output    | Transmit Data 1            |
// | TX    | base + 2 | Output    | Transmit Enable            |
// | MDIO  | base     | In/Out    | Management Data            |
// | MDIO  | base + 1 | Output    | Management Clock           |
//
// The 50 MHz reference clock is not a pin assignment here: it must drive the
// RP2040 system clock, since the PIO programs sample on the system clock.

/// Complete RMII configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmiiConfig {
    /// PIO block index (0 or 1)
    pub pio: u8,
    /// First state machine; RX uses it, TX uses the next one
    pub sm_start: u8,
    /// First RX pin (RX0, RX1, CRS_DV)
    pub rx_pin_base: u8,
    /// First TX pin (TX0, TX1, TX_EN)
    pub tx_pin_base: u8,
    /// MDIO pin; MDC is the next pin
    pub mdio_pin_base: u8,
    /// Station address; derived from `board_id` when `None`
    pub mac_address: Option<[u8; MAC_ADDR_LEN]>,
    /// Flash unique id used for address derivation
    pub board_id: Option<[u8; BOARD_ID_LEN]>,
}

impl Default for RmiiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RmiiConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pio: DEFAULT_PIO,
            sm_start: DEFAULT_SM_START,
            rx_pin_base: DEFAULT_RX_PIN_BASE,
            tx_pin_base: DEFAULT_TX_PIN_BASE,
            mdio_pin_base: DEFAULT_MDIO_PIN_BASE,
            mac_address: None,
            board_id: None,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Select the PIO block
    #[must_use]
    pub const fn with_pio(mut self, pio: u8) -> Self {
        self.pio = pio;
        self
    }

    /// Select the first of the two state machines
    #[must_use]
    pub const fn with_state_machines(mut self, sm_start: u8) -> Self {
        self.sm_start = sm_start;
        self
    }

    /// Set the first RX pin
    #[must_use]
    pub const fn with_rx_pins(mut self, base: u8) -> Self {
        self.rx_pin_base = base;
        self
    }

    /// Set the first TX pin
    #[must_use]
    pub const fn with_tx_pins(mut self, base: u8) -> Self {
        self.tx_pin_base = base;
        self
    }

    /// Set the MDIO pin (MDC is `base + 1`)
    #[must_use]
    pub const fn with_mdio_pins(mut self, base: u8) -> Self {
        self.mdio_pin_base = base;
        self
    }

    /// Set the MAC address
    ///
    /// If not set, an address is derived from the board id.
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = Some(addr);
        self
    }

    /// Set the board unique id used for address derivation
    ///
    /// Read it from the flash chip (`READ_UNIQUE_ID`, 0x4B) before the
    /// driver starts; the RP2040 itself has no serial number.
    #[must_use]
    pub const fn with_board_id(mut self, id: [u8; BOARD_ID_LEN]) -> Self {
        self.board_id = Some(id);
        self
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Receive state machine index
    pub const fn rx_sm(&self) -> u8 {
        self.sm_start
    }

    /// Transmit state machine index
    pub const fn tx_sm(&self) -> u8 {
        self.sm_start.wrapping_add(1)
    }

    /// Carrier sense / data valid pin
    pub const fn crs_dv_pin(&self) -> u8 {
        self.rx_pin_base.wrapping_add(2)
    }

    /// Management clock pin
    pub const fn mdc_pin(&self) -> u8 {
        self.mdio_pin_base.wrapping_add(1)
    }

    /// Station address: the configured one, or one derived from the board id.
    ///
    /// `None` when neither is set.
    pub const fn resolve_mac_address(&self) -> Option<[u8; MAC_ADDR_LEN]> {
        match (self.mac_address, self.board_id) {
            (Some(addr), _) => Some(addr),
            (None, Some(id)) => Some(derive_mac_address(&id)),
            (None, None) => None,
        }
    }

    /// Check PIO, state machine and pin assignments, and that a station
    /// address can be resolved.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPio`] for a PIO index other than 0 or 1
    /// - [`ConfigError::InvalidStateMachine`] when `sm_start + 1` is not a
    ///   state machine
    /// - [`ConfigError::InvalidPin`] when a group runs past GPIO29
    /// - [`ConfigError::PinConflict`] when two groups share a GPIO
    /// - [`ConfigError::MissingAddress`] when neither a MAC address nor a
    ///   board id is set
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pio >= PIO_BLOCKS {
            return Err(ConfigError::InvalidPio);
        }
        if self.sm_start >= PIO_STATE_MACHINES - 1 {
            return Err(ConfigError::InvalidStateMachine);
        }

        let groups = [
            (self.rx_pin_base, RMII_GROUP_PINS),
            (self.tx_pin_base, RMII_GROUP_PINS),
            (self.mdio_pin_base, MDIO_GROUP_PINS),
        ];

        for &(base, len) in &groups {
            if base as u16 + len as u16 - 1 > MAX_GPIO as u16 {
                return Err(ConfigError::InvalidPin);
            }
        }

        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                if overlaps(*a, *b) {
                    return Err(ConfigError::PinConflict);
                }
            }
        }

        if self.resolve_mac_address().is_none() {
            return Err(ConfigError::MissingAddress);
        }

        Ok(())
    }
}

const fn overlaps(a: (u8, u8), b: (u8, u8)) -> bool {
    a.0 < b.0 + b.1 && b.0 < a.0 + a.1
}

/// Derive a station address from the board unique id.
///
/// The locally-administered prefix `BA:27:EB` followed by id bytes 5, 6
/// and 7.
pub const fn derive_mac_address(board_id: &[u8; BOARD_ID_LEN]) -> [u8; MAC_ADDR_LEN] {
    [
        DERIVED_MAC_PREFIX[0],
        DERIVED_MAC_PREFIX[1],
        DERIVED_MAC_PREFIX[2],
        board_id[5],
        board_id[6],
        board_id[7],
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD_ID: [u8; BOARD_ID_LEN] = [0xE6, 0x60, 0x38, 0xB3, 0x27, 0x4F, 0x81, 0x2A];

    fn board_config() -> RmiiConfig {
        RmiiConfig::new().with_board_id(BOARD_ID)
    }

    // =========================================================================
    // Default Value Tests
    // =========================================================================

    #[test]
    fn config_default_values() {
        let config = RmiiConfig::new();

        assert_eq!(config.pio, 0);
        assert_eq!(config.sm_start, 0);
        assert_eq!(config.rx_pin_base, 6);
        assert_eq!(config.tx_pin_base, 10);
        assert_eq!(config.mdio_pin_base, 14);
        assert_eq!(config.mac_address, None);
        assert_eq!(config.board_id, None);
    }

    #[test]
    fn config_default_trait_matches_new() {
        assert_eq!(RmiiConfig::default(), RmiiConfig::new());
    }

    #[test]
    fn config_derived_pins() {
        let config = board_config().with_state_machines(2);

        assert_eq!(config.rx_sm(), 2);
        assert_eq!(config.tx_sm(), 3);
        assert_eq!(config.crs_dv_pin(), 8);
        assert_eq!(config.mdc_pin(), 15);
    }

    // =========================================================================
    // Builder Pattern Tests
    // =========================================================================

    #[test]
    fn config_builder_chaining() {
        let config = board_config()
            .with_pio(1)
            .with_state_machines(1)
            .with_rx_pins(0)
            .with_tx_pins(3)
            .with_mdio_pins(20);

        assert_eq!(config.pio, 1);
        assert_eq!(config.rx_sm(), 1);
        assert_eq!(config.rx_pin_base, 0);
        assert_eq!(config.tx_pin_base, 3);
        assert_eq!(config.mdio_pin_base, 20);
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn validate_rejects_bad_pio() {
        assert_eq!(
            board_config().with_pio(2).validate(),
            Err(ConfigError::InvalidPio)
        );
    }

    #[test]
    fn validate_rejects_last_state_machine() {
        // TX would land on a fifth state machine
        assert_eq!(
            board_config().with_state_machines(3).validate(),
            Err(ConfigError::InvalidStateMachine)
        );
        assert!(board_config().with_state_machines(2).validate().is_ok());
    }

    #[test]
    fn validate_rejects_pins_past_gpio29() {
        assert_eq!(
            board_config().with_rx_pins(28).validate(),
            Err(ConfigError::InvalidPin)
        );
        assert_eq!(
            board_config().with_mdio_pins(29).validate(),
            Err(ConfigError::InvalidPin)
        );
        assert_eq!(
            board_config().with_tx_pins(255).validate(),
            Err(ConfigError::InvalidPin)
        );
        assert!(board_config().with_mdio_pins(28).validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlapping_groups() {
        // RX 6..=8, TX 8..=10
        assert_eq!(
            board_config().with_tx_pins(8).validate(),
            Err(ConfigError::PinConflict)
        );
        // MDC lands on RX0
        assert_eq!(
            board_config().with_mdio_pins(5).validate(),
            Err(ConfigError::PinConflict)
        );
        // Adjacent is fine
        assert!(board_config().with_tx_pins(9).validate().is_ok());
    }

    // =========================================================================
    // Address Tests
    // =========================================================================

    #[test]
    fn derived_address_uses_prefix_and_id_tail() {
        let config =
            RmiiConfig::new().with_board_id([0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]);

        assert_eq!(
            config.resolve_mac_address(),
            Some([0xBA, 0x27, 0xEB, 0x55, 0x66, 0x77])
        );
    }

    #[test]
    fn explicit_address_wins() {
        let mac = [0x02, 0x00, 0x00, 0x11, 0x22, 0x33];
        let config = RmiiConfig::new()
            .with_board_id([0xFF; BOARD_ID_LEN])
            .with_mac_address(mac);

        assert_eq!(config.resolve_mac_address(), Some(mac));
    }

    #[test]
    fn explicit_address_needs_no_board_id() {
        let mac = [0x02, 0x00, 0x00, 0x11, 0x22, 0x33];
        let config = RmiiConfig::new().with_mac_address(mac);

        assert_eq!(config.resolve_mac_address(), Some(mac));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_address() {
        // Every board would otherwise share BA:27:EB:00:00:00
        let config = RmiiConfig::new();

        assert_eq!(config.resolve_mac_address(), None);
        assert_eq!(config.validate(), Err(ConfigError::MissingAddress));
    }

    #[test]
    fn pin_errors_reported_before_missing_address() {
        assert_eq!(
            RmiiConfig::new().with_pio(2).validate(),
            Err(ConfigError::InvalidPio)
        );
    }

    #[test]
    fn derived_address_is_deterministic() {
        let id = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(derive_mac_address(&id), derive_mac_address(&id));
        assert_ne!(
            derive_mac_address(&id),
            derive_mac_address(&[1, 2, 3, 4, 5, 6, 7, 9])
        );
    }
}
