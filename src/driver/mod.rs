//! Core driver components for the RMII interface.
//!
//! This module contains the building blocks of the software MAC:
//!
//! - [`config`] - Pin, PIO and station address configuration
//! - [`tx`] - Frame to symbol-stream encoder
//! - [`rx`] - CRC-delimited frame recovery from the capture window
//! - [`interrupt`] - Carrier-loss interrupt handler
//! - [`rmii`] - The interface itself: init, transmit and the poll loop
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::driver::{RmiiConfig, RmiiEthernet};
//!
//! let config = RmiiConfig::new()
//!     .with_rx_pins(6)
//!     .with_tx_pins(10)
//!     .with_mdio_pins(14)
//!     .with_board_id(flash_unique_id);
//! ```

// Submodules
pub mod config;
pub mod interrupt;
pub mod rmii;
pub mod rx;
pub mod tx;

// Re-exports for convenience
pub use config::{BOARD_ID_LEN, RmiiConfig, derive_mac_address};
pub use interrupt::CarrierLossHandler;
pub use rmii::{
    PollOutcome, RmiiBuffers, RmiiEthernet, RmiiParts, RmiiPoller, RmiiTx, RxOutcome, RxStats,
    TxStats,
};
pub use rx::frame_length;
pub use tx::{TxBuffers, encode_symbols, pad_frame, symbol_len};
