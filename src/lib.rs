//! RP2040 Software RMII Ethernet MAC
//!
//! A `no_std`, `no_alloc` Ethernet MAC for the RP2040, built from two PIO
//! state machines, two DMA channels and a bit-banged MDIO bus talking to an
//! external 10BASE-T PHY over RMII.
//!
//! The RP2040 has no Ethernet peripheral. The transmit state machine shifts
//! pre-encoded RMII symbols onto TX0/TX1/TX_EN; the receive state machine
//! samples RX0/RX1 into a fixed window while CRS_DV is asserted, and the
//! falling edge of CRS_DV stops the capture. Frame boundaries inside the
//! window are recovered by scanning for a matching CRC-32.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): Symbol encoder, frame recovery, the
//!    carrier-loss handler and the [`RmiiEthernet`] poll loop
//! 2. **PHY Layer** ([`phy`]): Generic IEEE 802.3 PHY discovery and setup
//! 3. **HAL Layer** ([`hal`]): Seams for the PIO/DMA data paths and MDIO
//!
//! The [`rp2040`] module implements the HAL seams on the RP2040 registers.
//! Everything above it is host-testable against mocks.
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3**: Preamble/SFD, minimum frame padding, FCS, Clause 22 MDIO
//! - **RMII**: Dibit transmit/receive at 10 Mbit/s
//!
//! # Features
//!
//! - `rp2040` (default): Register-level RP2040 backend
//! - `defmt`: Enable defmt formatting and driver logging
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable ISR-safe `SharedStack` and
//!   `SharedCarrierHandler` wrappers
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::rp2040::{Rp2040Rmii, SmProgram};
//! use ph_rp2040_rmii::{RmiiBuffers, RmiiConfig, RmiiEthernet};
//!
//! static BUFFERS: StaticCell<RmiiBuffers> = StaticCell::new();
//!
//! let config = RmiiConfig::new()
//!     .with_rx_pins(6)
//!     .with_tx_pins(10)
//!     .with_mdio_pins(14)
//!     .with_board_id(board_id);
//!
//! // SAFETY: PIO0 SM0/SM1, DMA channels 0/1 and GPIO6-15 belong to the driver
//! let hw = unsafe { Rp2040Rmii::new(&config, rx_program, tx_program, 0, 1)? };
//! let eth = RmiiEthernet::init(config, hw.into_parts(), BUFFERS.init(RmiiBuffers::new()))?;
//! let (mut tx, mut poller) = eth.split();
//!
//! // Interrupt handler for the CRS_DV falling edge
//! CARRIER.install(poller.carrier_loss_handler()).ok();
//!
//! tx.transmit(&frame)?;
//! poller.run_forever(&mut stack);
//! ```
//!
//! # Memory Requirements
//!
//! [`RmiiBuffers`] holds the 1518-byte receive window, the 1514-byte staging
//! frame and the transmit symbol stream (four bytes per frame byte):
//! about 9 KB, which must live in a `static`.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod constants;
pub mod crc;
pub mod driver;
pub mod error;
pub mod hal;
pub mod netif;
pub mod phy;

#[cfg(feature = "rp2040")]
#[cfg_attr(docsrs, doc(cfg(feature = "rp2040")))]
pub mod rp2040;

// Internal implementation details (pub(crate) only)
#[cfg(feature = "rp2040")]
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{BOARD_ID_LEN, RmiiConfig, derive_mac_address};
pub use driver::interrupt::CarrierLossHandler;
pub use driver::rmii::{
    PollOutcome, RmiiBuffers, RmiiEthernet, RmiiParts, RmiiPoller, RmiiTx, RxOutcome, RxStats,
    TxStats,
};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use hal::{BitBangMdio, MdioBus, MdioDataPin, RxAbort, RxPath, TxPath};
pub use netif::{NetStack, Rejected};

// Re-export PHY types
pub use phy::{GenericPhy, PhyDriver};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{CriticalSectionCell, SharedCarrierHandler, SharedStack};
