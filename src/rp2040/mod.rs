//! RP2040 Register Backend
//!
//! Implements the [`hal::pio`](crate::hal::pio) seams directly on the RP2040
//! registers:
//!
//! - [`PioTx`]: TX state machine + DMA channel writing the top byte lane of
//!   its TX FIFO
//! - [`PioRx`]: RX state machine + DMA channel reading the top byte lane of
//!   its RX FIFO, with the CRS_DV falling-edge interrupt on IO_BANK0
//! - [`CarrierAbort`]: the interrupt-side handle of [`PioRx`]
//! - [`SioPin`] and [`TimerDelay`]: the bit-banged management bus
//!
//! # PIO Programs
//!
//! The receive and transmit programs are not assembled here. Load them with
//! your HAL or `pio` tooling and describe each with an [`SmProgram`]: the
//! entry offset and the four configuration registers. The programs must
//! match the symbol formats of [`driver::tx`](crate::driver::tx) (one 3-bit
//! symbol per byte: TX0, TX1, TX_EN) and [`driver::rx`](crate::driver::rx)
//! (dibits packed LSB-first into bytes), with the in/out/set pin bases in
//! `pinctrl` pointing at the configured pin groups.
//!
//! # Carrier Interrupt
//!
//! Each poll arms the CRS_DV falling-edge interrupt for the core running the
//! poll loop. Register the `IO_IRQ_BANK0` handler on that same core and
//! unmask `IO_IRQ_BANK0` in its NVIC; the crate does not touch the NVIC.
//!
//! # Example
//!
//! ```ignore
//! use ph_rp2040_rmii::rp2040::{Rp2040Rmii, SmProgram};
//!
//! let rx_program = SmProgram::new(rx_offset)
//!     .with_clkdiv(1, 0)
//!     .with_execctrl(rx_execctrl)
//!     .with_shiftctrl(rx_shiftctrl)
//!     .with_pinctrl(rx_pinctrl);
//!
//! // SAFETY: PIO0 SM0/SM1, DMA channels 0/1 and GPIO6-15 belong to the driver
//! let hw = unsafe { Rp2040Rmii::new(&config, rx_program, tx_program, 0, 1)? };
//! let eth = RmiiEthernet::init(config, hw.into_parts(), buffers)?;
//! ```

mod delay;
mod gpio;
mod path;

pub use delay::TimerDelay;
pub use gpio::SioPin;
pub use path::{CarrierAbort, PioRx, PioTx};

use crate::constants::RMII_GROUP_PINS;
use crate::driver::config::RmiiConfig;
use crate::driver::rmii::RmiiParts;
use crate::error::{ConfigError, Result};
use crate::hal::mdio::{BitBangMdio, MdioBus};
use crate::internal::register::dma::CHANNEL_COUNT;
use crate::internal::register::io_bank0::{IoBank0, funcsel_pio};
use crate::internal::register::pads::PadsBank0;
use crate::internal::register::pio::{PioRegs, instr_jmp};

/// Bit-banged MDIO on SIO pins timed by the microsecond timer
pub type Rp2040Mdio = BitBangMdio<SioPin, SioPin, TimerDelay>;

// =============================================================================
// State Machine Program
// =============================================================================

/// Clock divider register value for `int + frac / 256`
#[inline(always)]
pub const fn clkdiv(int: u16, frac: u8) -> u32 {
    ((int as u32) << 16) | ((frac as u32) << 8)
}

/// A loaded PIO program and the state machine configuration to run it
///
/// Defaults are the hardware reset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmProgram {
    /// Entry point in instruction memory
    pub offset: u8,
    /// `SMx_CLKDIV`
    pub clkdiv: u32,
    /// `SMx_EXECCTRL` (wrap bounds, JMP pin)
    pub execctrl: u32,
    /// `SMx_SHIFTCTRL` (shift directions, autopush/pull, FIFO join)
    pub shiftctrl: u32,
    /// `SMx_PINCTRL` (in/out/set/side-set pin bases and counts)
    pub pinctrl: u32,
}

impl SmProgram {
    /// Program entered at `offset` with reset-value configuration
    pub const fn new(offset: u8) -> Self {
        Self {
            offset,
            clkdiv: clkdiv(1, 0),
            execctrl: 0x0001_F000,
            shiftctrl: 0x000C_0000,
            pinctrl: 0x1400_0000,
        }
    }

    /// Set the clock divider
    #[must_use]
    pub const fn with_clkdiv(mut self, int: u16, frac: u8) -> Self {
        self.clkdiv = clkdiv(int, frac);
        self
    }

    /// Set the execution control register
    #[must_use]
    pub const fn with_execctrl(mut self, execctrl: u32) -> Self {
        self.execctrl = execctrl;
        self
    }

    /// Set the shift control register
    #[must_use]
    pub const fn with_shiftctrl(mut self, shiftctrl: u32) -> Self {
        self.shiftctrl = shiftctrl;
        self
    }

    /// Set the pin control register
    #[must_use]
    pub const fn with_pinctrl(mut self, pinctrl: u32) -> Self {
        self.pinctrl = pinctrl;
        self
    }
}

// =============================================================================
// Hardware Bring-up
// =============================================================================

/// Configured RP2040 hardware, ready to become [`RmiiParts`]
#[derive(Debug)]
pub struct Rp2040Rmii {
    rx: PioRx,
    tx: PioTx,
    mdc: SioPin,
    mdio: SioPin,
}

impl Rp2040Rmii {
    /// Route the pins and set up both state machines.
    ///
    /// 1. Validate the configuration and DMA channels
    /// 2. Hand the RX and TX pin groups to the PIO block
    /// 3. Start the transmitter: outputs low, program entered, enabled
    /// 4. Configure the receiver with inputs, left disabled until the first
    ///    poll arms it
    /// 5. Claim MDIO (released) and MDC (driven low) for SIO
    ///
    /// # Errors
    /// - `Config(..)` - Configuration rejected by [`RmiiConfig::validate`]
    /// - `Config(InvalidConfig)` - DMA channel out of range or shared
    ///
    /// # Safety
    ///
    /// The caller must own the PIO state machines, both DMA channels and
    /// every pin in the configuration, and must not touch them afterwards.
    /// The programs must already be loaded at their offsets.
    pub unsafe fn new(
        config: &RmiiConfig,
        rx_program: SmProgram,
        tx_program: SmProgram,
        rx_dma: u8,
        tx_dma: u8,
    ) -> Result<Self> {
        config.validate()?;
        check_dma_channels(rx_dma, tx_dma)?;

        let pio = PioRegs::new(config.pio);
        let rx_sm = config.rx_sm();
        let tx_sm = config.tx_sm();

        let funcsel = funcsel_pio(config.pio);
        for pin in pin_group(config.rx_pin_base).chain(pin_group(config.tx_pin_base)) {
            PadsBank0::enable_pin(pin);
            IoBank0::set_function(pin, funcsel);
        }

        // Transmitter runs from now on, idling with TX_EN low
        pio.set_sm_enabled(tx_sm, false);
        pio.configure_sm(
            tx_sm,
            tx_program.clkdiv,
            tx_program.execctrl,
            tx_program.shiftctrl,
            tx_program.pinctrl,
        );
        pio.clear_fifos(tx_sm);
        pio.clear_debug_flags(tx_sm);
        pio.restart_sm(tx_sm);
        pio.clear_consecutive_pins(tx_sm, config.tx_pin_base, RMII_GROUP_PINS);
        pio.set_consecutive_pindirs(tx_sm, config.tx_pin_base, RMII_GROUP_PINS, true);
        pio.exec(tx_sm, instr_jmp(tx_program.offset));
        pio.set_sm_enabled(tx_sm, true);

        // Receiver stays off until the first capture is armed
        pio.set_sm_enabled(rx_sm, false);
        pio.configure_sm(
            rx_sm,
            rx_program.clkdiv,
            rx_program.execctrl,
            rx_program.shiftctrl,
            rx_program.pinctrl,
        );
        pio.set_consecutive_pindirs(rx_sm, config.rx_pin_base, RMII_GROUP_PINS, false);

        let crs_dv = config.crs_dv_pin();
        for core in 0..2 {
            IoBank0::disable_edge_low(core, crs_dv);
        }
        IoBank0::ack_edge_low(crs_dv);

        let mdio = SioPin::claim(config.mdio_pin_base, false);
        let mdc = SioPin::claim(config.mdc_pin(), true);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PIO{}: RX SM{} DMA{} @{}, TX SM{} DMA{} @{}",
            config.pio,
            rx_sm,
            rx_dma,
            rx_program.offset,
            tx_sm,
            tx_dma,
            tx_program.offset
        );

        Ok(Self {
            rx: PioRx::new(config.pio, rx_sm, rx_dma, rx_program, crs_dv),
            tx: PioTx::new(config.pio, tx_sm, tx_dma),
            mdc,
            mdio,
        })
    }

    /// Hand over the data paths together with the bit-banged management bus
    pub fn into_parts(self) -> RmiiParts<PioRx, PioTx, Rp2040Mdio> {
        RmiiParts {
            rx: self.rx,
            tx: self.tx,
            mdio: BitBangMdio::new(self.mdc, self.mdio, TimerDelay::new()),
        }
    }

    /// Hand over the data paths with a caller-supplied management bus.
    ///
    /// The MDC and MDIO pins stay claimed for SIO and are dropped.
    pub fn into_parts_with<M: MdioBus>(self, mdio: M) -> RmiiParts<PioRx, PioTx, M> {
        RmiiParts {
            rx: self.rx,
            tx: self.tx,
            mdio,
        }
    }
}

fn pin_group(base: u8) -> core::ops::Range<u8> {
    base..base + RMII_GROUP_PINS
}

fn check_dma_channels(rx_dma: u8, tx_dma: u8) -> Result<()> {
    if rx_dma >= CHANNEL_COUNT || tx_dma >= CHANNEL_COUNT || rx_dma == tx_dma {
        return Err(ConfigError::InvalidConfig.into());
    }
    Ok(())
}
