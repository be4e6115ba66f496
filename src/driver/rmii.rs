//! RMII network interface
//!
//! [`RmiiEthernet`] ties the pieces together: it discovers and configures
//! the PHY at init, encodes and starts transmissions, and runs the poll
//! loop that senses the link and drains the receive window.
//!
//! The interface can be [`split`](RmiiEthernet::split) so that transmission
//! happens from one context ([`RmiiTx`]) while another runs the busy poll
//! loop ([`RmiiPoller`]). Each half owns exactly the hardware and buffers
//! its direction needs.
//!
//! # Example
//!
//! ```ignore
//! static BUFFERS: StaticCell<RmiiBuffers> = StaticCell::new();
//!
//! // SAFETY: the PIO state machines, DMA channels and pins are ours alone
//! let hw = unsafe { Rp2040Rmii::new(&config, rx_program, tx_program, 0, 1)? };
//! let eth = RmiiEthernet::init(config, hw.into_parts(), BUFFERS.init(RmiiBuffers::new()))?;
//! let (mut tx, mut poller) = eth.split();
//!
//! tx.transmit(&frame)?;
//! poller.run_forever(&mut stack);
//! ```

use crate::constants::{MAC_ADDR_LEN, MAX_TX_FRAME_SIZE, RX_WINDOW_SIZE};
use crate::crc::{crc32, fcs_bytes};
use crate::driver::config::RmiiConfig;
use crate::driver::interrupt::CarrierLossHandler;
use crate::driver::rx::frame_length;
use crate::driver::tx::{TxBuffers, encode_symbols, pad_frame};
use crate::error::{ConfigError, DmaError, DmaResult, Result};
use crate::hal::mdio::MdioBus;
use crate::hal::pio::{RxPath, TxPath};
use crate::netif::NetStack;
use crate::phy::{GenericPhy, PhyDriver};

// =============================================================================
// Buffers and Parts
// =============================================================================

/// All memory the driver hands to DMA.
///
/// Must outlive the driver, hence the `&'static mut` in
/// [`RmiiEthernet::init`]; place it in a `static` (e.g. via `StaticCell`).
#[derive(Debug)]
pub struct RmiiBuffers {
    tx: TxBuffers,
    rx: [u8; RX_WINDOW_SIZE],
}

impl RmiiBuffers {
    /// Create zeroed buffers
    pub const fn new() -> Self {
        Self {
            tx: TxBuffers::new(),
            rx: [0; RX_WINDOW_SIZE],
        }
    }
}

impl Default for RmiiBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Hardware handed to [`RmiiEthernet::init`]
#[derive(Debug)]
pub struct RmiiParts<R, T, M> {
    /// Receive state machine and DMA channel
    pub rx: R,
    /// Transmit state machine and DMA channel
    pub tx: T,
    /// Management bus
    pub mdio: M,
}

// =============================================================================
// Statistics and Outcomes
// =============================================================================

/// Transmit counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxStats {
    /// Frames handed to the DMA
    pub frames: u32,
    /// Frames zero-padded up to the minimum size
    pub padded: u32,
}

/// Receive counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStats {
    /// Frames accepted by the stack
    pub delivered: u32,
    /// Frames the stack refused
    pub rejected: u32,
    /// Captures with no valid frame (idle, noise, truncation)
    pub empty_windows: u32,
}

/// What the receive half of a poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxOutcome {
    /// Capture still running; nothing scanned
    Busy,
    /// Window scanned, no frame found
    Empty,
    /// Frame of this length delivered
    Delivered(usize),
    /// Frame of this length refused by the stack
    Rejected(usize),
}

/// Result of one [`RmiiPoller::poll`] iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// `Some(up)` when the link changed during this poll
    pub link: Option<bool>,
    /// Receive activity
    pub rx: RxOutcome,
}

// =============================================================================
// Transmit Half
// =============================================================================

/// Transmit half of the interface
#[derive(Debug)]
pub struct RmiiTx<T: TxPath> {
    path: T,
    buffers: &'static mut TxBuffers,
    mac_address: [u8; MAC_ADDR_LEN],
    stats: TxStats,
}

impl<T: TxPath> RmiiTx<T> {
    /// Transmit a frame (destination MAC through payload, no FCS).
    ///
    /// Frames shorter than 60 bytes are zero-padded. Blocks only while the
    /// previous frame is still being shifted out, then starts the DMA and
    /// returns.
    ///
    /// # Errors
    /// - `InvalidLength` - Empty frame
    /// - `FrameTooLarge` - Frame longer than 1514 bytes
    pub fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        check_length(frame.len())?;
        self.buffers.frame[..frame.len()].copy_from_slice(frame);
        self.send_staged(frame.len())
    }

    /// Build a `len`-byte frame in place and transmit it.
    ///
    /// `fill` writes the frame into the staging buffer, so no intermediate
    /// copy is needed. Safe to call while the previous frame is in flight:
    /// the staging buffer is not read by DMA.
    ///
    /// # Errors
    /// Same as [`transmit`](Self::transmit); `fill` is not called on error.
    pub fn transmit_with<R, F>(&mut self, len: usize, fill: F) -> Result<R>
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        check_length(len)?;
        let (result, sent) = self.fill_and_send(len, fill);
        sent?;
        Ok(result)
    }

    /// Like [`transmit_with`](Self::transmit_with), but `fill` always runs.
    ///
    /// For callers that must hand back the closure's result even when the
    /// frame is dropped. An out-of-range `len` gives `fill` a clamped buffer
    /// and nothing is sent.
    pub(crate) fn fill_and_send<R, F>(&mut self, len: usize, fill: F) -> (R, Result<()>)
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let result = fill(&mut self.buffers.frame[..len.min(MAX_TX_FRAME_SIZE)]);
        (result, self.send_staged(len))
    }

    fn send_staged(&mut self, len: usize) -> Result<()> {
        check_length(len)?;
        let padded = pad_frame(&mut self.buffers.frame, len);
        let fcs = fcs_bytes(crc32(&self.buffers.frame[..padded]));

        // The symbol buffer belongs to the DMA until it finishes
        while self.path.is_busy() {
            core::hint::spin_loop();
        }

        let count = encode_symbols(&self.buffers.frame[..padded], fcs, &mut self.buffers.symbols)?;

        // SAFETY: the buffer is 'static and is not touched again until
        // `is_busy` reports the transfer done.
        unsafe { self.path.start(self.buffers.symbols.as_ptr(), count) };

        self.stats.frames = self.stats.frames.wrapping_add(1);
        if padded != len {
            self.stats.padded = self.stats.padded.wrapping_add(1);
        }
        Ok(())
    }

    /// Check whether a frame of `len` bytes is accepted by `transmit`
    pub const fn can_transmit(len: usize) -> bool {
        len > 0 && len <= MAX_TX_FRAME_SIZE
    }

    /// Whether the previous frame is still being sent
    #[inline(always)]
    pub fn is_busy(&self) -> bool {
        self.path.is_busy()
    }

    /// Station address
    #[inline(always)]
    pub fn mac_address(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.mac_address
    }

    /// Transmit counters
    pub fn stats(&self) -> TxStats {
        self.stats
    }
}

fn check_length(len: usize) -> DmaResult<()> {
    if len == 0 {
        return Err(DmaError::InvalidLength);
    }
    if len > MAX_TX_FRAME_SIZE {
        return Err(DmaError::FrameTooLarge);
    }
    Ok(())
}

// =============================================================================
// Poll Half
// =============================================================================

/// Receive and link half of the interface
#[derive(Debug)]
pub struct RmiiPoller<R: RxPath, M: MdioBus> {
    path: R,
    mdio: M,
    phy: GenericPhy,
    window: &'static mut [u8; RX_WINDOW_SIZE],
    stats: RxStats,
    link_changes: u32,
}

impl<R: RxPath, M: MdioBus> RmiiPoller<R, M> {
    /// Run one iteration of the driver loop.
    ///
    /// 1. Sense the link and report a change to the stack.
    /// 2. If the capture is finished, scan the window, deliver any frame
    ///    and re-arm the capture.
    /// 3. Let the stack service its timers.
    pub fn poll<S: NetStack>(&mut self, stack: &mut S) -> PollOutcome {
        let link = self.poll_link(stack);

        let rx = if self.path.is_busy() {
            RxOutcome::Busy
        } else {
            let outcome = self.drain_window(stack);
            self.rearm();
            outcome
        };

        stack.service_timeouts();

        PollOutcome { link, rx }
    }

    /// Poll forever. Intended to own a core or the main loop.
    pub fn run_forever<S: NetStack>(&mut self, stack: &mut S) -> ! {
        loop {
            self.poll(stack);
        }
    }

    fn poll_link<S: NetStack>(&mut self, stack: &mut S) -> Option<bool> {
        match self.phy.poll_link(&mut self.mdio) {
            Ok(Some(up)) => {
                #[cfg(feature = "defmt")]
                defmt::info!("link {}", if up { "up" } else { "down" });

                self.link_changes = self.link_changes.wrapping_add(1);
                stack.link_changed(up);
                Some(up)
            }
            Ok(None) => None,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("link poll failed: {}", _e);
                None
            }
        }
    }

    fn drain_window<S: NetStack>(&mut self, stack: &mut S) -> RxOutcome {
        let Some(len) = frame_length(&self.window[..]) else {
            self.stats.empty_windows = self.stats.empty_windows.wrapping_add(1);
            return RxOutcome::Empty;
        };

        match stack.input(&self.window[..len]) {
            Ok(()) => {
                self.stats.delivered = self.stats.delivered.wrapping_add(1);
                RxOutcome::Delivered(len)
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("stack rejected {} byte frame", len);

                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                RxOutcome::Rejected(len)
            }
        }
    }

    fn rearm(&mut self) {
        self.window.fill(0);

        // SAFETY: the window is 'static and only read again once `is_busy`
        // reports the capture finished or aborted.
        unsafe { self.path.start(self.window.as_mut_ptr(), RX_WINDOW_SIZE) };

        self.path.restart_receiver();
        self.path.arm_carrier_irq();
    }

    /// Create the handler for the carrier-loss interrupt
    pub fn carrier_loss_handler(&self) -> CarrierLossHandler<R::Abort> {
        CarrierLossHandler::new(self.path.abort_handle())
    }

    /// Link state as of the last poll
    pub fn is_link_up(&self) -> bool {
        self.phy.last_link_up()
    }

    /// The PHY found at init
    pub fn phy(&self) -> &GenericPhy {
        &self.phy
    }

    /// Direct access to the management bus
    pub fn mdio(&mut self) -> &mut M {
        &mut self.mdio
    }

    /// Receive counters
    pub fn stats(&self) -> RxStats {
        self.stats
    }

    /// Number of link transitions reported to the stack
    pub fn link_changes(&self) -> u32 {
        self.link_changes
    }
}

// =============================================================================
// Combined Interface
// =============================================================================

/// RMII Ethernet interface
///
/// # Type Parameters
/// * `R` - Receive path (PIO state machine + DMA channel)
/// * `T` - Transmit path (PIO state machine + DMA channel)
/// * `M` - MDIO bus
#[derive(Debug)]
pub struct RmiiEthernet<R: RxPath, T: TxPath, M: MdioBus> {
    config: RmiiConfig,
    tx: RmiiTx<T>,
    poller: RmiiPoller<R, M>,
}

impl<R: RxPath, T: TxPath, M: MdioBus> RmiiEthernet<R, T, M> {
    /// Bring up the interface.
    ///
    /// 1. Validate the configuration
    /// 2. Scan the MDIO bus for a PHY (falls back to address 0)
    /// 3. Advertise 10BASE-T and restart auto-negotiation
    /// 4. Resolve the station address
    ///
    /// The link starts out down; the first [`poll`](Self::poll) arms the
    /// receiver.
    ///
    /// # Errors
    /// - `Config(..)` - Invalid PIO, state machine or pin assignment
    /// - `Config(MissingAddress)` - Neither a MAC address nor a board id
    /// - `Io(PhyError)` - MDIO pin failure
    pub fn init(
        config: RmiiConfig,
        parts: RmiiParts<R, T, M>,
        buffers: &'static mut RmiiBuffers,
    ) -> Result<Self> {
        config.validate()?;

        let RmiiParts { rx, tx, mut mdio } = parts;

        let mut phy = GenericPhy::discover(&mut mdio)?;
        phy.init(&mut mdio)?;

        #[cfg(feature = "defmt")]
        if phy.is_detected() {
            if let Ok(id) = phy.phy_id(&mut mdio) {
                defmt::info!("PHY@{} id {=u32:08x}", phy.address(), id);
            }
        }

        let mac_address = config
            .resolve_mac_address()
            .ok_or(ConfigError::MissingAddress)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "RMII up: PIO{} SM{}/{} PHY@{} MAC {:02x}",
            config.pio,
            config.rx_sm(),
            config.tx_sm(),
            phy.address(),
            mac_address
        );

        let RmiiBuffers { tx: tx_buffers, rx: window } = buffers;

        Ok(Self {
            config,
            tx: RmiiTx {
                path: tx,
                buffers: tx_buffers,
                mac_address,
                stats: TxStats::default(),
            },
            poller: RmiiPoller {
                path: rx,
                mdio,
                phy,
                window,
                stats: RxStats::default(),
                link_changes: 0,
            },
        })
    }

    /// Separate the transmit and poll halves
    pub fn split(self) -> (RmiiTx<T>, RmiiPoller<R, M>) {
        (self.tx, self.poller)
    }

    /// See [`RmiiTx::transmit`]
    pub fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        self.tx.transmit(frame)
    }

    /// See [`RmiiPoller::poll`]
    pub fn poll<S: NetStack>(&mut self, stack: &mut S) -> PollOutcome {
        self.poller.poll(stack)
    }

    /// See [`RmiiPoller::run_forever`]
    pub fn run_forever<S: NetStack>(&mut self, stack: &mut S) -> ! {
        self.poller.run_forever(stack)
    }

    /// Create the handler for the carrier-loss interrupt
    pub fn carrier_loss_handler(&self) -> CarrierLossHandler<R::Abort> {
        self.poller.carrier_loss_handler()
    }

    /// Station address
    #[inline(always)]
    pub fn mac_address(&self) -> &[u8; MAC_ADDR_LEN] {
        self.tx.mac_address()
    }

    /// Configuration used at init
    pub fn config(&self) -> &RmiiConfig {
        &self.config
    }

    /// Transmit half
    pub fn tx(&mut self) -> &mut RmiiTx<T> {
        &mut self.tx
    }

    /// Poll half
    pub fn poller(&mut self) -> &mut RmiiPoller<R, M> {
        &mut self.poller
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
