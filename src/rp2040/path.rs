//! PIO + DMA implementations of the data paths

use crate::hal::pio::{RxAbort, RxPath, TxPath};
use crate::internal::register::dma::{DmaChannel, FIFO_MSB_LANE, channel_ctrl};
use crate::internal::register::io_bank0::IoBank0;
use crate::internal::register::pio::{PioRegs, dreq, instr_jmp};
use crate::internal::register::sio::SioRegs;

use super::SmProgram;

// =============================================================================
// Transmit
// =============================================================================

/// Transmit state machine fed by a DMA channel
///
/// The state machine runs continuously from init; it shifts out whatever
/// symbols arrive in its FIFO and idles with TX_EN low in between.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PioTx {
    pio: PioRegs,
    sm: u8,
    dma: DmaChannel,
    ctrl: u32,
}

impl PioTx {
    pub(crate) const fn new(pio_index: u8, sm: u8, dma: u8) -> Self {
        Self {
            pio: PioRegs::new(pio_index),
            sm,
            dma: DmaChannel::new(dma),
            ctrl: channel_ctrl(dma, dreq(pio_index, sm, true), true, false),
        }
    }

    /// DMA channel number
    pub const fn dma_channel(&self) -> u8 {
        self.dma.index()
    }
}

impl TxPath for PioTx {
    #[inline(always)]
    fn is_busy(&self) -> bool {
        self.dma.is_busy()
    }

    unsafe fn start(&mut self, symbols: *const u8, len: usize) {
        let fifo = self.pio.txf_addr(self.sm) + FIFO_MSB_LANE;
        self.dma.start(symbols as usize, fifo, len, self.ctrl);
    }
}

// =============================================================================
// Receive
// =============================================================================

/// Receive state machine draining into a DMA channel
///
/// Disabled between captures; [`restart_receiver`](RxPath::restart_receiver)
/// reloads its configuration and jumps to the program entry.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PioRx {
    pio: PioRegs,
    pio_index: u8,
    sm: u8,
    dma: DmaChannel,
    ctrl: u32,
    program: SmProgram,
    crs_dv_pin: u8,
}

impl PioRx {
    pub(crate) const fn new(
        pio_index: u8,
        sm: u8,
        dma: u8,
        program: SmProgram,
        crs_dv_pin: u8,
    ) -> Self {
        Self {
            pio: PioRegs::new(pio_index),
            pio_index,
            sm,
            dma: DmaChannel::new(dma),
            ctrl: channel_ctrl(dma, dreq(pio_index, sm, false), false, true),
            program,
            crs_dv_pin,
        }
    }

    /// DMA channel number
    pub const fn dma_channel(&self) -> u8 {
        self.dma.index()
    }

    /// PIO block the receiver runs on
    pub const fn pio_index(&self) -> u8 {
        self.pio_index
    }
}

impl RxPath for PioRx {
    type Abort = CarrierAbort;

    #[inline(always)]
    fn is_busy(&self) -> bool {
        self.dma.is_busy()
    }

    unsafe fn start(&mut self, window: *mut u8, len: usize) {
        let fifo = self.pio.rxf_addr(self.sm) + FIFO_MSB_LANE;
        self.dma.start(fifo, window as usize, len, self.ctrl);
    }

    fn restart_receiver(&mut self) {
        let sm = self.sm;
        let program = &self.program;

        self.pio.set_sm_enabled(sm, false);
        self.pio.configure_sm(
            sm,
            program.clkdiv,
            program.execctrl,
            program.shiftctrl,
            program.pinctrl,
        );
        self.pio.clear_fifos(sm);
        self.pio.clear_debug_flags(sm);
        self.pio.restart_sm(sm);
        self.pio.exec(sm, instr_jmp(program.offset));
        self.pio.set_sm_enabled(sm, true);
    }

    // Armed for the polling core; its IO_IRQ_BANK0 handler takes the edge
    fn arm_carrier_irq(&mut self) {
        IoBank0::ack_edge_low(self.crs_dv_pin);
        IoBank0::enable_edge_low(SioRegs::current_core(), self.crs_dv_pin);
    }

    fn abort_handle(&self) -> CarrierAbort {
        CarrierAbort {
            pio: self.pio,
            sm: self.sm,
            dma: self.dma,
            crs_dv_pin: self.crs_dv_pin,
        }
    }
}

// =============================================================================
// Carrier Abort
// =============================================================================

/// Interrupt-side receive controls.
///
/// Every operation is a single write to an atomic alias or a
/// write-1-to-clear register, plus the bounded DMA abort wait.
///
/// The edge interrupt is only enabled for the core that ran the last poll,
/// so the handler runs on that core and reads its own enable and status
/// registers.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CarrierAbort {
    pio: PioRegs,
    sm: u8,
    dma: DmaChannel,
    crs_dv_pin: u8,
}

impl CarrierAbort {
    /// GPIO the falling-edge interrupt is armed on
    pub const fn crs_dv_pin(&self) -> u8 {
        self.crs_dv_pin
    }
}

impl RxAbort for CarrierAbort {
    #[inline(always)]
    fn disable_receiver(&mut self) {
        self.pio.set_sm_enabled(self.sm, false);
    }

    #[inline(always)]
    fn abort_capture(&mut self) {
        self.dma.abort();
    }

    #[inline(always)]
    fn disarm_carrier_irq(&mut self) {
        IoBank0::disable_edge_low(SioRegs::current_core(), self.crs_dv_pin);
    }

    fn take_carrier_edge(&mut self) -> bool {
        if !IoBank0::is_edge_low_pending(SioRegs::current_core(), self.crs_dv_pin) {
            return false;
        }
        IoBank0::ack_edge_low(self.crs_dv_pin);
        true
    }
}
