//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the RMII driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, Ordering};
use std::boxed::Box;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::vec;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::constants::{PHY_ABSENT, SYMBOL_SFD, SYMBOL_TX_EN};
use crate::driver::rmii::RmiiBuffers;
use crate::error::{IoError, Result};
use crate::hal::mdio::{MdioBus, MdioDataPin, bmsr, phy_reg};
use crate::hal::pio::{RxAbort, RxPath, TxPath};
use crate::netif::{NetStack, Rejected};

// =============================================================================
// Mock MDIO Bus
// =============================================================================

#[derive(Debug, Default)]
struct MdioRegisterState {
    registers: RefCell<HashMap<(u8, u8), u16>>,
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    read_log: RefCell<Vec<(u8, u8)>>,
    unset_value: Cell<u16>,
    fail: Cell<bool>,
}

/// Mock MDIO bus for testing PHY drivers without hardware
///
/// Clones share the same register map, so a test can keep a handle while
/// the driver owns another.
///
/// # Example
///
/// ```ignore
/// let mdio = MockMdioBus::new();
/// mdio.set_register(0, 0x01, 0x786D); // Set BMSR with link up
///
/// let phy = GenericPhy::new(0);
/// assert!(phy.is_link_up(&mut mdio.clone()).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMdioBus {
    state: Rc<MdioRegisterState>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus; unset registers read as 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus with nothing attached; unset registers read as 0xFFFF
    pub fn empty() -> Self {
        let bus = Self::default();
        bus.state.unset_value.set(PHY_ABSENT);
        bus
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.state
            .registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.state
            .registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.state.write_log.borrow().clone()
    }

    /// Get all reads that have been made
    pub fn get_reads(&self) -> Vec<(u8, u8)> {
        self.state.read_log.borrow().clone()
    }

    /// Clear the write and read logs
    pub fn clear_log(&self) {
        self.state.write_log.borrow_mut().clear();
        self.state.read_log.borrow_mut().clear();
    }

    /// Make every access fail with a PHY error
    pub fn set_failing(&self, fail: bool) {
        self.state.fail.set(fail);
    }

    /// Set or clear the BMSR link bit
    pub fn set_link(&self, phy_addr: u8, up: bool) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        if up {
            bmsr_val |= bmsr::LINK_STATUS;
        } else {
            bmsr_val &= !bmsr::LINK_STATUS;
        }
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        if self.state.fail.get() {
            return Err(IoError::PhyError.into());
        }
        self.state.read_log.borrow_mut().push((phy_addr, reg_addr));
        Ok(self
            .get_register(phy_addr, reg_addr)
            .unwrap_or(self.state.unset_value.get()))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        if self.state.fail.get() {
            return Err(IoError::PhyError.into());
        }
        self.state
            .write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));
        self.set_register(phy_addr, reg_addr, value);
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Bit-Level MDIO PHY Simulator
// =============================================================================

#[derive(Debug, Default)]
struct MdioWire {
    registers: HashMap<(u8, u8), u16>,
    writes: Vec<(u8, u8, u16)>,
    mdc_high: bool,
    driven: bool,
    latch: bool,
    frames: Vec<Vec<bool>>,
    read_value: Option<u16>,
    released_edges: u32,
    rising_edges: u32,
    fail: bool,
}

fn field(bits: &[bool]) -> u16 {
    bits.iter().fold(0u16, |acc, &b| (acc << 1) | b as u16)
}

impl MdioWire {
    fn rising_edge(&mut self) {
        self.rising_edges += 1;
        if self.driven {
            let latch = self.latch;
            if let Some(frame) = self.frames.last_mut() {
                frame.push(latch);
            }
        } else {
            self.released_edges += 1;
        }
    }

    fn phy_present(&self, phy: u8) -> bool {
        self.registers.keys().any(|&(p, _)| p == phy)
    }

    fn end_of_drive(&mut self) {
        self.released_edges = 0;
        self.read_value = None;
        let Some(bits) = self.frames.last() else {
            return;
        };
        if bits.len() < 46 {
            return;
        }
        let phy = field(&bits[36..41]) as u8;
        let reg = field(&bits[41..46]) as u8;
        match (bits[34], bits[35]) {
            (true, false) if self.phy_present(phy) => {
                self.read_value = Some(self.registers.get(&(phy, reg)).copied().unwrap_or(0));
            }
            (false, true) if bits.len() == 64 => {
                let value = field(&bits[48..64]);
                self.registers.insert((phy, reg), value);
                self.writes.push((phy, reg, value));
            }
            _ => {}
        }
    }

    fn sample(&self) -> bool {
        if self.driven {
            return self.latch;
        }
        match self.read_value {
            // Edges 1 and 2 are the turnaround, data starts on edge 3
            Some(value) if (3..19).contains(&self.released_edges) => {
                let index = self.released_edges - 3;
                (value >> (15 - index)) & 1 != 0
            }
            // Pulled up when nobody drives it
            _ => true,
        }
    }
}

/// Error returned by the mock pins when failure injection is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Clause-22 PHY simulated at the wire level
///
/// Hands out an MDC pin and an MDIO pin that share the simulated wire.
/// Every frame the master drives is recorded bit by bit (one entry per
/// rising MDC edge), reads are answered from a register map and writes
/// are applied to it. Addresses with no registers never answer, so the
/// line floats high.
#[derive(Debug, Clone, Default)]
pub struct MockMdioPhy {
    wire: Rc<RefCell<MdioWire>>,
}

impl MockMdioPhy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mdc(&self) -> MockMdc {
        MockMdc {
            wire: self.wire.clone(),
        }
    }

    pub fn mdio(&self) -> MockMdio {
        MockMdio {
            wire: self.wire.clone(),
        }
    }

    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.wire
            .borrow_mut()
            .registers
            .insert((phy_addr, reg_addr), value);
    }

    pub fn register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.wire.borrow().registers.get(&(phy_addr, reg_addr)).copied()
    }

    pub fn writes(&self) -> Vec<(u8, u8, u16)> {
        self.wire.borrow().writes.clone()
    }

    /// Bits driven by the master, one vector per transaction
    pub fn frames(&self) -> Vec<Vec<bool>> {
        self.wire.borrow().frames.clone()
    }

    pub fn is_driven(&self) -> bool {
        self.wire.borrow().driven
    }

    pub fn rising_edges(&self) -> u32 {
        self.wire.borrow().rising_edges
    }

    pub fn fail_pins(&self, fail: bool) {
        self.wire.borrow_mut().fail = fail;
    }
}

/// MDC side of [`MockMdioPhy`]
#[derive(Debug)]
pub struct MockMdc {
    wire: Rc<RefCell<MdioWire>>,
}

impl ErrorType for MockMdc {
    type Error = MockPinError;
}

impl OutputPin for MockMdc {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        wire.mdc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        if !wire.mdc_high {
            wire.mdc_high = true;
            wire.rising_edge();
        }
        Ok(())
    }
}

/// MDIO side of [`MockMdioPhy`]
#[derive(Debug)]
pub struct MockMdio {
    wire: Rc<RefCell<MdioWire>>,
}

impl ErrorType for MockMdio {
    type Error = MockPinError;
}

impl OutputPin for MockMdio {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        wire.latch = false;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        wire.latch = true;
        Ok(())
    }
}

impl InputPin for MockMdio {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        let wire = self.wire.borrow();
        if wire.fail {
            return Err(MockPinError);
        }
        Ok(wire.sample())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl MdioDataPin for MockMdio {
    fn drive(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        wire.driven = true;
        wire.frames.push(Vec::new());
        Ok(())
    }

    fn release(&mut self) -> core::result::Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail {
            return Err(MockPinError);
        }
        if wire.driven {
            wire.driven = false;
            wire.end_of_drive();
        }
        Ok(())
    }
}

fn mdio_header(op: [bool; 2], phy_addr: u8, reg_addr: u8) -> Vec<bool> {
    let mut bits = vec![true; 32];
    bits.extend_from_slice(&[false, true]);
    bits.extend_from_slice(&op);
    bits.extend((0..5).rev().map(|i| (phy_addr >> i) & 1 != 0));
    bits.extend((0..5).rev().map(|i| (reg_addr >> i) & 1 != 0));
    bits
}

/// Bits a clause-22 read drives before releasing the line
pub fn mdio_read_frame(phy_addr: u8, reg_addr: u8) -> Vec<bool> {
    mdio_header([true, false], phy_addr, reg_addr)
}

/// Bits a clause-22 write drives
pub fn mdio_write_frame(phy_addr: u8, reg_addr: u8, value: u16) -> Vec<bool> {
    let mut bits = mdio_header([false, true], phy_addr, reg_addr);
    bits.extend_from_slice(&[true, false]);
    bits.extend((0..16).rev().map(|i| (value >> i) & 1 != 0));
    bits
}

// =============================================================================
// Mock TX Path
// =============================================================================

#[derive(Debug, Default)]
struct TxWire {
    busy_polls: Cell<u32>,
    remaining: Cell<u32>,
    in_flight: RefCell<Option<(*const u8, usize)>>,
    transmitted: RefCell<Vec<Vec<u8>>>,
    busy_checks: Cell<u32>,
    overlapped: Cell<bool>,
}

impl TxWire {
    /// Copies the symbols out at completion, so anything that scribbles on
    /// the buffer while the transfer runs shows up as corruption.
    fn complete(&self) {
        if let Some((ptr, len)) = self.in_flight.borrow_mut().take() {
            // SAFETY: the driver keeps the symbol buffer alive and untouched
            // until the path reports idle, which is exactly what is under test.
            let symbols = unsafe { core::slice::from_raw_parts(ptr, len) };
            self.transmitted.borrow_mut().push(symbols.to_vec());
        }
    }

    fn complete_if_idle(&self) {
        if self.remaining.get() == 0 {
            self.complete();
        }
    }
}

/// TX DMA path that stays busy for a configurable number of polls
#[derive(Debug, Clone, Default)]
pub struct MockTxPath {
    wire: Rc<TxWire>,
}

impl MockTxPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `is_busy` polls each transfer stays busy for
    pub fn set_busy_polls(&self, polls: u32) {
        self.wire.busy_polls.set(polls);
    }

    /// Symbol streams of completed transfers
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.wire.complete_if_idle();
        self.wire.transmitted.borrow().clone()
    }

    /// Finish the in-flight transfer, if any
    pub fn finish(&self) {
        self.wire.complete();
    }

    pub fn busy_checks(&self) -> u32 {
        self.wire.busy_checks.get()
    }

    /// True if a transfer was started while another was in flight
    pub fn overlapped(&self) -> bool {
        self.wire.overlapped.get()
    }
}

impl TxPath for MockTxPath {
    fn is_busy(&self) -> bool {
        let wire = &self.wire;
        wire.busy_checks.set(wire.busy_checks.get() + 1);
        if wire.in_flight.borrow().is_none() {
            return false;
        }
        let left = wire.remaining.get();
        if left == 0 {
            wire.complete();
            return false;
        }
        wire.remaining.set(left - 1);
        true
    }

    unsafe fn start(&mut self, symbols: *const u8, len: usize) {
        let wire = &self.wire;
        if wire.in_flight.borrow().is_some() {
            if wire.remaining.get() > 0 {
                wire.overlapped.set(true);
            }
            wire.complete();
        }
        *wire.in_flight.borrow_mut() = Some((symbols, len));
        wire.remaining.set(wire.busy_polls.get());
    }
}

// =============================================================================
// Mock RX Path
// =============================================================================

#[derive(Debug, Default)]
struct RxWire {
    captures: RefCell<VecDeque<Vec<u8>>>,
    busy_polls: Cell<u32>,
    remaining: Cell<u32>,
    armed: Cell<bool>,
    starts: Cell<u32>,
    restarts: Cell<u32>,
    irq_armed: Cell<bool>,
    edge_pending: Cell<bool>,
    receiver_enabled: Cell<bool>,
    aborts: Cell<u32>,
    window_was_clear: Cell<bool>,
    log: RefCell<Vec<&'static str>>,
}

/// RX DMA path fed from a queue of captures
///
/// Each `start` copies the next queued capture into the window (or leaves
/// it zeroed) and stays busy for the configured number of polls.
#[derive(Debug, Clone, Default)]
pub struct MockRxPath {
    wire: Rc<RxWire>,
}

impl MockRxPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the next capture
    pub fn queue_capture(&self, bytes: Vec<u8>) {
        self.wire.captures.borrow_mut().push_back(bytes);
    }

    /// Number of `is_busy` polls each capture stays busy for
    pub fn set_busy_polls(&self, polls: u32) {
        self.wire.busy_polls.set(polls);
    }

    pub fn starts(&self) -> u32 {
        self.wire.starts.get()
    }

    pub fn restarts(&self) -> u32 {
        self.wire.restarts.get()
    }

    pub fn irq_armed(&self) -> bool {
        self.wire.irq_armed.get()
    }

    /// Simulate CRS_DV falling; only latched while the interrupt is armed
    pub fn raise_carrier_edge(&self) {
        if self.wire.irq_armed.get() {
            self.wire.edge_pending.set(true);
        }
    }

    pub fn receiver_enabled(&self) -> bool {
        self.wire.receiver_enabled.get()
    }

    pub fn aborts(&self) -> u32 {
        self.wire.aborts.get()
    }

    /// Whether the window was all zeroes when the last capture started
    pub fn window_was_clear(&self) -> bool {
        self.wire.window_was_clear.get()
    }

    /// Order of re-arm operations
    pub fn log(&self) -> Vec<&'static str> {
        self.wire.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.wire.log.borrow_mut().clear();
    }
}

impl RxPath for MockRxPath {
    type Abort = MockRxAbort;

    fn is_busy(&self) -> bool {
        let wire = &self.wire;
        if !wire.armed.get() {
            return false;
        }
        let left = wire.remaining.get();
        if left == 0 {
            wire.armed.set(false);
            return false;
        }
        wire.remaining.set(left - 1);
        true
    }

    unsafe fn start(&mut self, window: *mut u8, len: usize) {
        let wire = &self.wire;
        // SAFETY: the driver hands over its window for the whole transfer.
        let window = unsafe { core::slice::from_raw_parts_mut(window, len) };
        wire.window_was_clear.set(window.iter().all(|&b| b == 0));
        if let Some(capture) = wire.captures.borrow_mut().pop_front() {
            let n = capture.len().min(len);
            window[..n].copy_from_slice(&capture[..n]);
        }
        wire.starts.set(wire.starts.get() + 1);
        wire.armed.set(true);
        wire.remaining.set(wire.busy_polls.get());
        wire.log.borrow_mut().push("start");
    }

    fn restart_receiver(&mut self) {
        let wire = &self.wire;
        wire.restarts.set(wire.restarts.get() + 1);
        wire.receiver_enabled.set(true);
        wire.log.borrow_mut().push("restart");
    }

    fn arm_carrier_irq(&mut self) {
        self.wire.edge_pending.set(false);
        self.wire.irq_armed.set(true);
        self.wire.log.borrow_mut().push("arm");
    }

    fn abort_handle(&self) -> MockRxAbort {
        MockRxAbort {
            wire: self.wire.clone(),
        }
    }
}

/// Restricted handle over [`MockRxPath`] for the carrier-loss path
#[derive(Debug, Clone)]
pub struct MockRxAbort {
    wire: Rc<RxWire>,
}

impl RxAbort for MockRxAbort {
    fn disable_receiver(&mut self) {
        self.wire.receiver_enabled.set(false);
    }

    fn abort_capture(&mut self) {
        self.wire.armed.set(false);
        self.wire.remaining.set(0);
        self.wire.aborts.set(self.wire.aborts.get() + 1);
    }

    fn disarm_carrier_irq(&mut self) {
        self.wire.irq_armed.set(false);
    }

    fn take_carrier_edge(&mut self) -> bool {
        self.wire.edge_pending.replace(false)
    }
}

/// Capture state reachable from a `static`, for handlers that need a `Copy`
/// abort handle
#[derive(Debug)]
pub struct MockStaticWire {
    capturing: AtomicBool,
    receiver_enabled: AtomicBool,
    irq_armed: AtomicBool,
    edge_pending: AtomicBool,
}

impl MockStaticWire {
    /// A capture in progress with the carrier interrupt armed
    pub const fn capturing() -> Self {
        Self {
            capturing: AtomicBool::new(true),
            receiver_enabled: AtomicBool::new(true),
            irq_armed: AtomicBool::new(true),
            edge_pending: AtomicBool::new(false),
        }
    }

    pub fn abort_handle(&'static self) -> MockStaticAbort {
        MockStaticAbort { wire: self }
    }

    /// Latch a CRS_DV falling edge if the interrupt is armed
    pub fn raise_carrier_edge(&self) {
        if self.irq_armed.load(Ordering::SeqCst) {
            self.edge_pending.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    pub fn receiver_enabled(&self) -> bool {
        self.receiver_enabled.load(Ordering::SeqCst)
    }

    pub fn irq_armed(&self) -> bool {
        self.irq_armed.load(Ordering::SeqCst)
    }
}

/// `Copy` abort handle over a [`MockStaticWire`]
#[derive(Debug, Clone, Copy)]
pub struct MockStaticAbort {
    wire: &'static MockStaticWire,
}

impl RxAbort for MockStaticAbort {
    fn disable_receiver(&mut self) {
        self.wire.receiver_enabled.store(false, Ordering::SeqCst);
    }

    fn abort_capture(&mut self) {
        self.wire.capturing.store(false, Ordering::SeqCst);
    }

    fn disarm_carrier_irq(&mut self) {
        self.wire.irq_armed.store(false, Ordering::SeqCst);
    }

    fn take_carrier_edge(&mut self) -> bool {
        self.wire.edge_pending.swap(false, Ordering::SeqCst)
    }
}

// =============================================================================
// Mock Network Stack
// =============================================================================

/// Records everything the driver hands to the stack
#[derive(Debug, Default)]
pub struct MockNetStack {
    pub frames: Vec<Vec<u8>>,
    pub link_events: Vec<bool>,
    pub timeout_calls: u32,
    pub reject: bool,
}

impl MockNetStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

impl NetStack for MockNetStack {
    fn input(&mut self, frame: &[u8]) -> core::result::Result<(), Rejected> {
        if self.reject {
            return Err(Rejected);
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn link_changed(&mut self, up: bool) {
        self.link_events.push(up);
    }

    fn service_timeouts(&mut self) {
        self.timeout_calls += 1;
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Fresh driver buffers with a `'static` lifetime
pub fn leak_buffers() -> &'static mut RmiiBuffers {
    Box::leak(Box::new(RmiiBuffers::new()))
}

/// Loop a transmit symbol stream back into the bytes a receiver captures.
///
/// Skips the preamble up to the start-of-frame delimiter, then packs
/// dibits LSB-first for as long as TX_EN is set.
pub fn symbols_to_bytes(symbols: &[u8]) -> Vec<u8> {
    let Some(sfd) = symbols.iter().position(|&s| s == SYMBOL_SFD) else {
        return Vec::new();
    };
    let data: Vec<u8> = symbols[sfd + 1..]
        .iter()
        .take_while(|&&s| s & SYMBOL_TX_EN != 0)
        .map(|&s| s & 0x03)
        .collect();
    data.chunks_exact(4)
        .map(|d| d[0] | (d[1] << 2) | (d[2] << 4) | (d[3] << 6))
        .collect()
}

// =============================================================================
// Test Assertions
// =============================================================================

/// Assert that a register was written with a specific value
#[macro_export]
macro_rules! assert_reg_written {
    ($mdio:expr, $phy:expr, $reg:expr, $value:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes
                .iter()
                .any(|w| w.0 == $phy && w.1 == $reg && w.2 == $value),
            "Expected write to PHY {} reg {} with value 0x{:04X}, but got: {:?}",
            $phy,
            $reg,
            $value,
            writes
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1).unwrap(), 0);

        mdio.set_register(0, 1, 0x1234);
        assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);

        mdio.write(0, 1, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1).unwrap(), 0x5678);

        assert_eq!(mdio.get_writes(), vec![(0, 1, 0x5678)]);
    }

    #[test]
    fn mock_mdio_clones_share_registers() {
        let mdio = MockMdioBus::empty();
        let mut other = mdio.clone();

        assert_eq!(other.read(4, 0).unwrap(), 0xFFFF);
        mdio.set_register(4, 0, 0x3100);
        assert_eq!(other.read(4, 0).unwrap(), 0x3100);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_us(&mut delay, 2);

        assert_eq!(delay.total_ns(), 3000);
    }

    #[test]
    fn loopback_packs_dibits_lsb_first() {
        let symbols = [0x05, 0x05, 0x07, 0x04 | 0b01, 0x04 | 0b10, 0x04, 0x04 | 0b11, 0x00];
        assert_eq!(symbols_to_bytes(&symbols), vec![0b11_00_10_01]);
    }

    #[test]
    fn mock_tx_stays_busy_for_configured_polls() {
        let mut tx = MockTxPath::new();
        tx.set_busy_polls(2);
        let symbols = [0x05u8, 0x07];

        unsafe { tx.start(symbols.as_ptr(), symbols.len()) };
        assert!(tx.is_busy());
        assert!(tx.is_busy());
        assert!(!tx.is_busy());
        assert_eq!(tx.transmitted(), vec![vec![0x05, 0x07]]);
    }

    #[test]
    fn mock_rx_abort_clears_busy() {
        let mut rx = MockRxPath::new();
        rx.set_busy_polls(100);
        let mut window = [0u8; 8];

        unsafe { rx.start(window.as_mut_ptr(), window.len()) };
        assert!(rx.is_busy());

        let mut abort = rx.abort_handle();
        abort.abort_capture();
        assert!(!rx.is_busy());
    }
}
