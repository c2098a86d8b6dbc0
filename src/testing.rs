//! Testing utilities and a simulated CH9120
//!
//! [`SimChip`] models the chip's command protocol closely enough to drive
//! the whole driver on the host. The mock UART, control lines and delay it
//! hands out share its state, so a test can inspect the exact sequence of
//! bus and pin activity and inject faults at any step.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::error::{ConfigError, IoError, Result};
use crate::hal::gpio::{ControlLine, Level};
use crate::hal::uart::UartBus;
use crate::internal::constants::{ACK, FRAME_HEADER};
use crate::internal::opcodes;

/// Byte the simulated chip returns for an opcode it does not know
pub const UNKNOWN_OPCODE_REPLY: u8 = 0xEE;

/// Firmware version reported by the simulated chip
pub const SIM_VERSION: u8 = 0x05;

// =============================================================================
// Events
// =============================================================================

/// Which control line an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Reset,
    Config,
}

/// Observable activity on the simulated bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    UartInit,
    UartDeinit,
    UartFlush,
    UartWrite(Vec<u8>),
    LineInit(Line),
    LineDeinit(Line),
    LineSet(Line, Level),
    Delay(u32),
}

// =============================================================================
// Chip State
// =============================================================================

#[derive(Debug, Default)]
struct Faults {
    uart_init: bool,
    uart_deinit: bool,
    uart_write: bool,
    uart_read: bool,
    line_init: Vec<Line>,
    line_deinit: Vec<Line>,
    line_write: Vec<Line>,
    line_level: Vec<(Line, Level)>,
}

#[derive(Debug, Default)]
struct ChipState {
    events: Vec<Event>,
    faults: Faults,
    levels: HashMap<Line, Level>,
    /// Working registers, keyed by set opcode
    ram: HashMap<u8, Vec<u8>>,
    /// Persisted registers, keyed by set opcode
    eeprom: HashMap<u8, Vec<u8>>,
    rx: VecDeque<u8>,
    data_tx: Vec<u8>,
    commands: Vec<Vec<u8>>,
    reply_override: Option<Vec<u8>>,
    muted: bool,
    chunk_size: Option<usize>,
    reply_latency: usize,
    pending_latency: usize,
    read_calls: usize,
    link_status: u8,
    total_ns: u64,
}

/// Read-back opcode → (set opcode, response length)
fn readback_layout(opcode: u8) -> Option<(u8, usize)> {
    let layout = match opcode {
        opcodes::GET_MODE => (opcodes::SET_MODE, 1),
        opcodes::GET_IP => (opcodes::SET_IP, 4),
        opcodes::GET_NETMASK => (opcodes::SET_NETMASK, 4),
        opcodes::GET_GATEWAY => (opcodes::SET_GATEWAY, 4),
        opcodes::GET_PORT => (opcodes::SET_PORT, 2),
        opcodes::GET_DST_IP => (opcodes::SET_DST_IP, 4),
        opcodes::GET_DST_PORT => (opcodes::SET_DST_PORT, 2),
        opcodes::GET_BAUD => (opcodes::SET_BAUD, 4),
        opcodes::GET_CONFIG => (opcodes::SET_CONFIG, 3),
        opcodes::GET_TIMEOUT => (opcodes::SET_TIMEOUT, 1),
        opcodes::GET_DISCONNECT => (opcodes::SET_DISCONNECT, 1),
        opcodes::GET_LEN => (opcodes::SET_LEN, 4),
        opcodes::GET_FLUSH => (opcodes::SET_FLUSH, 1),
        _ => return None,
    };
    Some(layout)
}

fn is_register_write(opcode: u8) -> bool {
    matches!(
        opcode,
        opcodes::SET_MODE
            | opcodes::SET_IP
            | opcodes::SET_NETMASK
            | opcodes::SET_GATEWAY
            | opcodes::SET_PORT
            | opcodes::SET_DST_IP
            | opcodes::SET_DST_PORT
            | opcodes::RANDOM_PORT
            | opcodes::SET_BAUD
            | opcodes::SET_CONFIG
            | opcodes::SET_TIMEOUT
            | opcodes::SET_DISCONNECT
            | opcodes::SET_LEN
            | opcodes::SET_FLUSH
            | opcodes::DHCP
    )
}

impl ChipState {
    fn command_mode(&self) -> bool {
        self.levels.get(&Line::Config) == Some(&Level::Low)
    }

    fn execute(&mut self, frame: &[u8]) {
        self.commands.push(frame.to_vec());
        self.pending_latency = self.reply_latency;

        if let Some(reply) = self.reply_override.take() {
            self.rx.extend(reply);
            return;
        }
        if self.muted || frame.len() < 3 || frame[..2] != FRAME_HEADER {
            return;
        }

        let opcode = frame[2];
        let params = &frame[3..];
        match opcode {
            opcodes::CHIP_VERSION => self.rx.push_back(SIM_VERSION),
            opcodes::GET_STATUS => self.rx.push_back(self.link_status),
            opcodes::RESET | opcodes::RUN_AND_RESET => {
                self.ram = self.eeprom.clone();
                self.rx.push_back(ACK);
            }
            opcodes::SAVE_TO_EEPROM => {
                self.eeprom = self.ram.clone();
                self.rx.push_back(ACK);
            }
            opcodes::EXIT => self.rx.push_back(ACK),
            op if is_register_write(op) => {
                self.ram.insert(op, params.to_vec());
                self.rx.push_back(ACK);
            }
            op => match readback_layout(op) {
                Some((reg, len)) => {
                    let mut value = self.ram.get(&reg).cloned().unwrap_or_default();
                    value.resize(len, 0);
                    self.rx.extend(value);
                }
                None => self.rx.push_back(UNKNOWN_OPCODE_REPLY),
            },
        }
    }
}

// =============================================================================
// Simulated Chip
// =============================================================================

/// Simulated CH9120 with shared-state mock peripherals
#[derive(Debug, Clone, Default)]
pub struct SimChip {
    state: Rc<RefCell<ChipState>>,
}

impl SimChip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uart(&self) -> MockUart {
        MockUart {
            state: Rc::clone(&self.state),
        }
    }

    pub fn reset_line(&self) -> MockLine {
        MockLine {
            line: Line::Reset,
            state: Rc::clone(&self.state),
        }
    }

    pub fn config_line(&self) -> MockLine {
        MockLine {
            line: Line::Config,
            state: Rc::clone(&self.state),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    // -------------------------------------------------------------------------
    // Fault injection
    // -------------------------------------------------------------------------

    pub fn fail_uart_init(&self) {
        self.state.borrow_mut().faults.uart_init = true;
    }

    pub fn fail_uart_deinit(&self) {
        self.state.borrow_mut().faults.uart_deinit = true;
    }

    pub fn fail_uart_writes(&self) {
        self.state.borrow_mut().faults.uart_write = true;
    }

    pub fn fail_uart_reads(&self) {
        self.state.borrow_mut().faults.uart_read = true;
    }

    pub fn fail_line_init(&self, line: Line) {
        self.state.borrow_mut().faults.line_init.push(line);
    }

    pub fn fail_line_deinit(&self, line: Line) {
        self.state.borrow_mut().faults.line_deinit.push(line);
    }

    /// Every `set_level` on `line` fails
    pub fn fail_line_writes(&self, line: Line) {
        self.state.borrow_mut().faults.line_write.push(line);
    }

    /// Only driving `line` to `level` fails
    pub fn fail_line_level(&self, line: Line, level: Level) {
        self.state.borrow_mut().faults.line_level.push((line, level));
    }

    /// Answer the next command with `bytes` instead of the modelled reply
    pub fn reply_with(&self, bytes: &[u8]) {
        self.state.borrow_mut().reply_override = Some(bytes.to_vec());
    }

    /// Stop answering commands
    pub fn mute(&self) {
        self.state.borrow_mut().muted = true;
    }

    /// Limit how many bytes a single UART read returns
    pub fn set_chunk_size(&self, bytes: usize) {
        self.state.borrow_mut().chunk_size = Some(bytes);
    }

    /// Number of empty reads before a reply becomes visible
    pub fn set_reply_latency(&self, reads: usize) {
        self.state.borrow_mut().reply_latency = reads;
    }

    // -------------------------------------------------------------------------
    // Chip state
    // -------------------------------------------------------------------------

    /// Queue bytes arriving from the network side
    pub fn push_rx(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn set_link_status(&self, status: u8) {
        self.state.borrow_mut().link_status = status;
    }

    /// Preload a working register, keyed by its set opcode
    pub fn set_register(&self, set_opcode: u8, value: &[u8]) {
        self.state.borrow_mut().ram.insert(set_opcode, value.to_vec());
    }

    pub fn register(&self, set_opcode: u8) -> Option<Vec<u8>> {
        self.state.borrow().ram.get(&set_opcode).cloned()
    }

    pub fn saved_register(&self, set_opcode: u8) -> Option<Vec<u8>> {
        self.state.borrow().eeprom.get(&set_opcode).cloned()
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    /// Forget recorded activity, keeping chip registers and faults
    pub fn clear_history(&self) {
        let mut state = self.state.borrow_mut();
        state.events.clear();
        state.commands.clear();
        state.data_tx.clear();
        state.read_calls = 0;
        state.total_ns = 0;
    }

    /// Frames written while the config line was low
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.state.borrow().commands.clone()
    }

    /// Opcodes of all commands, in order
    pub fn opcodes(&self) -> Vec<u8> {
        self.state
            .borrow()
            .commands
            .iter()
            .filter_map(|frame| frame.get(2).copied())
            .collect()
    }

    /// Bytes written while the config line was high
    pub fn data_written(&self) -> Vec<u8> {
        self.state.borrow().data_tx.clone()
    }

    pub fn read_calls(&self) -> usize {
        self.state.borrow().read_calls
    }

    /// Last level the config line was successfully driven to
    pub fn config_level(&self) -> Option<Level> {
        self.state.borrow().levels.get(&Line::Config).copied()
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.state.borrow().total_ns / 1_000_000
    }
}

// =============================================================================
// Mock UART
// =============================================================================

/// UART connected to the simulated chip
#[derive(Debug)]
pub struct MockUart {
    state: Rc<RefCell<ChipState>>,
}

impl UartBus for MockUart {
    fn init(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.uart_init {
            return Err(ConfigError::UartInitFailed.into());
        }
        state.events.push(Event::UartInit);
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.uart_deinit {
            return Err(ConfigError::UartDeinitFailed.into());
        }
        state.events.push(Event::UartDeinit);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        state.read_calls += 1;
        if state.faults.uart_read {
            return Err(IoError::ReadFailed.into());
        }
        if state.pending_latency > 0 {
            state.pending_latency -= 1;
            return Ok(0);
        }
        let limit = state.chunk_size.unwrap_or(usize::MAX).min(buf.len());
        let mut n = 0;
        while n < limit {
            match state.rx.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.uart_write {
            return Err(IoError::WriteFailed.into());
        }
        state.events.push(Event::UartWrite(data.to_vec()));
        if state.command_mode() {
            state.execute(data);
        } else {
            state.data_tx.extend_from_slice(data);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.rx.clear();
        state.events.push(Event::UartFlush);
        Ok(())
    }
}

// =============================================================================
// Mock Control Line
// =============================================================================

/// Reset or config line wired to the simulated chip
#[derive(Debug)]
pub struct MockLine {
    line: Line,
    state: Rc<RefCell<ChipState>>,
}

impl ControlLine for MockLine {
    fn init(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.line_init.contains(&self.line) {
            return Err(ConfigError::GpioError.into());
        }
        state.events.push(Event::LineInit(self.line));
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.line_deinit.contains(&self.line) {
            return Err(ConfigError::GpioError.into());
        }
        state.events.push(Event::LineDeinit(self.line));
        Ok(())
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faults.line_write.contains(&self.line)
            || state.faults.line_level.contains(&(self.line, level))
        {
            return Err(ConfigError::GpioError.into());
        }
        state.levels.insert(self.line, level);
        state.events.push(Event::LineSet(self.line, level));
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Delay that records requested waits instead of sleeping
#[derive(Debug)]
pub struct MockDelay {
    state: Rc<RefCell<ChipState>>,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut state = self.state.borrow_mut();
        state.total_ns += u64::from(ms) * 1_000_000;
        state.events.push(Event::Delay(ms));
    }
}

// =============================================================================
// Self Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;

    #[test]
    fn set_then_get_through_ram() {
        let chip = SimChip::new();
        let mut cfg = chip.config_line();
        let mut uart = chip.uart();

        cfg.set_level(Level::Low).unwrap();
        uart.write(&[0x57, 0xAB, opcodes::SET_PORT, 0x39, 0x30]).unwrap();
        uart.write(&[0x57, 0xAB, opcodes::GET_PORT]).unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(uart.read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [ACK, 0x39, 0x30]);
    }

    #[test]
    fn data_mode_writes_are_not_commands() {
        let chip = SimChip::new();
        let mut cfg = chip.config_line();
        let mut uart = chip.uart();

        cfg.set_level(Level::High).unwrap();
        uart.write(&[0x57, 0xAB, opcodes::EXIT]).unwrap();

        assert!(chip.commands().is_empty());
        assert_eq!(chip.data_written(), vec![0x57, 0xAB, opcodes::EXIT]);
    }

    #[test]
    fn reset_reloads_saved_registers() {
        let chip = SimChip::new();
        let mut cfg = chip.config_line();
        let mut uart = chip.uart();
        cfg.set_level(Level::Low).unwrap();

        uart.write(&[0x57, 0xAB, opcodes::SET_MODE, 2]).unwrap();
        uart.write(&[0x57, 0xAB, opcodes::RESET]).unwrap();

        assert_eq!(chip.register(opcodes::SET_MODE), None);
    }
}
