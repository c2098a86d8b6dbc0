//! CH9120 driver
//!
//! The driver owns the capabilities it was built with and tracks whether
//! the chip has been brought up. Register accessors live in
//! [`registers`](super::registers); this module covers the lifecycle, the
//! data passthrough and the raw command interface.
//!
//! # Lifecycle
//!
//! ```text
//! Unbound --init--> Ready --deinit--> Closed
//! ```
//!
//! Every operation other than `init` and `info` requires `Ready`.

use embedded_hal::delay::DelayNs;

use super::config::{ChipInfo, NetConfig, State};
use super::error::{Capability, ConfigError, IoError, Result};
use crate::hal::gpio::{ControlLine, Level};
use crate::hal::reset::{ResetTiming, hardware_reset};
use crate::hal::uart::UartBus;
use crate::internal::constants::{COMMAND_TIMEOUT_MS, DEINIT_SETTLE_MS, PRE_DELAY_MS};
use crate::internal::opcodes;
use crate::transport::{CommandLink, Frame};

/// Bound capabilities returned by [`Ch9120::release`]
pub type Parts<U, R, C, D> = (Option<U>, Option<R>, Option<C>, Option<D>);

/// CH9120 UART-to-Ethernet bridge driver
///
/// # Type Parameters
///
/// * `U` - UART link ([`UartBus`])
/// * `R` - Reset line ([`ControlLine`])
/// * `C` - Config-enable line ([`ControlLine`])
/// * `D` - Delay provider ([`DelayNs`])
///
/// # Example
///
/// ```ignore
/// let mut ch9120 = Ch9120::new()
///     .with_uart(SerialUart::new(uart1))
///     .with_reset_line(PinLine::new(rst))
///     .with_config_line(PinLine::new(cfg))
///     .with_delay(delay);
///
/// ch9120.init()?;
/// ch9120.configure(&NetConfig::new().with_mode(Mode::TcpServer))?;
/// ch9120.write(b"hello")?;
/// ```
#[derive(Debug)]
pub struct Ch9120<U, R, C, D> {
    uart: Option<U>,
    reset_line: Option<R>,
    config_line: Option<C>,
    delay: Option<D>,
    state: State,
    frame: Frame,
}

impl<U, R, C, D> Default for Ch9120<U, R, C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, R, C, D> Ch9120<U, R, C, D> {
    /// Create an unbound driver
    #[must_use]
    pub const fn new() -> Self {
        Self {
            uart: None,
            reset_line: None,
            config_line: None,
            delay: None,
            state: State::Unbound,
            frame: Frame::new(),
        }
    }

    /// Create a driver with every capability bound
    #[must_use]
    pub const fn from_parts(uart: U, reset_line: R, config_line: C, delay: D) -> Self {
        Self {
            uart: Some(uart),
            reset_line: Some(reset_line),
            config_line: Some(config_line),
            delay: Some(delay),
            state: State::Unbound,
            frame: Frame::new(),
        }
    }

    // =========================================================================
    // Capability Binding
    // =========================================================================

    /// Bind the UART link
    #[must_use]
    pub fn with_uart(mut self, uart: U) -> Self {
        self.uart = Some(uart);
        self
    }

    /// Bind the reset line
    #[must_use]
    pub fn with_reset_line(mut self, line: R) -> Self {
        self.reset_line = Some(line);
        self
    }

    /// Bind the config-enable line
    #[must_use]
    pub fn with_config_line(mut self, line: C) -> Self {
        self.config_line = Some(line);
        self
    }

    /// Bind the delay provider
    #[must_use]
    pub fn with_delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Check whether commands can be issued
    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    /// Static chip and driver metadata
    ///
    /// Available in every state.
    pub const fn info() -> ChipInfo {
        ChipInfo::CH9120
    }

    /// Consume the driver and hand back the bound capabilities
    ///
    /// The chip is left as is; call [`deinit`](Self::deinit) first for an
    /// orderly shutdown.
    pub fn release(self) -> Parts<U, R, C, D> {
        (self.uart, self.reset_line, self.config_line, self.delay)
    }

    pub(super) fn ensure_ready(&self) -> Result<()> {
        if self.state == State::Ready {
            Ok(())
        } else {
            diag!(error, "ch9120: handle is not inited.");
            Err(IoError::NotInitialized.into())
        }
    }
}

/// Borrow a bound capability or report which one is missing
fn require<T>(slot: Option<&mut T>, cap: Capability) -> Result<&mut T> {
    slot.ok_or_else(|| {
        diag!(error, "ch9120: {} is null.", cap.as_str());
        ConfigError::MissingCapability(cap).into()
    })
}

impl<U, R, C, D> Ch9120<U, R, C, D>
where
    U: UartBus,
    R: ControlLine,
    C: ControlLine,
    D: DelayNs,
{
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bring up the capabilities and hardware-reset the chip
    ///
    /// Steps, each rolling back the ones before it on failure:
    /// 1. UART init
    /// 2. Reset line init
    /// 3. Config line init
    /// 4. Reset pulse (low 10 ms, high, 500 ms boot wait)
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AlreadyInitialized`] if `init` already succeeded
    /// - [`ConfigError::MissingCapability`] if a capability is not bound
    /// - the step-specific [`ConfigError`] of the first failing step
    pub fn init(&mut self) -> Result<()> {
        if self.state != State::Unbound {
            return Err(ConfigError::AlreadyInitialized.into());
        }
        let uart = require(self.uart.as_mut(), Capability::Uart)?;
        let reset = require(self.reset_line.as_mut(), Capability::ResetLine)?;
        let cfg = require(self.config_line.as_mut(), Capability::ConfigLine)?;
        let delay = require(self.delay.as_mut(), Capability::Delay)?;

        if uart.init().is_err() {
            diag!(error, "ch9120: uart init failed.");
            return Err(ConfigError::UartInitFailed.into());
        }
        if reset.init().is_err() {
            diag!(error, "ch9120: reset gpio init failed.");
            let _ = uart.deinit();
            return Err(ConfigError::ResetGpioInitFailed.into());
        }
        if cfg.init().is_err() {
            diag!(error, "ch9120: cfg gpio init failed.");
            let _ = uart.deinit();
            let _ = reset.deinit();
            return Err(ConfigError::CfgGpioInitFailed.into());
        }
        if let Err(e) = hardware_reset(reset, delay, ResetTiming::DEFAULT) {
            diag!(error, "ch9120: reset failed.");
            let _ = uart.deinit();
            let _ = reset.deinit();
            let _ = cfg.deinit();
            return Err(e.into());
        }

        self.state = State::Ready;
        diag!(debug, "ch9120: ready.");
        Ok(())
    }

    /// Reset the chip and release the capabilities
    ///
    /// The driver is closed once the reset command has been acknowledged,
    /// even if releasing a capability afterwards fails.
    ///
    /// # Errors
    ///
    /// - [`IoError::NotInitialized`] if the driver is not ready
    /// - [`ConfigError::ResetCommandFailed`] if the chip rejects the reset
    /// - the [`ConfigError`] of the first capability that fails to deinit
    pub fn deinit(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if let Err(e) = self.check(&[opcodes::RESET], PRE_DELAY_MS, COMMAND_TIMEOUT_MS) {
            diag!(error, "ch9120: reset failed: {}", e);
            return Err(ConfigError::ResetCommandFailed.into());
        }
        self.state = State::Closed;

        if let Some(delay) = self.delay.as_mut() {
            delay.delay_ms(DEINIT_SETTLE_MS);
        }
        if let Some(uart) = self.uart.as_mut()
            && uart.deinit().is_err()
        {
            diag!(error, "ch9120: uart deinit failed.");
            return Err(ConfigError::UartDeinitFailed.into());
        }
        if let Some(reset) = self.reset_line.as_mut()
            && reset.deinit().is_err()
        {
            diag!(error, "ch9120: reset gpio deinit failed.");
            return Err(ConfigError::ResetGpioDeinitFailed.into());
        }
        if let Some(cfg) = self.config_line.as_mut()
            && cfg.deinit().is_err()
        {
            diag!(error, "ch9120: cfg gpio deinit failed.");
            return Err(ConfigError::CfgGpioDeinitFailed.into());
        }
        diag!(debug, "ch9120: closed.");
        Ok(())
    }

    // =========================================================================
    // Data Plane
    // =========================================================================

    /// Send bytes to the network peer
    ///
    /// Switches the chip to data mode and transmits `buf` unchanged.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.ensure_ready()?;
        let uart = require(self.uart.as_mut(), Capability::Uart)?;
        let cfg = require(self.config_line.as_mut(), Capability::ConfigLine)?;
        if cfg.set_level(Level::High).is_err() {
            diag!(error, "ch9120: cfg gpio write failed.");
            return Err(IoError::ConfigPinFailed.into());
        }
        if uart.write(buf).is_err() {
            diag!(error, "ch9120: uart write failed.");
            return Err(IoError::WriteFailed.into());
        }
        Ok(())
    }

    /// Receive bytes from the network peer
    ///
    /// Performs a single non-blocking read and returns how many bytes were
    /// copied into `buf`, which may be zero.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.ensure_ready()?;
        let uart = require(self.uart.as_mut(), Capability::Uart)?;
        let cfg = require(self.config_line.as_mut(), Capability::ConfigLine)?;
        if cfg.set_level(Level::High).is_err() {
            diag!(error, "ch9120: cfg gpio write failed.");
            return Err(IoError::ConfigPinFailed.into());
        }
        uart.read(buf).map_err(|_| {
            diag!(error, "ch9120: uart read failed.");
            IoError::ReadFailed.into()
        })
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Send a raw command and collect a fixed-length response
    ///
    /// `param` is the opcode followed by its parameters (at most 126 bytes).
    /// Exactly `out.len()` bytes are awaited within `timeout_ms`.
    pub fn command(
        &mut self,
        param: &[u8],
        out: &mut [u8],
        pre_delay_ms: u32,
        timeout_ms: u32,
    ) -> Result<()> {
        self.link()?.write_read(param, out, pre_delay_ms, timeout_ms)
    }

    /// Apply a complete profile, save it and restart the chip
    ///
    /// Settings are written in a fixed order and the first failure aborts
    /// the sequence. The new values take effect after the final
    /// apply-and-reset.
    ///
    /// # Errors
    ///
    /// - [`IoError::NotInitialized`] if the driver is not ready
    /// - [`ConfigError::InvalidConfig`] if the profile fails
    ///   [`NetConfig::validate`]; nothing is sent to the chip
    /// - the error of the first failing step
    pub fn configure(&mut self, config: &NetConfig) -> Result<()> {
        self.ensure_ready()?;
        if let Err(e) = config.validate() {
            diag!(error, "ch9120: uart timeout {} ms is out of range.", config.uart_timeout_ms);
            return Err(e.into());
        }
        let timeout_reg = self.uart_timeout_to_register(config.uart_timeout_ms)?;

        step("set dhcp", self.set_dhcp(config.dhcp))?;
        step("set ip", self.set_ip(config.ip))?;
        step("set mask", self.set_subnet_mask(config.subnet_mask))?;
        step("set gateway", self.set_gateway(config.gateway))?;
        step("set source port", self.set_source_port(config.source_port))?;
        step("set dest ip", self.set_dest_ip(config.dest_ip))?;
        step("set dest port", self.set_dest_port(config.dest_port))?;
        step("set uart baud", self.set_uart_baud(config.uart_baud))?;
        step("set uart config", self.set_uart_config(config.uart_config))?;
        step("set uart timeout", self.set_uart_timeout(timeout_reg))?;
        step(
            "set source port random",
            self.set_source_port_random(config.source_port_random),
        )?;
        step(
            "set uart buffer length",
            self.set_uart_buffer_length(config.uart_buffer_length),
        )?;
        step("set uart flush", self.set_uart_flush(config.uart_flush))?;
        step(
            "set disconnect without link",
            self.set_disconnect_without_link(config.disconnect_without_link),
        )?;
        step("set mode", self.set_mode(config.mode))?;
        step("save to eeprom", self.save_to_eeprom())?;
        step("config and reset", self.apply_and_reset())
    }

    // =========================================================================
    // Transport Helpers
    // =========================================================================

    pub(super) fn link(&mut self) -> Result<CommandLink<'_, U, C, D>> {
        self.ensure_ready()?;
        let uart = require(self.uart.as_mut(), Capability::Uart)?;
        let cfg = require(self.config_line.as_mut(), Capability::ConfigLine)?;
        let delay = require(self.delay.as_mut(), Capability::Delay)?;
        Ok(CommandLink::new(uart, cfg, delay, &mut self.frame))
    }

    /// Write-check with the given timing
    pub(super) fn check(&mut self, param: &[u8], pre_delay_ms: u32, timeout_ms: u32) -> Result<()> {
        self.link()?.write_check(param, pre_delay_ms, timeout_ms)
    }

    pub(super) fn settle(&mut self, ms: u32) {
        if let Some(delay) = self.delay.as_mut() {
            delay.delay_ms(ms);
        }
    }
}

fn step(name: &str, outcome: Result<()>) -> Result<()> {
    if let Err(e) = outcome {
        diag!(error, "ch9120: {} failed: {}", name, e);
    }
    outcome
}

// =============================================================================
// Unit Tests
// =============================================================================
