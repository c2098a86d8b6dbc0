//! Register accessors
//!
//! Typed get/set wrappers around the CH9120 command set. Every accessor
//! sends `[opcode, payload...]` with a 50 ms pre-delay and a 1000 ms
//! response timeout. Multi-byte integers are little-endian on the wire.
//!
//! Values written here live in the chip's working registers. They survive
//! a restart only after [`Ch9120::save_to_eeprom`] followed by
//! [`Ch9120::apply_and_reset`].
//!
//! DHCP and source-port randomization have no read-back command.

use core::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;

use super::ch9120::Ch9120;
use super::config::{LinkStatus, Mode, UartConfig};
use super::error::Result;
use crate::hal::gpio::ControlLine;
use crate::hal::uart::UartBus;
use crate::internal::constants::{
    COMMAND_TIMEOUT_MS, PRE_DELAY_MS, RESTART_SETTLE_MS, UART_TIMEOUT_UNIT_MS,
};
use crate::internal::opcodes;

// =============================================================================
// Timeout Conversion
// =============================================================================

/// Convert milliseconds to the 5 ms timeout register unit (truncating)
#[must_use]
pub const fn timeout_ms_to_register(ms: u16) -> u8 {
    (ms / UART_TIMEOUT_UNIT_MS) as u8
}

/// Convert a timeout register value to milliseconds
#[must_use]
pub const fn timeout_register_to_ms(reg: u8) -> u16 {
    reg as u16 * UART_TIMEOUT_UNIT_MS
}

impl<U, R, C, D> Ch9120<U, R, C, D>
where
    U: UartBus,
    R: ControlLine,
    C: ControlLine,
    D: DelayNs,
{
    fn set_register(&mut self, param: &[u8]) -> Result<()> {
        self.check(param, PRE_DELAY_MS, COMMAND_TIMEOUT_MS)
    }

    fn get_register<const N: usize>(&mut self, opcode: u8) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.link()?
            .write_read(&[opcode], &mut out, PRE_DELAY_MS, COMMAND_TIMEOUT_MS)?;
        Ok(out)
    }

    fn get_ip_register(&mut self, opcode: u8) -> Result<Ipv4Addr> {
        self.get_register::<4>(opcode).map(Ipv4Addr::from)
    }

    fn set_ip_register(&mut self, opcode: u8, ip: Ipv4Addr) -> Result<()> {
        let [a, b, c, d] = ip.octets();
        self.set_register(&[opcode, a, b, c, d])
    }

    fn set_flag(&mut self, opcode: u8, enabled: bool) -> Result<()> {
        self.set_register(&[opcode, u8::from(enabled)])
    }

    fn get_flag(&mut self, opcode: u8) -> Result<bool> {
        let [value] = self.get_register::<1>(opcode)?;
        Ok(value != 0)
    }

    // =========================================================================
    // Chip Control
    // =========================================================================

    /// Read the chip firmware version
    pub fn version(&mut self) -> Result<u8> {
        let [version] = self.get_register::<1>(opcodes::CHIP_VERSION)?;
        Ok(version)
    }

    /// Soft-reset the chip and wait for it to come back
    pub fn reset(&mut self) -> Result<()> {
        self.set_register(&[opcodes::RESET])?;
        self.settle(RESTART_SETTLE_MS);
        Ok(())
    }

    /// Read the Ethernet connection state
    pub fn status(&mut self) -> Result<LinkStatus> {
        let [status] = self.get_register::<1>(opcodes::GET_STATUS)?;
        Ok(LinkStatus::try_from(status)?)
    }

    /// Persist the working registers to EEPROM
    pub fn save_to_eeprom(&mut self) -> Result<()> {
        self.set_register(&[opcodes::SAVE_TO_EEPROM])
    }

    /// Apply the saved configuration and restart the chip
    pub fn apply_and_reset(&mut self) -> Result<()> {
        self.set_register(&[opcodes::RUN_AND_RESET])?;
        self.settle(RESTART_SETTLE_MS);
        Ok(())
    }

    /// Leave configuration mode without saving
    pub fn exit(&mut self) -> Result<()> {
        self.set_register(&[opcodes::EXIT])
    }

    // =========================================================================
    // Network
    // =========================================================================

    /// Set the network mode
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.set_register(&[opcodes::SET_MODE, mode.to_reg_value()])
    }

    /// Get the network mode
    pub fn mode(&mut self) -> Result<Mode> {
        let [mode] = self.get_register::<1>(opcodes::GET_MODE)?;
        Ok(Mode::try_from(mode)?)
    }

    /// Set the local IP address
    pub fn set_ip(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.set_ip_register(opcodes::SET_IP, ip)
    }

    /// Get the local IP address
    pub fn ip(&mut self) -> Result<Ipv4Addr> {
        self.get_ip_register(opcodes::GET_IP)
    }

    /// Set the subnet mask
    pub fn set_subnet_mask(&mut self, mask: Ipv4Addr) -> Result<()> {
        self.set_ip_register(opcodes::SET_NETMASK, mask)
    }

    /// Get the subnet mask
    pub fn subnet_mask(&mut self) -> Result<Ipv4Addr> {
        self.get_ip_register(opcodes::GET_NETMASK)
    }

    /// Set the gateway
    pub fn set_gateway(&mut self, gateway: Ipv4Addr) -> Result<()> {
        self.set_ip_register(opcodes::SET_GATEWAY, gateway)
    }

    /// Get the gateway
    pub fn gateway(&mut self) -> Result<Ipv4Addr> {
        self.get_ip_register(opcodes::GET_GATEWAY)
    }

    /// Set the local port
    pub fn set_source_port(&mut self, port: u16) -> Result<()> {
        let [lo, hi] = port.to_le_bytes();
        self.set_register(&[opcodes::SET_PORT, lo, hi])
    }

    /// Get the local port
    pub fn source_port(&mut self) -> Result<u16> {
        self.get_register::<2>(opcodes::GET_PORT)
            .map(u16::from_le_bytes)
    }

    /// Set the remote IP address
    pub fn set_dest_ip(&mut self, ip: Ipv4Addr) -> Result<()> {
        self.set_ip_register(opcodes::SET_DST_IP, ip)
    }

    /// Get the remote IP address
    pub fn dest_ip(&mut self) -> Result<Ipv4Addr> {
        self.get_ip_register(opcodes::GET_DST_IP)
    }

    /// Set the remote port
    pub fn set_dest_port(&mut self, port: u16) -> Result<()> {
        let [lo, hi] = port.to_le_bytes();
        self.set_register(&[opcodes::SET_DST_PORT, lo, hi])
    }

    /// Get the remote port
    pub fn dest_port(&mut self) -> Result<u16> {
        self.get_register::<2>(opcodes::GET_DST_PORT)
            .map(u16::from_le_bytes)
    }

    /// Enable or disable random local port selection
    pub fn set_source_port_random(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(opcodes::RANDOM_PORT, enabled)
    }

    /// Enable or disable DHCP
    pub fn set_dhcp(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(opcodes::DHCP, enabled)
    }

    // =========================================================================
    // Serial Port
    // =========================================================================

    /// Set the UART baud rate
    pub fn set_uart_baud(&mut self, baud: u32) -> Result<()> {
        let [b0, b1, b2, b3] = baud.to_le_bytes();
        self.set_register(&[opcodes::SET_BAUD, b0, b1, b2, b3])
    }

    /// Get the UART baud rate
    pub fn uart_baud(&mut self) -> Result<u32> {
        self.get_register::<4>(opcodes::GET_BAUD)
            .map(u32::from_le_bytes)
    }

    /// Set the UART character framing
    pub fn set_uart_config(&mut self, config: UartConfig) -> Result<()> {
        let [stop, parity, data] = config.to_bytes();
        self.set_register(&[opcodes::SET_CONFIG, stop, parity, data])
    }

    /// Get the UART character framing
    pub fn uart_config(&mut self) -> Result<UartConfig> {
        let raw = self.get_register::<3>(opcodes::GET_CONFIG)?;
        Ok(UartConfig::from_bytes(raw)?)
    }

    /// Set the UART inter-byte timeout register (unit: 5 ms)
    ///
    /// Use [`uart_timeout_to_register`](Self::uart_timeout_to_register) to
    /// convert from milliseconds.
    pub fn set_uart_timeout(&mut self, reg: u8) -> Result<()> {
        self.set_register(&[opcodes::SET_TIMEOUT, reg, 0, 0, 0])
    }

    /// Get the UART inter-byte timeout register (unit: 5 ms)
    pub fn uart_timeout(&mut self) -> Result<u8> {
        let [reg] = self.get_register::<1>(opcodes::GET_TIMEOUT)?;
        Ok(reg)
    }

    /// Convert milliseconds to a timeout register value
    pub fn uart_timeout_to_register(&self, ms: u16) -> Result<u8> {
        self.ensure_ready()?;
        Ok(timeout_ms_to_register(ms))
    }

    /// Convert a timeout register value to milliseconds
    pub fn uart_timeout_from_register(&self, reg: u8) -> Result<u16> {
        self.ensure_ready()?;
        Ok(timeout_register_to_ms(reg))
    }

    /// Set the UART packet buffer length
    pub fn set_uart_buffer_length(&mut self, len: u32) -> Result<()> {
        let [b0, b1, b2, b3] = len.to_le_bytes();
        self.set_register(&[opcodes::SET_LEN, b0, b1, b2, b3])
    }

    /// Get the UART packet buffer length
    pub fn uart_buffer_length(&mut self) -> Result<u32> {
        self.get_register::<4>(opcodes::GET_LEN)
            .map(u32::from_le_bytes)
    }

    /// Enable or disable UART flush on connect
    pub fn set_uart_flush(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(opcodes::SET_FLUSH, enabled)
    }

    /// Check whether UART flush on connect is enabled
    pub fn uart_flush(&mut self) -> Result<bool> {
        self.get_flag(opcodes::GET_FLUSH)
    }

    /// Enable or disable dropping the connection on cable loss
    pub fn set_disconnect_without_link(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(opcodes::SET_DISCONNECT, enabled)
    }

    /// Check whether the connection is dropped on cable loss
    pub fn disconnect_without_link(&mut self) -> Result<bool> {
        self.get_flag(opcodes::GET_DISCONNECT)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
