//! Configuration types for the CH9120 driver

use core::net::Ipv4Addr;

use super::error::{ConfigError, ConfigResult, IoError};
use crate::internal::constants::{
    CHIP_NAME, DEFAULT_BAUD, DEFAULT_BUFFER_LENGTH, DEFAULT_PORT, DEFAULT_UART_TIMEOUT_MS,
    DRIVER_VERSION, INTERFACE, MANUFACTURER_NAME, MAX_CURRENT_MA, MAX_UART_TIMEOUT_MS,
    SUPPLY_VOLTAGE_MAX_V,
    SUPPLY_VOLTAGE_MIN_V, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};

/// Network operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Listen for TCP connections
    TcpServer = 0,
    /// Connect to a TCP server
    #[default]
    TcpClient = 1,
    /// Receive UDP datagrams from any peer
    UdpServer = 2,
    /// Exchange UDP datagrams with a fixed peer
    UdpClient = 3,
}

impl Mode {
    /// Wire value
    #[must_use]
    pub const fn to_reg_value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Mode {
    type Error = IoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::TcpServer),
            1 => Ok(Mode::TcpClient),
            2 => Ok(Mode::UdpServer),
            3 => Ok(Mode::UdpClient),
            other => Err(IoError::UnexpectedValue(other)),
        }
    }
}

/// UART parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Parity {
    /// Even parity
    Even = 0,
    /// Odd parity
    Odd = 1,
    /// Parity bit always 1
    Mark = 2,
    /// Parity bit always 0
    Space = 3,
    /// No parity bit
    #[default]
    None = 4,
}

impl Parity {
    /// Wire value
    #[must_use]
    pub const fn to_reg_value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Parity {
    type Error = IoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Parity::Even),
            1 => Ok(Parity::Odd),
            2 => Ok(Parity::Mark),
            3 => Ok(Parity::Space),
            4 => Ok(Parity::None),
            other => Err(IoError::UnexpectedValue(other)),
        }
    }
}

/// Ethernet link state reported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinkStatus {
    /// No connection
    Disconnected = 0,
    /// Connected to the peer
    Connected = 1,
}

impl LinkStatus {
    /// Check whether the chip reports a connection
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, LinkStatus::Connected)
    }
}

impl TryFrom<u8> for LinkStatus {
    type Error = IoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LinkStatus::Disconnected),
            1 => Ok(LinkStatus::Connected),
            other => Err(IoError::UnexpectedValue(other)),
        }
    }
}

/// UART character framing of the chip's serial side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Data bits per character (5-8)
    pub data_bits: u8,
    /// Parity mode
    pub parity: Parity,
    /// Stop bits (1 or 2)
    pub stop_bits: u8,
}

impl UartConfig {
    /// 8 data bits, no parity, 1 stop bit
    pub const EIGHT_N_ONE: Self = Self::new(8, Parity::None, 1);

    /// Create a framing description
    #[must_use]
    pub const fn new(data_bits: u8, parity: Parity, stop_bits: u8) -> Self {
        Self {
            data_bits,
            parity,
            stop_bits,
        }
    }

    /// Register layout: stop bits, parity, data bits
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.stop_bits, self.parity.to_reg_value(), self.data_bits]
    }

    /// Decode the register layout produced by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: [u8; 3]) -> Result<Self, IoError> {
        let [stop_bits, parity, data_bits] = bytes;
        Ok(Self::new(data_bits, Parity::try_from(parity)?, stop_bits))
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::EIGHT_N_ONE
    }
}

/// Complete network and UART profile
///
/// Applied in one go with `Ch9120::configure`, which also saves it to the
/// chip's EEPROM and restarts the chip.
///
/// # Example
///
/// ```ignore
/// let profile = NetConfig::new()
///     .with_mode(Mode::TcpServer)
///     .with_ip(Ipv4Addr::new(10, 0, 0, 2))
///     .with_source_port(8080)
///     .with_uart_baud(115_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetConfig {
    /// Network mode
    pub mode: Mode,
    /// Local IP address
    pub ip: Ipv4Addr,
    /// Local port
    pub source_port: u16,
    /// Subnet mask
    pub subnet_mask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
    /// Remote IP address (client modes)
    pub dest_ip: Ipv4Addr,
    /// Remote port (client modes)
    pub dest_port: u16,
    /// Obtain the address via DHCP
    pub dhcp: bool,
    /// UART baud rate
    pub uart_baud: u32,
    /// UART character framing
    pub uart_config: UartConfig,
    /// UART inter-byte timeout in milliseconds (5 ms resolution)
    pub uart_timeout_ms: u16,
    /// Pick a random local port
    pub source_port_random: bool,
    /// UART packet buffer length in bytes
    pub uart_buffer_length: u32,
    /// Flush UART data when a connection is established
    pub uart_flush: bool,
    /// Drop the connection when the Ethernet cable is unplugged
    pub disconnect_without_link: bool,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NetConfig {
    /// Create a profile with the default values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: Mode::TcpClient,
            ip: Ipv4Addr::new(192, 168, 1, 10),
            source_port: DEFAULT_PORT,
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            dest_ip: Ipv4Addr::new(192, 168, 1, 100),
            dest_port: DEFAULT_PORT,
            dhcp: false,
            uart_baud: DEFAULT_BAUD,
            uart_config: UartConfig::EIGHT_N_ONE,
            uart_timeout_ms: DEFAULT_UART_TIMEOUT_MS,
            source_port_random: false,
            uart_buffer_length: DEFAULT_BUFFER_LENGTH,
            uart_flush: false,
            disconnect_without_link: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the network mode
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the local IP address
    #[must_use]
    pub const fn with_ip(mut self, ip: Ipv4Addr) -> Self {
        self.ip = ip;
        self
    }

    /// Set the local port
    #[must_use]
    pub const fn with_source_port(mut self, port: u16) -> Self {
        self.source_port = port;
        self
    }

    /// Set the subnet mask
    #[must_use]
    pub const fn with_subnet_mask(mut self, mask: Ipv4Addr) -> Self {
        self.subnet_mask = mask;
        self
    }

    /// Set the gateway
    #[must_use]
    pub const fn with_gateway(mut self, gateway: Ipv4Addr) -> Self {
        self.gateway = gateway;
        self
    }

    /// Set the remote endpoint
    #[must_use]
    pub const fn with_dest(mut self, ip: Ipv4Addr, port: u16) -> Self {
        self.dest_ip = ip;
        self.dest_port = port;
        self
    }

    /// Enable or disable DHCP
    #[must_use]
    pub const fn with_dhcp(mut self, enabled: bool) -> Self {
        self.dhcp = enabled;
        self
    }

    /// Set the UART baud rate
    #[must_use]
    pub const fn with_uart_baud(mut self, baud: u32) -> Self {
        self.uart_baud = baud;
        self
    }

    /// Set the UART character framing
    #[must_use]
    pub const fn with_uart_config(mut self, config: UartConfig) -> Self {
        self.uart_config = config;
        self
    }

    /// Set the UART inter-byte timeout
    ///
    /// The chip stores the timeout in 5 ms units in a single byte, so
    /// values above 1275 ms are rejected by [`validate`](Self::validate).
    #[must_use]
    pub const fn with_uart_timeout_ms(mut self, ms: u16) -> Self {
        self.uart_timeout_ms = ms;
        self
    }

    /// Enable or disable random local port selection
    #[must_use]
    pub const fn with_source_port_random(mut self, enabled: bool) -> Self {
        self.source_port_random = enabled;
        self
    }

    /// Set the UART packet buffer length
    #[must_use]
    pub const fn with_uart_buffer_length(mut self, len: u32) -> Self {
        self.uart_buffer_length = len;
        self
    }

    /// Enable or disable UART flush on connect
    #[must_use]
    pub const fn with_uart_flush(mut self, enabled: bool) -> Self {
        self.uart_flush = enabled;
        self
    }

    /// Enable or disable dropping the connection on cable loss
    #[must_use]
    pub const fn with_disconnect_without_link(mut self, enabled: bool) -> Self {
        self.disconnect_without_link = enabled;
        self
    }

    /// Check that every value fits the chip's registers
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfig`] if `uart_timeout_ms` exceeds 1275 ms.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.uart_timeout_ms > MAX_UART_TIMEOUT_MS {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }
}

// =============================================================================
// Chip Information
// =============================================================================

/// Static chip and driver metadata
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip name
    pub chip_name: &'static str,
    /// Manufacturer name
    pub manufacturer_name: &'static str,
    /// Host interface
    pub interface: &'static str,
    /// Minimum supply voltage (V)
    pub supply_voltage_min_v: f32,
    /// Maximum supply voltage (V)
    pub supply_voltage_max_v: f32,
    /// Maximum supply current (mA)
    pub max_current_ma: f32,
    /// Minimum operating temperature (°C)
    pub temperature_min: f32,
    /// Maximum operating temperature (°C)
    pub temperature_max: f32,
    /// Driver version (major * 1000 + minor * 100)
    pub driver_version: u32,
}

impl ChipInfo {
    /// Metadata for the CH9120
    pub const CH9120: Self = Self {
        chip_name: CHIP_NAME,
        manufacturer_name: MANUFACTURER_NAME,
        interface: INTERFACE,
        supply_voltage_min_v: SUPPLY_VOLTAGE_MIN_V,
        supply_voltage_max_v: SUPPLY_VOLTAGE_MAX_V,
        max_current_ma: MAX_CURRENT_MA,
        temperature_min: TEMPERATURE_MIN_C,
        temperature_max: TEMPERATURE_MAX_C,
        driver_version: DRIVER_VERSION,
    };
}

// =============================================================================
// Driver State
// =============================================================================

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not yet initialized
    #[default]
    Unbound,
    /// Initialized, commands allowed
    Ready,
    /// Deinitialized, cannot be used again
    Closed,
}

// =============================================================================
// Unit Tests
// =============================================================================
