//! Centralized Constants
//!
//! This module provides a single source of truth for the framing sizes and
//! timing values used throughout the CH9120 driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: Command header and payload limits
//! - **Response bytes**: Acknowledge marker
//! - **Timing**: Command timeouts, poll interval, reset and settle delays
//! - **Chip information**: Static metadata reported by `info`
//! - **Profile defaults**: Starting values of a network profile
//!
//! # Note
//!
//! Command opcodes live in [`super::opcodes`] as they describe the wire
//! protocol rather than driver behavior.

// =============================================================================
// Frame Sizes
// =============================================================================

/// Command frame header (`0x57 0xAB`)
pub const FRAME_HEADER: [u8; 2] = [0x57, 0xAB];

/// Scratch transmit buffer size (header + payload)
pub const FRAME_CAPACITY: usize = 128;

/// Maximum command payload (opcode + parameters)
pub const MAX_PAYLOAD_LEN: usize = FRAME_CAPACITY - FRAME_HEADER.len();

// =============================================================================
// Response Bytes
// =============================================================================

/// Acknowledge byte returned by write-check commands
pub const ACK: u8 = 0xAA;

// =============================================================================
// Timing Constants
// =============================================================================

/// Delay between writing a command and the first response poll
pub const PRE_DELAY_MS: u32 = 50;

/// Response timeout used by every register command
pub const COMMAND_TIMEOUT_MS: u32 = 1000;

/// Interval between two response polls
pub const POLL_INTERVAL_MS: u32 = 10;

/// Reset line low time during `init`
pub const RESET_PULSE_MS: u32 = 10;

/// Boot time after the reset line is released
pub const BOOT_DELAY_MS: u32 = 500;

/// Settle time after the reset command in `deinit`
pub const DEINIT_SETTLE_MS: u32 = 10;

/// Settle time after a reset or apply-and-reset command
pub const RESTART_SETTLE_MS: u32 = 1000;

/// Register unit of the UART inter-byte timeout
pub const UART_TIMEOUT_UNIT_MS: u16 = 5;

/// Largest UART inter-byte timeout the one-byte register can hold
pub const MAX_UART_TIMEOUT_MS: u16 = u8::MAX as u16 * UART_TIMEOUT_UNIT_MS;

// =============================================================================
// Chip Information
// =============================================================================

/// Chip name
pub const CHIP_NAME: &str = "WCH CH9120";

/// Manufacturer name
pub const MANUFACTURER_NAME: &str = "WCH";

/// Host interface
pub const INTERFACE: &str = "UART";

/// Minimum supply voltage (V)
pub const SUPPLY_VOLTAGE_MIN_V: f32 = 2.1;

/// Maximum supply voltage (V)
pub const SUPPLY_VOLTAGE_MAX_V: f32 = 3.6;

/// Maximum supply current (mA)
pub const MAX_CURRENT_MA: f32 = 100.0;

/// Minimum operating temperature (°C)
pub const TEMPERATURE_MIN_C: f32 = -40.0;

/// Maximum operating temperature (°C)
pub const TEMPERATURE_MAX_C: f32 = 85.0;

/// Driver version (major * 1000 + minor * 100)
pub const DRIVER_VERSION: u32 = 1000;

// =============================================================================
// Network Profile Defaults
// =============================================================================

/// Default local and remote port
pub const DEFAULT_PORT: u16 = 1000;

/// Default UART baud rate
pub const DEFAULT_BAUD: u32 = 9600;

/// Default UART inter-byte timeout (ms)
pub const DEFAULT_UART_TIMEOUT_MS: u16 = 10;

/// Default UART packet buffer length (bytes)
pub const DEFAULT_BUFFER_LENGTH: u32 = 1024;
