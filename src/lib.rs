//! CH9120 Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the WCH CH9120 UART-to-Ethernet
//! bridge.
//!
//! The CH9120 terminates TCP or UDP on its Ethernet side and relays the
//! payload over a UART. This crate programs its network settings through the
//! chip's serial command protocol and passes application bytes through once
//! the chip is configured.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): Lifecycle, register accessors and data passthrough
//! 2. **Transport Layer** ([`transport`]): Command framing and response polling
//! 3. **HAL Layer** ([`hal`]): UART and control-line capabilities, reset pulse
//!
//! ## Wire Protocol
//!
//! - Commands are `0x57 0xAB <opcode> <params>` sent with CFG0 low
//! - Set commands answer `0xAA`; any other byte is a chip error
//! - Get commands answer a fixed number of bytes, integers little-endian
//! - CFG0 high puts the chip in transparent data mode
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for error and config types, and route
//!   driver diagnostics through defmt
//!
//! # Example
//!
//! ```ignore
//! use ch9120::{Ch9120, Mode, NetConfig};
//! use ch9120::hal::{PinLine, SerialUart};
//! use core::net::Ipv4Addr;
//!
//! let mut ch9120 = Ch9120::from_parts(
//!     SerialUart::new(uart),
//!     PinLine::new(reset_pin),
//!     PinLine::new(cfg_pin),
//!     delay,
//! );
//! ch9120.init()?;
//!
//! let profile = NetConfig::new()
//!     .with_mode(Mode::TcpClient)
//!     .with_ip(Ipv4Addr::new(192, 168, 1, 230))
//!     .with_dest(Ipv4Addr::new(192, 168, 1, 10), 1000);
//! ch9120.configure(&profile)?;
//!
//! ch9120.write(b"hello")?;
//! let mut buf = [0u8; 64];
//! let n = ch9120.read(&mut buf)?;
//! ```
//!
//! # Logging
//!
//! Failures are reported with a `ch9120:` prefix through the [`log`] facade,
//! or through defmt when the `defmt` feature is enabled. No logger is
//! installed by this crate.

#![no_std]
#![deny(missing_docs)]
// Clippy lint levels live here and in the Cargo.toml [lints] table.
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
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

// =============================================================================
// Modules
// =============================================================================

// Declared first so `diag!` is visible to every module below
#[macro_use]
mod macros;

pub mod driver;
pub mod hal;
pub mod transport;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::ch9120::{Ch9120, Parts};
pub use driver::config::{ChipInfo, LinkStatus, Mode, NetConfig, Parity, State, UartConfig};
pub use driver::error::{
    Capability, ConfigError, ConfigResult, Error, IoError, IoResult, Result,
};
pub use hal::{ControlLine, Level, PinLine, SerialUart, UartBus};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Protocol
        ACK,
        // Timing
        BOOT_DELAY_MS,
        COMMAND_TIMEOUT_MS,
        DEINIT_SETTLE_MS,
        // Frame sizes
        FRAME_CAPACITY,
        FRAME_HEADER,
        MAX_PAYLOAD_LEN,
        // Registers
        MAX_UART_TIMEOUT_MS,
        POLL_INTERVAL_MS,
        PRE_DELAY_MS,
        RESET_PULSE_MS,
        RESTART_SETTLE_MS,
        UART_TIMEOUT_UNIT_MS,
    };
}
