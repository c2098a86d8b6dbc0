//! Core driver components for the CH9120.
//!
//! - [`config`] - Mode, framing and network profile types
//! - [`error`] - Error types and result aliases
//! - [`ch9120`] - The driver: lifecycle, data passthrough and raw commands
//! - [`registers`] - Typed register accessors
//!
//! # Example
//!
//! ```ignore
//! use ch9120::driver::{Mode, NetConfig};
//!
//! let profile = NetConfig::new()
//!     .with_mode(Mode::TcpServer)
//!     .with_source_port(8080);
//! ```

// Submodules
pub mod ch9120;
pub mod config;
pub mod error;
pub mod registers;

// Re-exports for convenience
pub use ch9120::{Ch9120, Parts};
pub use config::{ChipInfo, LinkStatus, Mode, NetConfig, Parity, State, UartConfig};
pub use error::{Capability, ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use registers::{timeout_ms_to_register, timeout_register_to_ms};
