//! Hardware Abstraction Layer
//!
//! The capabilities the driver consumes from the platform, plus adapters
//! that build them from `embedded-hal` / `embedded-io` types.
//!
//! # Modules
//!
//! - [`uart`]: UART link to the chip
//! - [`gpio`]: Reset and config-enable control lines
//! - [`reset`]: Hardware reset pulse
//!
//! # Delay Integration
//!
//! Delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod gpio;
pub mod reset;
pub mod uart;

// Re-export commonly used types
pub use gpio::{ControlLine, Level, PinLine};
pub use reset::{ResetTiming, hardware_reset};
pub use uart::{SerialUart, UartBus};
