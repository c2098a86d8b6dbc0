//! Error types for the CH9120 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Capability binding, profile validation, `init` and
//!   `deinit` failures
//! - [`IoError`]: Command transport, register access and data-plane failures
//!
//! The unified [`Error`] enum wraps both domains and is returned
//! by every driver method.

// =============================================================================
// Capabilities
// =============================================================================

/// Platform capability the driver needs before it can be initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    /// UART link to the chip
    Uart,
    /// Reset line (active low)
    ResetLine,
    /// Config-enable line (low = command mode, high = data mode)
    ConfigLine,
    /// Millisecond delay provider
    Delay,
}

impl Capability {
    /// Returns a human-readable name of the capability
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Capability::Uart => "uart",
            Capability::ResetLine => "reset line",
            Capability::ConfigLine => "config line",
            Capability::Delay => "delay",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Lifecycle errors
///
/// These errors occur while binding capabilities, bringing the chip up
/// in `init`, or tearing it down in `deinit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required capability was never bound
    MissingCapability(Capability),
    /// Driver already initialized (or already closed)
    AlreadyInitialized,
    /// A profile value is outside the range the chip can store
    InvalidConfig,
    /// UART initialization failed
    UartInitFailed,
    /// Reset line initialization failed
    ResetGpioInitFailed,
    /// Config-enable line initialization failed
    CfgGpioInitFailed,
    /// Driving the reset pulse failed
    ResetSequenceFailed,
    /// The chip did not acknowledge the reset command
    ResetCommandFailed,
    /// UART deinitialization failed
    UartDeinitFailed,
    /// Reset line deinitialization failed
    ResetGpioDeinitFailed,
    /// Config-enable line deinitialization failed
    CfgGpioDeinitFailed,
    /// GPIO pin could not be driven
    GpioError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingCapability(cap) => write!(f, "{} is not bound", cap.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::MissingCapability(_) => "missing capability",
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::UartInitFailed => "uart init failed",
            ConfigError::ResetGpioInitFailed => "reset gpio init failed",
            ConfigError::CfgGpioInitFailed => "cfg gpio init failed",
            ConfigError::ResetSequenceFailed => "reset sequence failed",
            ConfigError::ResetCommandFailed => "reset command failed",
            ConfigError::UartDeinitFailed => "uart deinit failed",
            ConfigError::ResetGpioDeinitFailed => "reset gpio deinit failed",
            ConfigError::CfgGpioDeinitFailed => "cfg gpio deinit failed",
            ConfigError::GpioError => "GPIO error",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime command and data errors
///
/// These errors occur while exchanging frames with the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Operation attempted before a successful `init` (or after `deinit`)
    NotInitialized,
    /// Command payload exceeds the frame capacity
    LenInvalid,
    /// UART transmit failed
    WriteFailed,
    /// UART receive failed
    ReadFailed,
    /// Chip answered with a non-acknowledge byte
    ChipError(u8),
    /// No (or not enough) response within the allotted time
    Timeout,
    /// Config-enable line could not be driven
    ConfigPinFailed,
    /// Response byte is outside the expected value set
    UnexpectedValue(u8),
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IoError::ChipError(b) | IoError::UnexpectedValue(b) => {
                write!(f, "{} (0x{b:02X})", self.as_str())
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::NotInitialized => "not initialized",
            IoError::LenInvalid => "command length is invalid",
            IoError::WriteFailed => "uart write failed",
            IoError::ReadFailed => "uart read failed",
            IoError::ChipError(_) => "chip reported an error",
            IoError::Timeout => "operation timed out",
            IoError::ConfigPinFailed => "config line write failed",
            IoError::UnexpectedValue(_) => "unexpected response value",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::MissingCapability(cap))) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Lifecycle error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {e}"),
            Error::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for lifecycle operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
