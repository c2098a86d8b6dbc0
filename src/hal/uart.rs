//! UART Bus HAL
//!
//! The CH9120 speaks to its host over a plain UART. Both the command
//! protocol and the data passthrough use the same link, so the driver
//! consumes a single [`UartBus`] capability.
//!
//! Reads are non-blocking: a read returns whatever is already buffered
//! (possibly nothing) and the driver does its own polling with a delay.
//! [`SerialUart`] adapts any `embedded-io` serial port that can report
//! `ReadReady`.

use embedded_io::{Read, ReadReady, Write};

use crate::driver::error::{IoError, Result};

/// Upper bound on reads performed while discarding stale RX bytes
const FLUSH_READ_LIMIT: usize = 64;

// =============================================================================
// UART Bus Trait
// =============================================================================

/// Trait for the UART link to the chip
///
/// This trait can be implemented by different backends, allowing the
/// driver to work on any platform UART or a test double.
pub trait UartBus {
    /// Bring the UART up
    fn init(&mut self) -> Result<()>;

    /// Shut the UART down
    fn deinit(&mut self) -> Result<()>;

    /// Read up to `buf.len()` already-received bytes
    ///
    /// Returns `Ok(0)` when nothing is pending. Must not block waiting
    /// for data.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Transmit all of `data`
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Discard any bytes pending in the receive path
    fn flush(&mut self) -> Result<()>;
}

// =============================================================================
// embedded-io Adapter
// =============================================================================

/// [`UartBus`] backed by an `embedded-io` serial port
///
/// The port is expected to be configured (baud rate, framing) by the
/// platform HAL before it is handed over, so `init` does nothing.
/// `deinit` drains the transmit path.
#[derive(Debug)]
pub struct SerialUart<T> {
    port: T,
}

impl<T> SerialUart<T> {
    /// Wrap a serial port
    pub const fn new(port: T) -> Self {
        Self { port }
    }

    /// Get mutable access to the wrapped port
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }

    /// Consume the adapter and return the port
    pub fn into_inner(self) -> T {
        self.port
    }
}

impl<T: Read + ReadReady + Write> UartBus for SerialUart<T> {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.port.flush().map_err(|_| IoError::WriteFailed.into())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let ready = self.port.read_ready().map_err(|_| IoError::ReadFailed)?;
        if !ready {
            return Ok(0);
        }
        self.port.read(buf).map_err(|_| IoError::ReadFailed.into())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data).map_err(|_| IoError::WriteFailed)?;
        self.port.flush().map_err(|_| IoError::WriteFailed.into())
    }

    fn flush(&mut self) -> Result<()> {
        let mut sink = [0u8; 16];
        for _ in 0..FLUSH_READ_LIMIT {
            if !self.port.read_ready().map_err(|_| IoError::ReadFailed)? {
                break;
            }
            if self.port.read(&mut sink).map_err(|_| IoError::ReadFailed)? == 0 {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
