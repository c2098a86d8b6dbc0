//! Command link
//!
//! Request/response exchange with the chip. A command is sent with CFG0
//! held low; the chip answers either with a single acknowledge byte
//! (`write_check`) or with a fixed-length payload (`write_read`).
//!
//! CFG0 is driven back high before every return once it has been pulled
//! low, whatever the outcome.

use embedded_hal::delay::DelayNs;

use super::deadline::Deadline;
use super::frame::Frame;
use crate::driver::error::{IoError, Result};
use crate::hal::gpio::{ControlLine, Level};
use crate::hal::uart::UartBus;
use crate::internal::constants::ACK;

/// Borrowed view of the resources one command exchange needs
pub(crate) struct CommandLink<'a, U, C, D> {
    uart: &'a mut U,
    cfg: &'a mut C,
    delay: &'a mut D,
    frame: &'a mut Frame,
}

impl<'a, U, C, D> CommandLink<'a, U, C, D>
where
    U: UartBus,
    C: ControlLine,
    D: DelayNs,
{
    pub(crate) fn new(
        uart: &'a mut U,
        cfg: &'a mut C,
        delay: &'a mut D,
        frame: &'a mut Frame,
    ) -> Self {
        Self {
            uart,
            cfg,
            delay,
            frame,
        }
    }

    /// Send `param` and wait for the acknowledge byte
    ///
    /// Only the first received byte is inspected: [`ACK`] succeeds, anything
    /// else is returned as [`IoError::ChipError`] without further polling.
    pub(crate) fn write_check(
        &mut self,
        param: &[u8],
        pre_delay_ms: u32,
        timeout_ms: u32,
    ) -> Result<()> {
        self.send(param, pre_delay_ms)?;

        let mut deadline = Deadline::after_ms(timeout_ms);
        let outcome = loop {
            if deadline.is_expired() {
                diag!(error, "ch9120: timeout.");
                break Err(IoError::Timeout.into());
            }
            let mut byte = [0u8; 1];
            match self.uart.read(&mut byte) {
                Ok(0) => {}
                Ok(_) if byte[0] == ACK => break Ok(()),
                Ok(_) => {
                    diag!(error, "ch9120: chip error {:#x}.", byte[0]);
                    break Err(IoError::ChipError(byte[0]).into());
                }
                Err(_) => {
                    diag!(error, "ch9120: read failed.");
                    break Err(IoError::ReadFailed.into());
                }
            }
            deadline.wait(&mut *self.delay);
        };
        self.release(outcome)
    }

    /// Send `param` and collect exactly `out.len()` response bytes
    ///
    /// Bytes may arrive over several polls. On timeout the partially
    /// filled `out` is left as is.
    pub(crate) fn write_read(
        &mut self,
        param: &[u8],
        out: &mut [u8],
        pre_delay_ms: u32,
        timeout_ms: u32,
    ) -> Result<()> {
        self.send(param, pre_delay_ms)?;

        let mut deadline = Deadline::after_ms(timeout_ms);
        let mut filled = 0;
        let outcome = loop {
            if filled >= out.len() {
                break Ok(());
            }
            if deadline.is_expired() {
                diag!(error, "ch9120: timeout.");
                break Err(IoError::Timeout.into());
            }
            match self.uart.read(&mut out[filled..]) {
                Ok(n) => filled += n,
                Err(_) => {
                    diag!(error, "ch9120: read failed.");
                    break Err(IoError::ReadFailed.into());
                }
            }
            if filled < out.len() {
                deadline.wait(&mut *self.delay);
            }
        };
        self.release(outcome)
    }

    /// Frame `param`, enter command mode and transmit
    fn send(&mut self, param: &[u8], pre_delay_ms: u32) -> Result<()> {
        self.frame.encode(param)?;

        if self.cfg.set_level(Level::Low).is_err() {
            diag!(error, "ch9120: config line write failed.");
            return self.release(Err(IoError::ConfigPinFailed.into()));
        }
        if self.uart.flush().is_err() {
            diag!(warn, "ch9120: rx flush failed.");
        }
        if self.uart.write(self.frame.as_bytes()).is_err() {
            diag!(error, "ch9120: write failed.");
            return self.release(Err(IoError::WriteFailed.into()));
        }
        if pre_delay_ms > 0 {
            self.delay.delay_ms(pre_delay_ms);
        }
        Ok(())
    }

    /// Leave command mode, keeping the first failure
    fn release<T>(&mut self, outcome: Result<T>) -> Result<T> {
        let released = self.cfg.set_level(Level::High);
        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(_)) => {
                diag!(error, "ch9120: config line write failed.");
                Err(IoError::ConfigPinFailed.into())
            }
            (Err(e), released) => {
                if released.is_err() {
                    diag!(warn, "ch9120: config line release failed.");
                }
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
