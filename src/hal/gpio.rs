//! Control Lines
//!
//! The CH9120 is steered by two active-low GPIO lines:
//!
//! | Line   | Low                  | High                     |
//! |--------|----------------------|--------------------------|
//! | RSTI   | chip held in reset   | chip running             |
//! | CFG0   | command mode         | data (passthrough) mode  |
//!
//! The driver only needs to drive them, so the capability is a small
//! [`ControlLine`] trait. [`PinLine`] adapts any `embedded-hal` output pin.

use embedded_hal::digital::OutputPin;

use crate::driver::error::{ConfigError, Result};

// =============================================================================
// Level
// =============================================================================

/// Logic level of a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Driven low
    Low,
    /// Driven high
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

// =============================================================================
// Control Line Trait
// =============================================================================

/// Output line the driver toggles (reset or config-enable)
///
/// `init` and `deinit` bracket the driver's use of the line; platforms that
/// configure pins elsewhere can make them no-ops.
pub trait ControlLine {
    /// Prepare the line for output
    fn init(&mut self) -> Result<()>;

    /// Release the line
    fn deinit(&mut self) -> Result<()>;

    /// Drive the line to `level`
    fn set_level(&mut self, level: Level) -> Result<()>;
}

// =============================================================================
// Output Pin Adapter
// =============================================================================

/// [`ControlLine`] backed by an `embedded_hal::digital::OutputPin`
///
/// `init` and `deinit` leave the pin high, which is the idle state of both
/// CH9120 control inputs.
#[derive(Debug)]
pub struct PinLine<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> PinLine<P> {
    /// Wrap an output pin
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Get mutable access to the wrapped pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Consume the adapter and return the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ControlLine for PinLine<P> {
    fn init(&mut self) -> Result<()> {
        self.set_level(Level::High)
    }

    fn deinit(&mut self) -> Result<()> {
        self.set_level(Level::High)
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        let driven = match level {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        };
        driven.map_err(|_| ConfigError::GpioError.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use embedded_hal::digital::{ErrorKind, ErrorType};

    use super::*;
    use crate::driver::error::Error;

    #[derive(Default)]
    struct RecordingPin {
        history: Vec<bool>,
        broken: bool,
    }

    impl ErrorType for RecordingPin {
        type Error = ErrorKind;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.history.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.history.push(true);
            Ok(())
        }
    }

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }

    #[test]
    fn pin_line_init_idles_high() {
        let mut line = PinLine::new(RecordingPin::default());
        line.init().unwrap();
        assert_eq!(line.pin_mut().history, [true]);
    }

    #[test]
    fn pin_line_follows_levels() {
        let mut line = PinLine::new(RecordingPin::default());
        line.set_level(Level::Low).unwrap();
        line.set_level(Level::High).unwrap();
        line.deinit().unwrap();
        assert_eq!(line.into_inner().history, [false, true, true]);
    }

    #[test]
    fn pin_failure_maps_to_gpio_error() {
        let mut line = PinLine::new(RecordingPin {
            broken: true,
            ..Default::default()
        });
        assert_eq!(
            line.set_level(Level::Low),
            Err(Error::Config(ConfigError::GpioError))
        );
        assert!(line.init().is_err());
    }
}
