//! Hardware Reset Sequence
//!
//! The CH9120 is reset by pulling RSTI low. After the line is released the
//! chip needs roughly half a second before it answers commands.

use embedded_hal::delay::DelayNs;

use super::gpio::{ControlLine, Level};
use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{BOOT_DELAY_MS, RESET_PULSE_MS};

/// Reset pulse timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetTiming {
    /// How long RSTI is held low
    pub pulse_ms: u32,
    /// Wait after RSTI is released
    pub boot_ms: u32,
}

impl ResetTiming {
    /// Timing used by the driver during `init`
    pub const DEFAULT: Self = Self {
        pulse_ms: RESET_PULSE_MS,
        boot_ms: BOOT_DELAY_MS,
    };
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pulse the reset line and wait for the chip to boot
///
/// Drives the line low, waits `pulse_ms`, drives it high and waits
/// `boot_ms`. Any pin failure aborts the sequence with
/// [`ConfigError::ResetSequenceFailed`].
pub fn hardware_reset<R: ControlLine, D: DelayNs>(
    line: &mut R,
    delay: &mut D,
    timing: ResetTiming,
) -> ConfigResult<()> {
    line.set_level(Level::Low)
        .map_err(|_| ConfigError::ResetSequenceFailed)?;
    delay.delay_ms(timing.pulse_ms);
    line.set_level(Level::High)
        .map_err(|_| ConfigError::ResetSequenceFailed)?;
    delay.delay_ms(timing.boot_ms);
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::testing::{Event, Line, SimChip};

    #[test]
    fn pulse_low_then_high_with_waits() {
        let chip = SimChip::new();
        let mut line = chip.reset_line();
        let mut delay = chip.delay();

        hardware_reset(&mut line, &mut delay, ResetTiming::default()).unwrap();

        assert_eq!(
            chip.events(),
            vec![
                Event::LineSet(Line::Reset, Level::Low),
                Event::Delay(10),
                Event::LineSet(Line::Reset, Level::High),
                Event::Delay(500),
            ]
        );
    }

    #[test]
    fn pin_failure_aborts_sequence() {
        let chip = SimChip::new();
        chip.fail_line_writes(Line::Reset);
        let mut line = chip.reset_line();
        let mut delay = chip.delay();

        assert_eq!(
            hardware_reset(&mut line, &mut delay, ResetTiming::DEFAULT),
            Err(ConfigError::ResetSequenceFailed)
        );
        assert_eq!(chip.total_delay_ms(), 0);
    }
}
