//! Poll deadline
//!
//! Response polling is bounded by a millisecond budget consumed in fixed
//! steps of [`POLL_INTERVAL_MS`]. A budget of `t` ms allows `t / 10` polls.

use embedded_hal::delay::DelayNs;

use crate::internal::constants::POLL_INTERVAL_MS;

/// Millisecond budget for a polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    budget_ms: u32,
    elapsed_ms: u32,
}

impl Deadline {
    /// Start a deadline `budget_ms` from now
    pub const fn after_ms(budget_ms: u32) -> Self {
        Self {
            budget_ms,
            elapsed_ms: 0,
        }
    }

    /// True once another poll interval would overrun the budget
    pub const fn is_expired(&self) -> bool {
        self.elapsed_ms.saturating_add(POLL_INTERVAL_MS) > self.budget_ms
    }

    /// Milliseconds spent waiting so far
    pub const fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Sleep one poll interval
    pub fn wait<D: DelayNs>(&mut self, delay: &mut D) {
        delay.delay_ms(POLL_INTERVAL_MS);
        self.elapsed_ms = self.elapsed_ms.saturating_add(POLL_INTERVAL_MS);
    }
}
