//! Limit the rate of samples passed to the filter.
//!
//! Manual inputs bounce within a fraction of a millisecond. Sampling them
//! more often than every few milliseconds brings no information and would
//! make the time constant of the filter depend on how often the caller
//! polls. This wrapper accepts at most one sample per 4 ms tick.

use crate::filter::{DebounceFilter, Edge};
use crate::thresholds::InvalidThresholds;

/// Convert milliseconds to 4 ms ticks, wrapping around every ~1 second.
///
/// Anything polling its inputs should do so much faster than that.
#[must_use]
pub fn tick(now_ms: u32) -> u8 {
    (now_ms >> 2) as u8
}

/// Debounce filter accepting at most one sample per 4 ms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimitedFilter {
    pub filter: DebounceFilter,
    last_sample_tick: Option<u8>,
}

impl RateLimitedFilter {
    #[must_use]
    pub fn new(initial_state: bool) -> Self {
        Self {
            filter: DebounceFilter::new(initial_state),
            last_sample_tick: None,
        }
    }

    /// Push a sample into the filter unless one was already accepted
    /// within the current 4 ms tick.
    ///
    /// A dropped sample still clears the change flag. Calling this twice
    /// in succession on a steady input reports no change after the second
    /// call, as if the sample was accepted.
    pub fn add_sample_rate_limited(&mut self, sample: bool, now_ms: u32) {
        let now = tick(now_ms);
        if self.last_sample_tick == Some(now) {
            self.filter.clear_change();
        } else {
            self.filter.force_sample(sample);
            self.last_sample_tick = Some(now);
        }
    }

    /// Push a sample into the filter, ignoring the rate limit.
    ///
    /// This does not count as the sample of the current tick.
    pub fn force_sample(&mut self, sample: bool) {
        self.filter.force_sample(sample);
    }

    pub fn reset(&mut self, state: bool) {
        self.filter.reset(state);
    }

    #[must_use]
    pub fn state(&self) -> bool {
        self.filter.state()
    }

    #[must_use]
    pub fn state_changed(&self) -> bool {
        self.filter.state_changed()
    }

    #[must_use]
    pub fn high(&self) -> bool {
        self.filter.high()
    }

    #[must_use]
    pub fn low(&self) -> bool {
        self.filter.low()
    }

    #[must_use]
    pub fn rising(&self) -> bool {
        self.filter.rising()
    }

    #[must_use]
    pub fn falling(&self) -> bool {
        self.filter.falling()
    }

    #[must_use]
    pub fn edge(&self) -> Option<Edge> {
        self.filter.edge()
    }

    /// # Errors
    ///
    /// See [`DebounceFilter::set_rising_threshold`].
    pub fn set_rising_threshold(&mut self, rising: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_rising_threshold(rising)
    }

    /// # Errors
    ///
    /// See [`DebounceFilter::set_falling_threshold`].
    pub fn set_falling_threshold(&mut self, falling: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_falling_threshold(falling)
    }

    /// # Errors
    ///
    /// See [`DebounceFilter::set_thresholds`].
    pub fn set_thresholds(&mut self, rising: u8, falling: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_thresholds(rising, falling)
    }
}
