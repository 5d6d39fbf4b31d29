//! Two cascaded exponential filters driving a Schmitt trigger.
//!
//! Each incoming sample decays both filter stages by ¾ and pushes the
//! sample into the first one. The second stage is fed from the first and
//! its level is compared against the thresholds. Once the level crosses
//! one of them, the output flips and both stages saturate to the new
//! extreme, so a bounce right after the edge has to travel the whole
//! hysteresis band before it could flip the output back.

use crate::thresholds::{InvalidThresholds, Thresholds};

/// Both stages are 7-bit values kept in the upper bits of a byte.
const STAGE_MASK: u8 = 0xFE;

const SATURATED_HIGH: u8 = 0xFE;
const SATURATED_LOW: u8 = 0x00;

// The decayed stage maxes out at 0x7F + 0x3F = 0xBE, 65 short of 0xFF.
const SAMPLE_WEIGHT: u8 = 65;

// The second stage maxes out at 0x7F + 0x3F + 0x3F = 0xFD. Feeding back
// the current output makes up the difference.
const OUTPUT_FEEDBACK: u8 = 2;

/// Direction of a transition of the debounced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Debounce binary samples without any notion of time.
///
/// Feed it samples through [`DebounceFilter::add_sample`] and read the
/// debounced result through [`DebounceFilter::state`].
/// [`DebounceFilter::state_changed`] tells whether the most recent sample
/// flipped the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    pub thresholds: Thresholds,
    stage1: u8,
    stage2: u8,
    output: bool,
    changed: bool,
}

impl DebounceFilter {
    /// Initialize the filter fully saturated to the given state.
    #[must_use]
    pub fn new(initial_state: bool) -> Self {
        let mut filter = Self {
            thresholds: Thresholds::default(),
            stage1: SATURATED_LOW,
            stage2: SATURATED_LOW,
            output: false,
            changed: false,
        };
        filter.reset(initial_state);
        filter
    }

    /// Saturate the filter to the given state.
    ///
    /// This clears the change flag irrespective of the prior state.
    pub fn reset(&mut self, state: bool) {
        let saturated = if state { SATURATED_HIGH } else { SATURATED_LOW };
        self.stage1 = saturated;
        self.stage2 = saturated;
        self.output = state;
        self.changed = false;
    }

    /// Push a sample into the filter.
    pub fn add_sample(&mut self, sample: bool) {
        self.force_sample(sample);
    }

    /// Push a sample into the filter, bypassing any rate limiting.
    pub fn force_sample(&mut self, sample: bool) {
        // Both lanes are computed separately, there is no carry between
        // them. With stages capped at 0xFE none of the sums exceeds 0xFF.
        let mut stage1 = decay(self.stage1);
        if sample {
            stage1 += SAMPLE_WEIGHT;
        }

        let mut stage2 = decay(self.stage2) + (stage1 >> 2);
        if self.output {
            stage2 += OUTPUT_FEEDBACK;
        }

        let level = stage2;
        if self.output && level < self.thresholds.falling() {
            self.stage1 = SATURATED_LOW;
            self.stage2 = SATURATED_LOW;
            self.output = false;
            self.changed = true;
        } else if !self.output && level > self.thresholds.rising() {
            self.stage1 = SATURATED_HIGH;
            self.stage2 = SATURATED_HIGH;
            self.output = true;
            self.changed = true;
        } else {
            self.stage1 = stage1 & STAGE_MASK;
            self.stage2 = stage2 & STAGE_MASK;
            self.changed = false;
        }
    }

    pub(crate) fn clear_change(&mut self) {
        self.changed = false;
    }

    /// Debounced state.
    #[must_use]
    pub fn state(&self) -> bool {
        self.output
    }

    /// True if the most recently accepted sample caused the state to change.
    #[must_use]
    pub fn state_changed(&self) -> bool {
        self.changed
    }

    #[must_use]
    pub fn high(&self) -> bool {
        self.output
    }

    #[must_use]
    pub fn low(&self) -> bool {
        !self.output
    }

    /// True if the most recent sample switched the state from low to high.
    #[must_use]
    pub fn rising(&self) -> bool {
        self.changed && self.output
    }

    /// True if the most recent sample switched the state from high to low.
    #[must_use]
    pub fn falling(&self) -> bool {
        self.changed && !self.output
    }

    #[must_use]
    pub fn edge(&self) -> Option<Edge> {
        match (self.changed, self.output) {
            (false, _) => None,
            (true, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
        }
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the level would not be
    /// above the falling threshold. The filter is left untouched.
    pub fn set_rising_threshold(&mut self, rising: u8) -> Result<(), InvalidThresholds> {
        self.thresholds.set_rising(rising)
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the level would not be
    /// below the rising threshold. The filter is left untouched.
    pub fn set_falling_threshold(&mut self, falling: u8) -> Result<(), InvalidThresholds> {
        self.thresholds.set_falling(falling)
    }

    /// Replace both levels at once.
    ///
    /// Unlike the single setters, this can move the whole band past its
    /// current position.
    ///
    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when `falling` is not strictly
    /// below `rising`. The filter is left untouched.
    pub fn set_thresholds(&mut self, rising: u8, falling: u8) -> Result<(), InvalidThresholds> {
        self.thresholds = Thresholds::new(rising, falling)?;
        Ok(())
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Multiply the stage by ¾ through two shifts.
fn decay(stage: u8) -> u8 {
    (stage >> 1) + (stage >> 2)
}
