//! Switching levels of the Schmitt trigger.

use crate::log;

/// Default level the filter must exceed to switch on.
pub const DEFAULT_RISING: u8 = 0x90;

/// Default level the filter must drop below to switch off.
pub const DEFAULT_FALLING: u8 = 0x70;

/// Pair of switching levels forming the hysteresis band.
///
/// Both are compared against the second filter stage on the scale of
/// `0x00` (fully low) to `0xFF` (fully high). The falling level is always
/// strictly below the rising one, otherwise the trigger could oscillate
/// on every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    rising: u8,
    falling: u8,
}

/// Rejected pair of thresholds, the falling level was not below the rising one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidThresholds {
    pub rising: u8,
    pub falling: u8,
}

impl Thresholds {
    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when `falling` is not strictly
    /// below `rising`.
    pub fn new(rising: u8, falling: u8) -> Result<Self, InvalidThresholds> {
        if falling < rising {
            Ok(Self { rising, falling })
        } else {
            log::warning!(
                "Rejecting thresholds rising={:?} falling={:?}",
                rising,
                falling
            );
            Err(InvalidThresholds { rising, falling })
        }
    }

    #[must_use]
    pub fn rising(&self) -> u8 {
        self.rising
    }

    #[must_use]
    pub fn falling(&self) -> u8 {
        self.falling
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the new rising level would
    /// not be above the current falling level. Thresholds stay unchanged.
    pub fn set_rising(&mut self, rising: u8) -> Result<(), InvalidThresholds> {
        *self = Self::new(rising, self.falling)?;
        Ok(())
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the new falling level would
    /// not be below the current rising level. Thresholds stay unchanged.
    pub fn set_falling(&mut self, falling: u8) -> Result<(), InvalidThresholds> {
        *self = Self::new(self.rising, falling)?;
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rising: DEFAULT_RISING,
            falling: DEFAULT_FALLING,
        }
    }
}
