//! Debounced inputs on top of raw signals and a millisecond clock.
//!
//! This crate connects [`debounce_filter`] to the outside world. Anything
//! able to provide an instantaneous sample can serve as a [`RawSignal`]:
//! a closure, an [`embedded_hal`] input pin through [`PinSignal`], or an
//! analog source compared against a fixed level through
//! [`AnalogThreshold`]. Time is provided by a [`Clock`].
//!
//! ```text
//!    [ Pin ]  [ ADC ] --> [ AnalogThreshold ]
//!       |                        |
//!       +----------+-------------+
//!                  | (RawSignal)
//!                  V
//!          [ DebouncedInput ] <-- [ Clock ]
//!                  |
//!                  V
//!        high / rising / falling
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]

mod log;

pub mod clock;
pub mod input;
pub mod signal;

pub use debounce_filter::{Edge, InvalidThresholds, Thresholds};

pub use clock::Clock;
pub use input::DebouncedInput;
pub use signal::{AnalogSignal, AnalogThreshold, PinSignal, RawSignal, ANALOG_THRESHOLD};
