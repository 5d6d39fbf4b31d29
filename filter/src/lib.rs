//! Debouncing of noisy binary signals.
//!
//! Switches and comparator outputs are sampled periodically and passed
//! through two cascaded exponential filters driving a Schmitt trigger.
//! The result is a clean logical state and a flag telling whether the
//! last sample caused an edge.
//!
//! The filter itself has no notion of time. It can be wrapped in a rate
//! limiter which accepts at most one sample per 4 ms, making the response
//! time independent of how often the input is polled:
//!
//! ```text
//!   [ Switch ] --(bool)--> [ RateLimitedFilter ] --(bool)--> [ DebounceFilter ]
//!                                  A                                |
//!                          (now_ms)|                                | (state, edge)
//!                                  |                                V
//!                              [ Clock ]                       [ Caller ]
//! ```
//!
//! Both stages and both flags fit into a few bytes and no allocation is
//! needed, so a filter can be kept for every input of a device.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod log;

pub mod filter;
pub mod rate_limited;
pub mod thresholds;

pub use filter::{DebounceFilter, Edge};
pub use rate_limited::RateLimitedFilter;
pub use thresholds::{InvalidThresholds, Thresholds};
