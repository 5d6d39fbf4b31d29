//! Source of time for rate limiting.

/// Monotonic, non-decreasing millisecond counter.
///
/// It may wrap around, only the lowest ten bits are relevant for rate
/// limiting.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}
