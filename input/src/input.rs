//! Debounced digital input.

use debounce_filter::{Edge, InvalidThresholds, RateLimitedFilter};

use crate::clock::Clock;
use crate::log;
use crate::signal::RawSignal;

/// Input attached to a raw signal, debounced over time.
///
/// Samples are passed to the filter at most once per 4 ms, provided that
/// [`DebouncedInput::read`] gets called often enough. The edge queries act
/// as if every read was passed through: when the signal is steady, a
/// second read right after an edge reports no change even if its sample
/// was dropped.
#[derive(Debug)]
pub struct DebouncedInput<S, C> {
    signal: Option<S>,
    clock: C,
    filter: RateLimitedFilter,
}

impl<S: RawSignal, C: Clock> DebouncedInput<S, C> {
    /// Input not attached to any signal, reading low.
    pub fn new(clock: C) -> Self {
        Self {
            signal: None,
            clock,
            filter: RateLimitedFilter::new(false),
        }
    }

    /// # Errors
    ///
    /// This fails when the initial sample of the signal cannot be read.
    pub fn with_signal(signal: S, clock: C) -> Result<Self, S::Error> {
        let mut input = Self::new(clock);
        input.attach(signal)?;
        Ok(input)
    }

    /// Start reading the given signal, replacing the previous one.
    ///
    /// The filter is saturated to the current raw value of the signal.
    /// The previously attached signal, if any, is handed back.
    ///
    /// # Errors
    ///
    /// This fails when the initial sample of the signal cannot be read. In
    /// such case the previous attachment and state are kept.
    pub fn attach(&mut self, mut signal: S) -> Result<Option<S>, S::Error> {
        let initial = signal.read_raw_signal()?;
        log::info!("Attaching input with initial state={:?}", initial);
        self.filter.reset(initial);
        Ok(self.signal.replace(signal))
    }

    /// Stop reading the signal and hand it back. The input reads low.
    pub fn detach(&mut self) -> Option<S> {
        if self.signal.is_some() {
            log::info!("Detaching input");
        }
        self.filter.reset(false);
        self.signal.take()
    }

    pub fn is_attached(&self) -> bool {
        self.signal.is_some()
    }

    /// Sample the signal and return the debounced state.
    ///
    /// Detached input always reads low.
    ///
    /// # Errors
    ///
    /// Propagates failures of the signal. The filter is left untouched.
    pub fn read(&mut self) -> Result<bool, S::Error> {
        let Some(signal) = self.signal.as_mut() else {
            return Ok(false);
        };
        let sample = signal.read_raw_signal()?;
        let now_ms = self.clock.now_ms();
        self.filter.add_sample_rate_limited(sample, now_ms);
        Ok(self.filter.state())
    }

    /// True if the debounced signal is high.
    pub fn high(&self) -> bool {
        self.filter.state()
    }

    /// True if the debounced signal is low.
    pub fn low(&self) -> bool {
        !self.filter.state()
    }

    /// True if the debounced signal changed during the most recent read.
    pub fn changing(&self) -> bool {
        self.filter.state_changed()
    }

    /// True if the debounced signal went from low to high during the most
    /// recent read.
    pub fn rising(&self) -> bool {
        self.filter.rising()
    }

    /// True if the debounced signal went from high to low during the most
    /// recent read.
    pub fn falling(&self) -> bool {
        self.filter.falling()
    }

    pub fn edge(&self) -> Option<Edge> {
        self.filter.edge()
    }

    /// # Errors
    ///
    /// See [`DebouncedInput::read`].
    pub fn read_changing(&mut self) -> Result<bool, S::Error> {
        self.read()?;
        Ok(self.changing())
    }

    /// # Errors
    ///
    /// See [`DebouncedInput::read`].
    pub fn read_rising(&mut self) -> Result<bool, S::Error> {
        self.read()?;
        Ok(self.rising())
    }

    /// # Errors
    ///
    /// See [`DebouncedInput::read`].
    pub fn read_falling(&mut self) -> Result<bool, S::Error> {
        self.read()?;
        Ok(self.falling())
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the level would not be
    /// above the falling threshold.
    pub fn set_rising_threshold(&mut self, rising: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_rising_threshold(rising)
    }

    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when the level would not be
    /// below the rising threshold.
    pub fn set_falling_threshold(&mut self, falling: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_falling_threshold(falling)
    }

    /// Replace both switching levels at once.
    ///
    /// # Errors
    ///
    /// This fails with `InvalidThresholds` when `falling` is not strictly
    /// below `rising`. Previous levels are kept.
    pub fn set_thresholds(&mut self, rising: u8, falling: u8) -> Result<(), InvalidThresholds> {
        self.filter.set_thresholds(rising, falling)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

    use super::*;
    use crate::signal::{AnalogThreshold, PinSignal};

    #[derive(Debug, PartialEq, Eq)]
    struct Disconnected;

    struct FlakySignal<'a> {
        value: &'a Cell<bool>,
        connected: &'a Cell<bool>,
    }

    impl RawSignal for FlakySignal<'_> {
        type Error = Disconnected;

        fn read_raw_signal(&mut self) -> Result<bool, Self::Error> {
            if self.connected.get() {
                Ok(self.value.get())
            } else {
                Err(Disconnected)
            }
        }
    }

    // Read once per millisecond until the input rises, return the time it took.
    fn read_until_rising<S: RawSignal, C: Clock>(
        input: &mut DebouncedInput<S, C>,
        time: &Cell<u32>,
    ) -> u32
    where
        S::Error: core::fmt::Debug,
    {
        let start = time.get();
        for _ in 0..1000 {
            if input.read_rising().unwrap() {
                return time.get() - start;
            }
            time.set(time.get() + 1);
        }
        panic!("Input did not rise within a second");
    }

    #[test]
    fn when_detached_it_reads_low_without_touching_the_filter() {
        let time = Cell::new(0);
        let mut input: DebouncedInput<fn() -> bool, _> = DebouncedInput::new(|| time.get());
        assert!(!input.is_attached());
        assert_eq!(input.read(), Ok(false));
        assert!(input.low());
        assert!(!input.changing());
    }

    #[test]
    fn when_attached_it_starts_in_the_raw_state_without_edge() {
        let time = Cell::new(0);
        let value = Cell::new(true);
        let input = DebouncedInput::with_signal(|| value.get(), || time.get()).unwrap();
        assert!(input.is_attached());
        assert!(input.high());
        assert!(!input.changing());
        assert_eq!(input.edge(), None);
    }

    #[test]
    fn when_signal_goes_high_it_rises_after_seven_ticks() {
        let time = Cell::new(0);
        let value = Cell::new(false);
        let mut input = DebouncedInput::with_signal(|| value.get(), || time.get()).unwrap();

        value.set(true);
        assert_eq!(read_until_rising(&mut input, &time), 24);
        assert!(input.high());
        assert_eq!(input.edge(), Some(Edge::Rising));

        assert!(!input.read_changing().unwrap());
        assert!(input.high());
    }

    #[test]
    fn when_signal_goes_low_it_falls_after_seven_ticks() {
        let time = Cell::new(0);
        let value = Cell::new(true);
        let mut input = DebouncedInput::with_signal(|| value.get(), || time.get()).unwrap();

        value.set(false);
        let mut falls = 0;
        for ms in 0..100 {
            time.set(ms);
            if input.read_falling().unwrap() {
                assert_eq!(ms, 24);
                falls += 1;
            }
        }
        assert_eq!(falls, 1);
        assert!(input.low());
    }

    #[test]
    fn when_read_repeatedly_within_a_tick_it_reports_change_only_once() {
        let time = Cell::new(0);
        let value = Cell::new(false);
        let mut input = DebouncedInput::with_signal(|| value.get(), || time.get()).unwrap();

        value.set(true);
        read_until_rising(&mut input, &time);
        assert!(!input.read_rising().unwrap());
        assert!(!input.read_rising().unwrap());
        assert!(input.high());
    }

    #[test]
    fn when_detached_it_hands_the_signal_back_and_reads_low() {
        let time = Cell::new(0);
        let mut input = DebouncedInput::with_signal(|| true, || time.get()).unwrap();
        assert!(input.high());

        let mut signal = input.detach().unwrap();
        assert_eq!(signal.read_raw_signal(), Ok(true));
        assert!(!input.is_attached());
        assert!(input.low());
        assert_eq!(input.read(), Ok(false));
        assert!(input.detach().is_none());
    }

    #[test]
    fn when_attached_again_it_returns_previous_signal() {
        let time = Cell::new(0);
        let low = Cell::new(false);
        let high = Cell::new(true);
        let connected = Cell::new(true);
        let mut input = DebouncedInput::with_signal(
            FlakySignal {
                value: &low,
                connected: &connected,
            },
            || time.get(),
        )
        .unwrap();
        assert!(input.low());

        let previous = input
            .attach(FlakySignal {
                value: &high,
                connected: &connected,
            })
            .unwrap()
            .unwrap();
        assert!(!previous.value.get());
        assert!(input.high());
        assert!(!input.changing());
    }

    #[test]
    fn when_signal_fails_it_propagates_error_and_keeps_state() {
        let time = Cell::new(0);
        let value = Cell::new(false);
        let connected = Cell::new(true);
        let mut input = DebouncedInput::with_signal(
            FlakySignal {
                value: &value,
                connected: &connected,
            },
            || time.get(),
        )
        .unwrap();

        value.set(true);
        for ms in 0..20 {
            time.set(ms);
            input.read().unwrap();
        }
        let before = input.filter;

        connected.set(false);
        time.set(20);
        assert_eq!(input.read(), Err(Disconnected));
        assert_eq!(input.filter, before);
        assert!(input.is_attached());

        connected.set(true);
        assert!(!input.read_rising().unwrap());
        time.set(24);
        assert!(input.read_rising().unwrap());
    }

    #[test]
    fn when_attaching_fails_previous_signal_is_kept() {
        let time = Cell::new(0);
        let value = Cell::new(true);
        let connected = Cell::new(true);
        let disconnected = Cell::new(false);
        let mut input = DebouncedInput::with_signal(
            FlakySignal {
                value: &value,
                connected: &connected,
            },
            || time.get(),
        )
        .unwrap();

        let result = input.attach(FlakySignal {
            value: &value,
            connected: &disconnected,
        });
        assert!(matches!(result, Err(Disconnected)));
        assert!(input.is_attached());
        assert!(input.high());
        assert_eq!(input.read(), Ok(true));
    }

    #[test]
    fn when_attaching_fails_on_construction_it_returns_error() {
        let time = Cell::new(0);
        let value = Cell::new(true);
        let disconnected = Cell::new(false);
        let result = DebouncedInput::with_signal(
            FlakySignal {
                value: &value,
                connected: &disconnected,
            },
            || time.get(),
        );
        assert!(matches!(result, Err(Disconnected)));
    }

    #[test]
    fn when_thresholds_are_narrowed_it_reacts_faster() {
        let time = Cell::new(0);
        let value = Cell::new(false);
        let mut input = DebouncedInput::with_signal(|| value.get(), || time.get()).unwrap();
        assert!(input.set_rising_threshold(0x40).is_err());
        input.set_thresholds(0x40, 0x30).unwrap();
        assert!(input.set_falling_threshold(0x40).is_err());

        value.set(true);
        assert_eq!(read_until_rising(&mut input, &time), 8);
    }

    #[test]
    fn when_attached_to_analog_source_it_compares_against_fixed_level() {
        let time = Cell::new(0);
        let level = Cell::new(0_u16);
        let mut input =
            DebouncedInput::with_signal(AnalogThreshold::new(|| level.get()), || time.get())
                .unwrap();
        assert!(input.low());

        level.set(15);
        for ms in 0..100 {
            time.set(ms);
            input.read().unwrap();
        }
        assert!(input.low());

        level.set(16);
        time.set(100);
        assert_eq!(read_until_rising(&mut input, &time), 24);
    }

    #[test]
    fn when_attached_to_active_low_pin_it_reads_pressed_button_as_high() {
        let expectations: Vec<Transaction> = core::iter::once(Transaction::get(State::High))
            .chain((0..8).map(|_| Transaction::get(State::Low)))
            .collect();
        let time = Cell::new(0);
        let mut input =
            DebouncedInput::with_signal(PinSignal::active_low(Mock::new(&expectations)), || {
                time.get()
            })
            .unwrap();
        assert!(input.low());

        for ms in 0..7 {
            time.set(ms * 4);
            input.read().unwrap();
        }
        assert!(input.rising());

        time.set(28);
        input.read().unwrap();
        assert!(input.high());
        assert!(!input.changing());

        input.detach().unwrap().into_inner().done();
    }
}
