//! Sources of raw, bouncing samples.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

/// Analog level at or above which the signal counts as high.
pub const ANALOG_THRESHOLD: u16 = 16;

/// Instantaneous binary sample of a physical line.
pub trait RawSignal {
    type Error;

    /// # Errors
    ///
    /// Propagates failures of the underlying peripheral.
    fn read_raw_signal(&mut self) -> Result<bool, Self::Error>;
}

impl<F> RawSignal for F
where
    F: FnMut() -> bool,
{
    type Error = Infallible;

    fn read_raw_signal(&mut self) -> Result<bool, Self::Error> {
        Ok(self())
    }
}

/// Instantaneous level of an analog line, e.g. a conversion of an ADC.
pub trait AnalogSignal {
    type Error;

    /// # Errors
    ///
    /// Propagates failures of the underlying peripheral.
    fn read_level(&mut self) -> Result<u16, Self::Error>;
}

impl<F> AnalogSignal for F
where
    F: FnMut() -> u16,
{
    type Error = Infallible;

    fn read_level(&mut self) -> Result<u16, Self::Error> {
        Ok(self())
    }
}

/// Digital input pin as a source of samples.
#[derive(Debug)]
pub struct PinSignal<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> PinSignal<P> {
    /// Sample is true while the pin is high.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Sample is true while the pin is low.
    ///
    /// Useful for buttons connected to ground with a pull-up resistor.
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> RawSignal for PinSignal<P> {
    type Error = P::Error;

    fn read_raw_signal(&mut self) -> Result<bool, Self::Error> {
        if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        }
    }
}

/// Binary view of an analog source through a fixed comparator level.
#[derive(Debug)]
pub struct AnalogThreshold<A> {
    source: A,
}

impl<A: AnalogSignal> AnalogThreshold<A> {
    pub fn new(source: A) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> A {
        self.source
    }
}

impl<A: AnalogSignal> RawSignal for AnalogThreshold<A> {
    type Error = A::Error;

    fn read_raw_signal(&mut self) -> Result<bool, Self::Error> {
        Ok(self.source.read_level()? >= ANALOG_THRESHOLD)
    }
}
