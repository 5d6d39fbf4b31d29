use debounce_filter::RateLimitedFilter;

use crate::system::hal::gpio;

pub type Pin = gpio::ErasedPin<gpio::Input>;

/// The button on the front panel, connected to ground when pressed.
pub struct Button {
    pin: Pin,
    filter: RateLimitedFilter,
}

impl Button {
    pub fn new(pin: Pin) -> Self {
        let pressed = pin.is_low();
        Self {
            pin,
            filter: RateLimitedFilter::new(pressed),
        }
    }

    pub fn sample(&mut self, now_ms: u32) {
        self.filter.add_sample_rate_limited(self.pin.is_low(), now_ms);
    }

    pub fn pressed(&self) -> bool {
        self.filter.state()
    }

    pub fn clicked(&self) -> bool {
        self.filter.rising()
    }

    pub fn released(&self) -> bool {
        self.filter.falling()
    }

    pub fn pressed_no_filter(&self) -> bool {
        self.pin.is_low()
    }
}
