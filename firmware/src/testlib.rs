use crate::system::button::Button;

/// Poll the button once per millisecond until it gets clicked. Returns how
/// many milliseconds it took.
///
/// The time is shared across calls so that consecutive helpers never
/// restart the clock on an already used tick.
pub fn sample_until_button_is_clicked(button: &mut Button, now_ms: &mut u32) -> u32 {
    let start = *now_ms;
    loop {
        button.sample(*now_ms);
        if button.clicked() {
            break now_ms.wrapping_sub(start);
        }
        wait_one_millisecond(now_ms);
    }
}

pub fn sample_until_button_is_released(button: &mut Button, now_ms: &mut u32) {
    loop {
        button.sample(*now_ms);
        if button.released() {
            break;
        }
        wait_one_millisecond(now_ms);
    }
}

/// Poll the button once per millisecond for the given time, counting clicks.
pub fn count_clicks_within(button: &mut Button, now_ms: &mut u32, duration_ms: u32) -> u32 {
    let mut clicks = 0;
    for _ in 0..duration_ms {
        wait_one_millisecond(now_ms);
        button.sample(*now_ms);
        clicks += u32::from(button.clicked());
    }
    clicks
}

fn wait_one_millisecond(now_ms: &mut u32) {
    cortex_m::asm::delay(480_000_000 / 1000);
    *now_ms = now_ms.wrapping_add(1);
}
