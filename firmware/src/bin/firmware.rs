#![no_main]
#![no_std]

use debounce_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0])]
mod app {
    use daisy::led::{Led, LedUser};
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use debounce_firmware::system::button::Button;
    use debounce_firmware::system::System;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        status_led: LedUser,
        button: Button,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let status_led = system.led_user;
        let button = system.button;

        sample::spawn().unwrap();

        (
            Shared {},
            Local { status_led, button },
            init::Monotonics(mono),
        )
    }

    #[task(local = [status_led, button])]
    fn sample(cx: sample::Context) {
        sample::spawn_after(1.millis()).unwrap();

        #[allow(clippy::cast_possible_truncation)]
        let now_ms = monotonics::now().ticks() as u32;

        let button = cx.local.button;
        button.sample(now_ms);

        if button.clicked() {
            defmt::info!("Button pressed at={=u32}ms", now_ms);
            cx.local.status_led.on();
        } else if button.released() {
            defmt::info!("Button released at={=u32}ms", now_ms);
            cx.local.status_led.off();
        }
    }
}
