//! Countdown timer / calculator firmware.
//!
//! Runs on a Raspberry Pi Pico (RP2040) or Pico 2 (RP235x). Build with `cargo xtask uf2`.
#![no_std]
#![no_main]
#![expect(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use panic_probe as _;
use timer_calc::{
    Appliance, Dispatch, Hardware, MAIN_LOOP_DELAY, MODE_SWITCH_SETTLE, Result, SharedState,
    spawn_countdown_clock, spawn_display_multiplexer,
};

#[cfg(feature = "pico2")]
#[expect(unsafe_code, reason = "The boot ROM looks for the image definition in this section")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    static SHARED: SharedState = SharedState::new_static();

    let Hardware {
        display,
        mut keypad,
        relay,
        mut modes,
    } = Hardware::default();

    spawn_display_multiplexer(&SHARED, display, spawner)?;
    spawn_countdown_clock(&SHARED, relay, spawner)?;
    info!("timer-calc running in {}", SHARED.mode());

    let mut appliance = Appliance::new();
    loop {
        let outcome = appliance.poll(&SHARED, &mut keypad, &mut modes, Instant::now())?;
        if let Some((key, dispatch)) = outcome.key {
            info!("key {} -> {}", key, dispatch);
            if matches!(dispatch, Dispatch::Calculator(_)) && appliance.calculator().is_error() {
                info!("calculator showing ERROR");
            }
        }
        if let Some(mode) = outcome.switched_to {
            info!("mode switched to {}", mode);
            Timer::after(MODE_SWITCH_SETTLE).await;
        }
        Timer::after(MAIN_LOOP_DELAY).await;
    }
}
