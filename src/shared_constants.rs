//! Timing and geometry constants shared by the periodic tasks and the main loop.
//!
//! The tunable values come from `build.rs` (environment or `.env`), everything else is fixed.

use embassy_time::Duration;

/// Physical digit positions on the display.
pub const CELL_COUNT_U8: u8 = 8;
pub const CELL_COUNT: usize = CELL_COUNT_U8 as usize;

/// Segment lines per digit, decimal point included.
pub const SEGMENT_COUNT: usize = 8;

/// Significant digits the calculator can show.
pub const DIGIT_BUDGET: u8 = 7;

/// Rows and columns of the keypad matrix.
pub const KEYPAD_SIZE: usize = 4;

/// How often the multiplexer lights the next position.
pub const DISPLAY_REFRESH_HZ: u64 = parse_decimal(env!("DISPLAY_REFRESH_HZ"));
pub const MULTIPLEX_PERIOD: Duration = Duration::from_hz(DISPLAY_REFRESH_HZ);

// Every position must come around at least 60 times a second.
const _: () = assert!(
    DISPLAY_REFRESH_HZ >= CELL_COUNT_U8 as u64 * 60,
    "DISPLAY_REFRESH_HZ is below the flicker threshold"
);

/// The countdown counts centiseconds.
pub const COUNTDOWN_TICK_HZ: u64 = 100;
pub const COUNTDOWN_TICK_PERIOD: Duration = Duration::from_hz(COUNTDOWN_TICK_HZ);

pub const KEYPAD_SETTLE_DELAY: Duration =
    Duration::from_millis(parse_decimal(env!("KEYPAD_SETTLE_MS")));
pub const ROW_SETTLE_DELAY_US: u32 = 5;

pub const MODE_SWITCH_SETTLE: Duration =
    Duration::from_millis(parse_decimal(env!("MODE_SWITCH_SETTLE_MS")));
pub const MAIN_LOOP_DELAY: Duration = Duration::from_millis(10);

/// Parses a decimal literal at compile time. `build.rs` has already rejected non-digits.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "Compile-time only; overflow or a bad index fails the build"
)]
const fn parse_decimal(text: &str) -> u64 {
    let bytes = text.as_bytes();
    let mut value = 0;
    let mut index = 0;
    while index < bytes.len() {
        value = value * 10 + (bytes[index] - b'0') as u64;
        index += 1;
    }
    value
}
