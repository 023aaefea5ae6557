//! The display refresh: one digit position per tick, all eight in turn.

use crate::Result;
use crate::digit_buffer::DigitBuffer;
use crate::display::DisplayAdapter;
use crate::glyph::Glyph;
use crate::mode::Mode;
use crate::shared::SharedState;
use crate::shared_constants::CELL_COUNT_U8;

/// Countdown positions that carry a separator point: centiseconds|seconds, seconds|minutes,
/// minutes|hours.
const COUNTDOWN_SEPARATORS: [u8; 3] = [2, 4, 6];

/// Owns the scan position. Run [`DisplayMultiplexer::step`] at the refresh rate.
#[derive(Debug, Default)]
pub struct DisplayMultiplexer {
    position: u8,
}

impl DisplayMultiplexer {
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// The position the next step will light.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// What `position` shows for `mode` and `buffer`, or `None` for dark.
    ///
    /// Returns the glyph and whether its decimal point is lit.
    #[must_use]
    pub fn frame(mode: Mode, buffer: &DigitBuffer, position: u8) -> Option<(Glyph, bool)> {
        let visible_count = buffer.visible_count();
        if mode == Mode::Countdown && visible_count == 0 {
            return (position == 0).then_some((Glyph::digit(0), false));
        }
        if position < visible_count {
            let decimal_point = match mode {
                Mode::Countdown => COUNTDOWN_SEPARATORS.contains(&position),
                Mode::Calculator => buffer.decimal_pos() == Some(position),
            };
            return Some((buffer.glyph(position), decimal_point));
        }
        if mode == Mode::Calculator
            && buffer.is_negative()
            && position == visible_count
            && position < CELL_COUNT_U8
        {
            return Some((Glyph::Minus, false));
        }
        None
    }

    /// Blanks the display, lights the current position from a fresh snapshot, and moves on.
    ///
    /// Only one position is ever lit, and only until the next step.
    ///
    /// # Errors
    ///
    /// Returns an error if the display pins cannot be driven.
    pub fn step(&mut self, shared: &SharedState, display: &mut impl DisplayAdapter) -> Result<()> {
        display.blank()?;
        let (mode, buffer) = shared.snapshot();
        if let Some((glyph, decimal_point)) = Self::frame(mode, &buffer, self.position) {
            display.light(self.position, glyph, decimal_point)?;
        }
        self.position = self.position.wrapping_add(1) % CELL_COUNT_U8;
        Ok(())
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod device {
    use embassy_executor::Spawner;
    use embassy_time::Ticker;

    use super::DisplayMultiplexer;
    use crate::Result;
    use crate::hardware::BoardDisplay;
    use crate::shared::SharedState;
    use crate::shared_constants::MULTIPLEX_PERIOD;

    /// Spawns the display refresh task, which owns the display pins.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    pub fn spawn_display_multiplexer(
        shared: &'static SharedState,
        display: BoardDisplay,
        spawner: Spawner,
    ) -> Result<()> {
        let token = multiplexer_loop(shared, display)?;
        spawner.spawn(token);
        Ok(())
    }

    #[embassy_executor::task]
    async fn multiplexer_loop(shared: &'static SharedState, mut display: BoardDisplay) -> ! {
        let mut multiplexer = DisplayMultiplexer::new();
        let mut ticker = Ticker::every(MULTIPLEX_PERIOD);
        loop {
            ticker.next().await;
            if let Err(err) = multiplexer.step(shared, &mut display) {
                panic!("{err}");
            }
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use device::spawn_display_multiplexer;
