//! Countdown mode: duration entry, the running clock and its 100 Hz tick.

use heapless::Vec;

use crate::digit_buffer::DigitBuffer;
use crate::keypad::Key;
use crate::mode::Mode;
use crate::relay::Relay;
use crate::shared::SharedState;
use crate::shared_constants::CELL_COUNT;
use crate::{Error, Result};

const MAX_CENTISECONDS: u8 = 99;
const MAX_SECONDS: u8 = 59;
const MAX_MINUTES: u8 = 59;

/// Time left on the clock.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub centiseconds: u8,
}

impl CountdownTime {
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.centiseconds == 0
    }

    /// Packs entry digits (most recent first) two at a time into centiseconds, seconds,
    /// minutes and hours. Out-of-range fields are clamped, not rejected.
    #[expect(clippy::arithmetic_side_effects, reason = "Two decimal digits fit in u8")]
    fn from_entry(entry: &[u8]) -> Self {
        let field = |pair: usize| {
            let digit = |index: usize| entry.get(index).copied().unwrap_or(0).min(9);
            digit(2 * pair) + digit(2 * pair + 1) * 10
        };
        Self {
            centiseconds: field(0).min(MAX_CENTISECONDS),
            seconds: field(1).min(MAX_SECONDS),
            minutes: field(2).min(MAX_MINUTES),
            hours: field(3),
        }
    }

    /// Counts down one centisecond, borrowing through the fields. Does nothing at zero.
    #[expect(clippy::arithmetic_side_effects, reason = "Each field is checked before it is decremented")]
    fn decrement(&mut self) {
        if self.is_zero() {
            return;
        }
        if self.centiseconds > 0 {
            self.centiseconds -= 1;
            return;
        }
        self.centiseconds = MAX_CENTISECONDS;
        if self.seconds > 0 {
            self.seconds -= 1;
            return;
        }
        self.seconds = MAX_SECONDS;
        if self.minutes > 0 {
            self.minutes -= 1;
            return;
        }
        self.minutes = MAX_MINUTES;
        self.hours = self.hours.saturating_sub(1);
    }

    const fn fields(&self) -> [u8; 4] {
        [self.centiseconds, self.seconds, self.minutes, self.hours]
    }
}

/// What a key did in countdown mode.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    DigitEntered,
    /// Eight digits were already entered; the key was dropped.
    EntryRejected,
    Started(CountdownTime),
    Paused,
    Resumed,
    Reset,
    Ignored,
}

/// What one tick did.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, paused, or not in countdown mode.
    Idle,
    Counted,
    /// Reached zero on this tick; the relay must toggle once.
    Expired,
}

/// Countdown application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    time: CountdownTime,
    active: bool,
    paused: bool,
    /// Entered digits, most recent first.
    entry: Vec<u8, CELL_COUNT>,
    display_count: u8,
    awaiting_fresh_entry: bool,
}

impl CountdownState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time: CountdownTime {
                hours: 0,
                minutes: 0,
                seconds: 0,
                centiseconds: 0,
            },
            active: false,
            paused: false,
            entry: Vec::new(),
            display_count: 0,
            awaiting_fresh_entry: false,
        }
    }

    /// Zeroes everything and clears the display.
    pub fn reset(&mut self, buffer: &mut DigitBuffer) {
        *self = Self::new();
        *buffer = DigitBuffer::empty();
    }

    /// Applies one key.
    ///
    /// Digits and the first Equals only count while stopped. Equals toggles pause while running.
    /// Clear always resets. Operators are ignored.
    pub fn handle_key(&mut self, key: Key, buffer: &mut DigitBuffer) -> CountdownEvent {
        match key {
            Key::Digit(digit) if !self.active => match self.enter_digit(digit) {
                Ok(()) => {
                    *buffer = DigitBuffer::from_entry(&self.entry);
                    CountdownEvent::DigitEntered
                }
                Err(_) => CountdownEvent::EntryRejected,
            },
            Key::Clear => {
                self.reset(buffer);
                CountdownEvent::Reset
            }
            Key::Equals if self.active => {
                self.paused = !self.paused;
                if self.paused {
                    CountdownEvent::Paused
                } else {
                    CountdownEvent::Resumed
                }
            }
            Key::Equals if !self.entry.is_empty() => {
                self.start();
                CountdownEvent::Started(self.time)
            }
            Key::Digit(_) | Key::Equals | Key::Operator(_) => CountdownEvent::Ignored,
        }
    }

    /// One 100 Hz tick.
    ///
    /// At zero the countdown stops, the display drops back to a single "0" and the next digit
    /// starts a fresh entry. The caller toggles the relay on [`TickOutcome::Expired`].
    pub fn tick(&mut self, buffer: &mut DigitBuffer) -> TickOutcome {
        if !self.active || self.paused {
            return TickOutcome::Idle;
        }
        if self.time.is_zero() {
            self.active = false;
            self.display_count = 0;
            self.entry.clear();
            self.awaiting_fresh_entry = true;
            *buffer = DigitBuffer::zero();
            return TickOutcome::Expired;
        }
        self.time.decrement();
        *buffer = DigitBuffer::countdown(self.time.fields(), self.display_count);
        TickOutcome::Counted
    }

    fn enter_digit(&mut self, digit: u8) -> Result<()> {
        if self.awaiting_fresh_entry {
            self.entry.clear();
            self.awaiting_fresh_entry = false;
        }
        self.entry
            .insert(0, digit)
            .map_err(|_| Error::EntryOverflow)
    }

    #[expect(clippy::cast_possible_truncation, reason = "Entry holds at most eight digits")]
    fn start(&mut self) {
        self.time = CountdownTime::from_entry(&self.entry);
        self.display_count = self.entry.len() as u8;
        self.active = true;
        self.paused = false;
        self.awaiting_fresh_entry = false;
    }

    #[must_use]
    pub const fn remaining(&self) -> CountdownTime {
        self.time
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Entered digits, most recent first.
    #[must_use]
    pub fn entry(&self) -> &[u8] {
        &self.entry
    }

    /// Display width fixed when the countdown started.
    #[must_use]
    pub const fn display_count(&self) -> u8 {
        self.display_count
    }

    #[must_use]
    pub const fn is_awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

/// The body of the 100 Hz countdown task.
///
/// Applies any pending relay request, then advances the clock if countdown mode is live. The
/// relay toggles outside the critical section, exactly once per expiry.
///
/// # Errors
///
/// Returns an error if the relay output cannot be driven.
pub fn countdown_tick(shared: &SharedState, relay: &mut impl Relay) -> Result<TickOutcome> {
    if let Some(command) = shared.take_relay_request() {
        relay.apply(command)?;
    }
    let outcome = shared.with(|core| match core.mode {
        Mode::Countdown => core.countdown.tick(&mut core.buffer),
        Mode::Calculator => TickOutcome::Idle,
    });
    if outcome == TickOutcome::Expired {
        relay.toggle()?;
    }
    Ok(outcome)
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod device {
    use embassy_executor::Spawner;
    use embassy_time::Ticker;

    use super::{TickOutcome, countdown_tick};
    use crate::Result;
    use crate::hardware::BoardRelay;
    use crate::shared::SharedState;
    use crate::shared_constants::COUNTDOWN_TICK_PERIOD;

    /// Spawns the 100 Hz countdown task, which owns the relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    pub fn spawn_countdown_clock(
        shared: &'static SharedState,
        relay: BoardRelay,
        spawner: Spawner,
    ) -> Result<()> {
        let token = countdown_clock_loop(shared, relay)?;
        spawner.spawn(token);
        Ok(())
    }

    #[embassy_executor::task]
    async fn countdown_clock_loop(shared: &'static SharedState, mut relay: BoardRelay) -> ! {
        let mut ticker = Ticker::every(COUNTDOWN_TICK_PERIOD);
        loop {
            ticker.next().await;
            match countdown_tick(shared, &mut relay) {
                Ok(TickOutcome::Expired) => defmt::info!("countdown expired, relay toggled"),
                Ok(_) => {}
                Err(err) => panic!("{err}"),
            }
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use device::spawn_countdown_clock;
