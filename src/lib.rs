//! Control core for a dual-mode countdown timer / calculator on one multiplexed 8-digit
//! 7-segment display and one 4×4 keypad.
#![cfg_attr(not(test), no_std)]

pub mod appliance;
pub mod calculator;
pub mod countdown;
pub mod digit_buffer;
pub mod display;
mod error;
pub mod float_format;
pub mod glyph;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod hardware;
pub mod keypad;
pub mod mode;
pub mod multiplexer;
pub mod relay;
pub mod shared;
mod shared_constants;

// Re-export commonly used items
pub use appliance::{Appliance, Dispatch, PollOutcome};
pub use calculator::{Calculator, CalculatorEvent};
pub use countdown::{CountdownEvent, CountdownState, CountdownTime, TickOutcome, countdown_tick};
pub use digit_buffer::DigitBuffer;
pub use display::{DisplayAdapter, DisplayWiring, OutputArray, SegmentDisplay};
pub use error::{Error, Result};
pub use float_format::{format, format_or_error};
pub use glyph::{Glyph, Leds};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use hardware::{BoardDisplay, BoardKeypad, BoardModeSwitch, BoardRelay, Hardware};
pub use keypad::{Key, Keypad4x4, KeypadMatrix, KeypadScanner, Operator};
pub use mode::{Mode, ModeSignals, ModeSwitch};
pub use multiplexer::DisplayMultiplexer;
pub use relay::{Relay, RelayCommand, RelayPin};
pub use shared::{SharedCore, SharedState};
pub use shared_constants::*;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use countdown::spawn_countdown_clock;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use multiplexer::spawn_display_multiplexer;
