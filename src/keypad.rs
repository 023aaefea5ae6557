//! Debounced 4×4 matrix keypad scanning.
//!
//! [`KeypadScanner`] is a polling state machine (idle → settling → held) rather than a blocking
//! loop: each call to [`KeypadScanner::poll`] does at most one row sweep or one resample and
//! returns immediately. A key is reported once, when it is released.

use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::shared_constants::{KEYPAD_SETTLE_DELAY, KEYPAD_SIZE, ROW_SETTLE_DELAY_US};
use crate::{Error, Result};

/// Arithmetic operators on the keypad.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Divide,
    Multiply,
    Subtract,
    Add,
}

impl Operator {
    /// Applies the operator. Division by exactly zero yields NaN.
    #[must_use]
    pub fn apply(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            #[expect(clippy::float_cmp, reason = "Only an exact zero divisor is an error")]
            Self::Divide if rhs == 0.0 => f32::NAN,
            Self::Divide => lhs / rhs,
        }
    }
}

/// A decoded keypress.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 0 through 9.
    Digit(u8),
    Operator(Operator),
    Equals,
    /// All-clear.
    Clear,
}

/// Row-major key layout, row 0 first.
pub const KEYMAP: [[Key; KEYPAD_SIZE]; KEYPAD_SIZE] = [
    [
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Operator(Operator::Divide),
    ],
    [
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Operator(Operator::Multiply),
    ],
    [
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Operator(Operator::Subtract),
    ],
    [
        Key::Clear,
        Key::Digit(0),
        Key::Equals,
        Key::Operator(Operator::Add),
    ],
];

/// Looks up the key at `(row, column)`.
#[must_use]
pub fn decode(row: usize, column: usize) -> Option<Key> {
    KEYMAP.get(row)?.get(column).copied()
}

/// Row-drive and column-read primitives of a keypad matrix.
pub trait KeypadMatrix {
    /// Drives `row` active and every other row inactive, then lets the lines settle.
    ///
    /// # Errors
    ///
    /// Returns an error if a row line cannot be driven.
    fn select_row(&mut self, row: usize) -> Result<()>;

    /// Bit `n` set means column `n` reads pressed on the selected row.
    ///
    /// # Errors
    ///
    /// Returns an error if a column line cannot be read.
    fn pressed_columns(&mut self) -> Result<u8>;

    /// Drives every row inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if a row line cannot be driven.
    fn release(&mut self) -> Result<()>;
}

/// A 4×4 matrix on GPIO: rows are driven low one at a time, columns are pulled up and read low
/// when a key on the selected row closes.
pub struct Keypad4x4<R, C, D> {
    rows: [R; KEYPAD_SIZE],
    columns: [C; KEYPAD_SIZE],
    delay: D,
}

impl<R: OutputPin, C: InputPin, D: DelayNs> Keypad4x4<R, C, D> {
    pub const fn new(rows: [R; KEYPAD_SIZE], columns: [C; KEYPAD_SIZE], delay: D) -> Self {
        Self {
            rows,
            columns,
            delay,
        }
    }
}

impl<R: OutputPin, C: InputPin, D: DelayNs> KeypadMatrix for Keypad4x4<R, C, D> {
    fn select_row(&mut self, row: usize) -> Result<()> {
        for (index, pin) in self.rows.iter_mut().enumerate() {
            let driven = if index == row {
                pin.set_low()
            } else {
                pin.set_high()
            };
            driven.map_err(|_| Error::CannotSetOutputState)?;
        }
        self.delay.delay_us(ROW_SETTLE_DELAY_US);
        Ok(())
    }

    fn pressed_columns(&mut self) -> Result<u8> {
        let mut pressed = 0;
        for (bit, pin) in self.columns.iter_mut().enumerate() {
            if pin.is_low().map_err(|_| Error::CannotReadInput)? {
                pressed |= 1 << bit;
            }
        }
        Ok(pressed)
    }

    fn release(&mut self) -> Result<()> {
        for pin in &mut self.rows {
            pin.set_high().map_err(|_| Error::CannotSetOutputState)?;
        }
        Ok(())
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Idle,
    /// Something closed on `row`; wait out the bounce before trusting it.
    Settling { row: usize, since: Instant },
    /// Confirmed press, reported once the column opens again.
    Held { row: usize, column: usize, key: Key },
}

/// Debouncing keypad scanner.
#[derive(Debug, Default)]
pub struct KeypadScanner {
    state: ScanState,
}

impl KeypadScanner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ScanState::Idle,
        }
    }

    /// Advances the scan by one step. Returns the key whose release completed this step.
    ///
    /// # Errors
    ///
    /// Propagates any row-drive or column-read failure from the matrix.
    pub fn poll(&mut self, matrix: &mut impl KeypadMatrix, now: Instant) -> Result<Option<Key>> {
        match self.state {
            ScanState::Idle => {
                for row in 0..KEYPAD_SIZE {
                    matrix.select_row(row)?;
                    if matrix.pressed_columns()? != 0 {
                        self.state = ScanState::Settling { row, since: now };
                        return Ok(None);
                    }
                }
                matrix.release()?;
                Ok(None)
            }
            ScanState::Settling { row, since } => {
                if now.saturating_duration_since(since) < KEYPAD_SETTLE_DELAY {
                    return Ok(None);
                }
                matrix.select_row(row)?;
                let pressed = matrix.pressed_columns()?;
                self.state = lowest_column(pressed)
                    .and_then(|column| Some((column, decode(row, column)?)))
                    .map_or(ScanState::Idle, |(column, key)| ScanState::Held {
                        row,
                        column,
                        key,
                    });
                Ok(None)
            }
            ScanState::Held { row, column, key } => {
                matrix.select_row(row)?;
                if matrix.pressed_columns()? & (1 << column) != 0 {
                    return Ok(None);
                }
                matrix.release()?;
                self.state = ScanState::Idle;
                Ok(Some(key))
            }
        }
    }

    /// `true` while a press is being debounced or waiting for release.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state != ScanState::Idle
    }
}

fn lowest_column(pressed: u8) -> Option<usize> {
    (0..KEYPAD_SIZE).find(|&column| pressed & (1 << column) != 0)
}
