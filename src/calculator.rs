//! Calculator mode: a four-function calculator that evaluates as it goes.
//!
//! There is no operator precedence. Each operator (or Equals) first applies the pending
//! operation, so `2 + 3 × 4 =` is `(2 + 3) × 4`. NaN in the accumulator is the sticky error
//! state: arithmetic is refused until Clear, or until a digit key resets implicitly.

use crate::digit_buffer::DigitBuffer;
use crate::float_format::format;
use crate::keypad::{Key, Operator};
use crate::{Error, Result};

/// Operand entry stops accepting digits at this size.
const OPERAND_ENTRY_LIMIT: f32 = 1_000_000.0;

/// What a key did in calculator mode.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorEvent {
    DigitEntered,
    /// The operand under entry was already at the size limit.
    DigitRejected,
    OperatorSet(Operator),
    /// An operator arrived while the calculator shows ERROR and was not stored.
    OperatorRefused,
    Evaluated,
    Error,
    Cleared,
    Ignored,
}

/// Calculator application state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculator {
    accumulator: f32,
    pending_operand: f32,
    pending_operator: Option<Operator>,
    awaiting_new_operand: bool,
}

impl Calculator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulator: 0.0,
            pending_operand: 0.0,
            pending_operator: None,
            awaiting_new_operand: true,
        }
    }

    /// Back to `0` with nothing pending.
    pub fn reset(&mut self) -> DigitBuffer {
        *self = Self::new();
        DigitBuffer::zero()
    }

    /// Applies one key. Returns the buffer to display when the display changes.
    pub fn handle_key(&mut self, key: Key) -> (CalculatorEvent, Option<DigitBuffer>) {
        match key {
            Key::Digit(digit) => self.enter_digit(digit),
            Key::Operator(operator) => {
                let rendered = self.evaluate_if_entering();
                let event = if self.is_error() {
                    CalculatorEvent::OperatorRefused
                } else {
                    self.pending_operator = Some(operator);
                    CalculatorEvent::OperatorSet(operator)
                };
                self.awaiting_new_operand = true;
                (event, rendered)
            }
            Key::Equals => {
                let rendered = self.evaluate_if_entering();
                self.pending_operator = None;
                self.awaiting_new_operand = true;
                let event = match rendered {
                    Some(_) if self.is_error() => CalculatorEvent::Error,
                    Some(_) => CalculatorEvent::Evaluated,
                    None => CalculatorEvent::Ignored,
                };
                (event, rendered)
            }
            Key::Clear => (CalculatorEvent::Cleared, Some(self.reset())),
        }
    }

    fn enter_digit(&mut self, digit: u8) -> (CalculatorEvent, Option<DigitBuffer>) {
        if self.is_error() {
            self.reset();
        }
        if self.awaiting_new_operand {
            self.pending_operand = 0.0;
            self.awaiting_new_operand = false;
        }
        match self.append_digit(digit) {
            Ok(()) => {
                let rendered = self.render(self.pending_operand);
                (CalculatorEvent::DigitEntered, Some(rendered))
            }
            Err(_) => (CalculatorEvent::DigitRejected, None),
        }
    }

    #[expect(clippy::float_cmp, reason = "Exact zero means nothing has been typed yet")]
    fn append_digit(&mut self, digit: u8) -> Result<()> {
        let digit = f32::from(digit.min(9));
        if self.pending_operand == 0.0 {
            self.pending_operand = digit;
            return Ok(());
        }
        if self.pending_operand >= OPERAND_ENTRY_LIMIT {
            return Err(Error::InputOverflow);
        }
        self.pending_operand = self.pending_operand * 10.0 + digit;
        Ok(())
    }

    fn evaluate_if_entering(&mut self) -> Option<DigitBuffer> {
        if self.awaiting_new_operand {
            None
        } else {
            self.evaluate()
        }
    }

    /// Applies the pending operation to the accumulator and renders the result.
    ///
    /// The result also becomes the pending operand. Returns `None` while in the error state.
    fn evaluate(&mut self) -> Option<DigitBuffer> {
        self.awaiting_new_operand = true;
        if self.is_error() {
            return None;
        }
        self.accumulator = match self.pending_operator {
            None => self.pending_operand,
            Some(operator) => {
                let result = operator.apply(self.accumulator, self.pending_operand);
                if result.is_finite() { result } else { f32::NAN }
            }
        };
        let rendered = self.render(self.accumulator);
        self.pending_operand = self.accumulator;
        Some(rendered)
    }

    /// Formats `value`; a value the display cannot hold poisons the accumulator.
    fn render(&mut self, value: f32) -> DigitBuffer {
        format(value).unwrap_or_else(|_| {
            self.accumulator = f32::NAN;
            DigitBuffer::error()
        })
    }

    /// `true` while the display shows ERROR.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.accumulator.is_nan()
    }

    #[must_use]
    pub const fn accumulator(&self) -> f32 {
        self.accumulator
    }

    #[must_use]
    pub const fn pending_operand(&self) -> f32 {
        self.pending_operand
    }

    #[must_use]
    pub const fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    #[must_use]
    pub const fn is_awaiting_new_operand(&self) -> bool {
        self.awaiting_new_operand
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    fn press(calculator: &mut Calculator, keys: &[Key]) -> Option<DigitBuffer> {
        keys.iter()
            .filter_map(|&key| calculator.handle_key(key).1)
            .last()
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut calculator = Calculator::new();
        press(&mut calculator, &[Key::Digit(0), Key::Digit(0), Key::Digit(7)]);
        assert_eq!(calculator.pending_operand(), 7.0);
    }

    #[test]
    fn entry_stops_at_seven_digits() {
        let mut calculator = Calculator::new();
        for _ in 0..7 {
            calculator.handle_key(Key::Digit(9));
        }
        assert_eq!(calculator.pending_operand(), 9_999_999.0);
        let (event, rendered) = calculator.handle_key(Key::Digit(9));
        assert_eq!(event, CalculatorEvent::DigitRejected);
        assert_eq!(rendered, None);
        assert_eq!(calculator.pending_operand(), 9_999_999.0);
    }

    #[test]
    fn operator_without_entry_only_replaces_operator() {
        let mut calculator = Calculator::new();
        press(
            &mut calculator,
            &[
                Key::Digit(6),
                Key::Operator(Operator::Add),
                Key::Operator(Operator::Multiply),
            ],
        );
        assert_eq!(calculator.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calculator.accumulator(), 6.0);
    }
}
