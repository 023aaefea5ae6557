//! Which of the two applications owns the keypad and the display.

use embedded_hal::digital::InputPin;

use crate::{Error, Result};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Countdown,
    Calculator,
}

impl Mode {
    /// The mode the selector levels ask for, if it differs from `self`.
    ///
    /// The calculator signal wins when both are asserted. With neither asserted the current mode
    /// is held, so an unengaged selector never causes a switch.
    #[must_use]
    pub const fn requested(self, calculator_requested: bool, timer_requested: bool) -> Option<Self> {
        let wanted = if calculator_requested {
            Self::Calculator
        } else if timer_requested {
            Self::Countdown
        } else {
            return None;
        };
        match (self, wanted) {
            (Self::Countdown, Self::Countdown) | (Self::Calculator, Self::Calculator) => None,
            _ => Some(wanted),
        }
    }
}

/// The two selector levels.
pub trait ModeSignals {
    /// # Errors
    ///
    /// Returns an error if the selector line cannot be read.
    fn calculator_requested(&mut self) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the selector line cannot be read.
    fn timer_requested(&mut self) -> Result<bool>;
}

/// A selector switch on two inputs with external pull-downs; HIGH means requested.
pub struct ModeSwitch<I> {
    calculator: I,
    timer: I,
}

impl<I: InputPin> ModeSwitch<I> {
    pub const fn new(calculator: I, timer: I) -> Self {
        Self { calculator, timer }
    }
}

impl<I: InputPin> ModeSignals for ModeSwitch<I> {
    fn calculator_requested(&mut self) -> Result<bool> {
        self.calculator.is_high().map_err(|_| Error::CannotReadInput)
    }

    fn timer_requested(&mut self) -> Result<bool> {
        self.timer.is_high().map_err(|_| Error::CannotReadInput)
    }
}
