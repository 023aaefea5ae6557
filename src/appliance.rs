//! The main-loop side of the appliance: keypad scan, mode selection and key dispatch.
//!
//! The two periodic tasks (display refresh and countdown tick) only ever see [`SharedState`].
//! The calculator lives here because nothing else reads it.

use embassy_time::Instant;

use crate::Result;
use crate::calculator::{Calculator, CalculatorEvent};
use crate::countdown::CountdownEvent;
use crate::keypad::{Key, KeypadMatrix, KeypadScanner};
use crate::mode::{Mode, ModeSignals};
use crate::relay::RelayCommand;
use crate::shared::SharedState;

/// Where a key went and what it did.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Countdown(CountdownEvent),
    Calculator(CalculatorEvent),
}

/// The result of one main-loop iteration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// Set when the selector changed the mode. The caller waits out the settle delay.
    pub switched_to: Option<Mode>,
    /// The key released during this iteration, if any.
    pub key: Option<(Key, Dispatch)>,
}

#[derive(Debug, Default)]
pub struct Appliance {
    calculator: Calculator,
    scanner: KeypadScanner,
}

impl Appliance {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calculator: Calculator::new(),
            scanner: KeypadScanner::new(),
        }
    }

    /// One main-loop iteration: scan, then follow the selector, then dispatch any key to the mode
    /// that is live after the selector has been read.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad or selector lines cannot be driven or read.
    pub fn poll(
        &mut self,
        shared: &SharedState,
        keypad: &mut impl KeypadMatrix,
        modes: &mut impl ModeSignals,
        now: Instant,
    ) -> Result<PollOutcome> {
        let key = self.scanner.poll(keypad, now)?;
        let calculator_requested = modes.calculator_requested()?;
        let timer_requested = modes.timer_requested()?;
        let switched_to = self.select_mode(shared, calculator_requested, timer_requested);
        let key = key.map(|key| (key, self.dispatch(shared, key)));
        Ok(PollOutcome { switched_to, key })
    }

    /// Switches mode when the selector asks for a different one, resetting the state machine
    /// being entered. Returns the new mode, or `None` when nothing changed.
    ///
    /// Calling this again with the same levels is a no-op.
    pub fn select_mode(
        &mut self,
        shared: &SharedState,
        calculator_requested: bool,
        timer_requested: bool,
    ) -> Option<Mode> {
        let calculator = &mut self.calculator;
        let switched_to = shared.with(|core| {
            let target = core.mode.requested(calculator_requested, timer_requested)?;
            core.mode = target;
            match target {
                Mode::Calculator => core.buffer = calculator.reset(),
                Mode::Countdown => core.countdown.reset(&mut core.buffer),
            }
            Some(target)
        });
        if switched_to == Some(Mode::Countdown) {
            shared.request_relay(RelayCommand::Release);
        }
        switched_to
    }

    /// Hands `key` to the state machine of the current mode.
    pub fn dispatch(&mut self, shared: &SharedState, key: Key) -> Dispatch {
        match shared.mode() {
            Mode::Countdown => {
                let event = shared.with(|core| core.countdown.handle_key(key, &mut core.buffer));
                if event == CountdownEvent::Reset {
                    shared.request_relay(RelayCommand::Release);
                }
                Dispatch::Countdown(event)
            }
            Mode::Calculator => {
                let (event, rendered) = self.calculator.handle_key(key);
                if let Some(buffer) = rendered {
                    shared.set_buffer(buffer);
                }
                Dispatch::Calculator(event)
            }
        }
    }

    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}
