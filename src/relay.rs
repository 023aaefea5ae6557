//! The relay output fired when a countdown expires.

use embedded_hal::digital::StatefulOutputPin;

use crate::{Error, Result};

/// Relay actions requested outside the countdown tick.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    /// Return to the de-energised level.
    Release,
}

pub trait Relay {
    /// Flips the relay output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be driven.
    fn toggle(&mut self) -> Result<()>;

    /// Drives the relay to its de-energised level.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be driven.
    fn release(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the output cannot be driven.
    fn apply(&mut self, command: RelayCommand) -> Result<()> {
        match command {
            RelayCommand::Release => self.release(),
        }
    }
}

/// A relay driver on one push-pull output, energised when HIGH.
pub struct RelayPin<P>(P);

impl<P: StatefulOutputPin> RelayPin<P> {
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }
}

impl<P: StatefulOutputPin> Relay for RelayPin<P> {
    fn toggle(&mut self) -> Result<()> {
        self.0.toggle().map_err(|_| Error::CannotSetOutputState)
    }

    fn release(&mut self) -> Result<()> {
        self.0.set_low().map_err(|_| Error::CannotSetOutputState)
    }
}
