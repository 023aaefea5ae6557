use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The numeric variants never reach a caller as a failure: the calculator turns them into the
/// sticky ERROR display, and the two entry-overflow variants are silently dropped keypresses.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `embassy_executor::SpawnError` carries no detail worth keeping and does not implement
    // `core::error::Error`, so the variant holds nothing.
    #[display("Task could not be spawned")]
    TaskSpawn,

    /// The magnitude needs more than the seven-digit budget.
    #[display("Value does not fit in seven digits")]
    NumericOverflow,

    /// NaN or infinite value.
    #[display("Value is not a finite number")]
    NumericInvalid,

    /// Operand entry already holds 1,000,000 or more.
    #[display("Operand entry is full")]
    InputOverflow,

    /// Eight duration digits have already been entered.
    #[display("Countdown entry is full")]
    EntryOverflow,

    #[display("Digit buffer is full")]
    DigitBufferFull,

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInput,
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(_: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn
    }
}
