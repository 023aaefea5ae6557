use embedded_hal::digital::{OutputPin, PinState};

use crate::Result;
use crate::error::Error::{CannotSetOutputState, IndexOutOfBounds};

/// Array of GPIO output pins for the segment display.
///
/// See [`SegmentDisplay`](super::SegmentDisplay) for how the cell and segment arrays are used.
pub struct OutputArray<P, const N: usize>([P; N]);

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    pub const fn new(outputs: [P; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub(crate) fn set_all(&mut self, state: PinState) -> Result<()> {
        for output in &mut self.0 {
            output.set_state(state).map_err(|_| CannotSetOutputState)?;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn set_state_at_index(&mut self, index: usize, state: PinState) -> Result<()> {
        self.0
            .get_mut(index)
            .ok_or(IndexOutOfBounds)?
            .set_state(state)
            .map_err(|_| CannotSetOutputState)
    }
}

impl<P: OutputPin> OutputArray<P, { u8::BITS as usize }> {
    /// Drives pin `n` to `on` when bit `n` is set and to the opposite level otherwise.
    #[inline]
    pub(crate) fn set_from_bits(&mut self, mut bits: u8, on: PinState) -> Result<()> {
        for output in &mut self.0 {
            let state = if bits & 1 == 1 { on } else { !on };
            output.set_state(state).map_err(|_| CannotSetOutputState)?;
            bits >>= 1;
        }
        Ok(())
    }
}
