//! The physical 8-digit, 7-segment display.
//!
//! The multiplexer only ever asks for "glyph G, decimal point F, at position P" or "all dark";
//! [`SegmentDisplay`] turns that into pin levels for either common-anode or common-cathode parts.

use embedded_hal::digital::{OutputPin, PinState};

use crate::Result;
use crate::glyph::Glyph;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};

mod output_array;
pub use output_array::OutputArray;

/// What the multiplexer needs from a display.
pub trait DisplayAdapter {
    /// Turns every position off.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be driven.
    fn blank(&mut self) -> Result<()>;

    /// Lights `glyph` at `position`, with the decimal point if asked.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be driven or `position` does not exist.
    fn light(&mut self, position: u8, glyph: Glyph, decimal_point: bool) -> Result<()>;
}

/// Active levels of the cell (digit-select) and segment lines.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWiring {
    pub cell_on: PinState,
    pub segment_on: PinState,
}

impl DisplayWiring {
    /// Shared anode per digit: select HIGH, segments sink LOW.
    pub const COMMON_ANODE: Self = Self {
        cell_on: PinState::High,
        segment_on: PinState::Low,
    };

    /// Shared cathode per digit: select LOW, segments source HIGH.
    pub const COMMON_CATHODE: Self = Self {
        cell_on: PinState::Low,
        segment_on: PinState::High,
    };
}

/// A multiplexed display driven straight from GPIO.
///
/// `cells[n]` selects position `n` (position 0 is the rightmost, least significant digit);
/// `segments` are A through G followed by the decimal point.
pub struct SegmentDisplay<C, S> {
    cells: OutputArray<C, CELL_COUNT>,
    segments: OutputArray<S, SEGMENT_COUNT>,
    wiring: DisplayWiring,
}

impl<C: OutputPin, S: OutputPin> SegmentDisplay<C, S> {
    pub const fn new(
        cells: OutputArray<C, CELL_COUNT>,
        segments: OutputArray<S, SEGMENT_COUNT>,
        wiring: DisplayWiring,
    ) -> Self {
        Self {
            cells,
            segments,
            wiring,
        }
    }
}

impl<C: OutputPin, S: OutputPin> DisplayAdapter for SegmentDisplay<C, S> {
    fn blank(&mut self) -> Result<()> {
        self.cells.set_all(!self.wiring.cell_on)?;
        self.segments.set_from_bits(0, self.wiring.segment_on)
    }

    fn light(&mut self, position: u8, glyph: Glyph, decimal_point: bool) -> Result<()> {
        self.segments
            .set_from_bits(glyph.bits(decimal_point), self.wiring.segment_on)?;
        self.cells
            .set_state_at_index(usize::from(position), self.wiring.cell_on)
    }
}
