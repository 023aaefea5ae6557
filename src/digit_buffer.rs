//! The digit buffer shared between the producers (formatter, countdown) and the multiplexer.

use heapless::Vec;

use crate::glyph::Glyph;
use crate::shared_constants::{CELL_COUNT, CELL_COUNT_U8};
use crate::{Error, Result};

/// What the display should show, position by position.
///
/// Position 0 is the least significant digit and the first one the multiplexer scans.
/// Positions at or past `visible_count` render blank, except that a negative value puts its sign
/// glyph at exactly `visible_count`. Producers replace a buffer as a whole, never in part.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitBuffer {
    glyphs: [Glyph; CELL_COUNT],
    visible_count: u8,
    decimal_pos: Option<u8>,
    negative: bool,
}

impl DigitBuffer {
    /// Nothing visible. In countdown mode the multiplexer shows this as an idle "0".
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            glyphs: [Glyph::Digit(0); CELL_COUNT],
            visible_count: 0,
            decimal_pos: None,
            negative: false,
        }
    }

    /// A single "0".
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            visible_count: 1,
            ..Self::empty()
        }
    }

    /// The canonical ERROR display: `Err` read right to left, i.e. "r", "r", "E" from position 0.
    #[must_use]
    pub const fn error() -> Self {
        let mut glyphs = [Glyph::Digit(0); CELL_COUNT];
        glyphs[0] = Glyph::R;
        glyphs[1] = Glyph::R;
        glyphs[2] = Glyph::E;
        Self {
            glyphs,
            visible_count: 3,
            decimal_pos: None,
            negative: false,
        }
    }

    /// Shows countdown entry digits as typed, most recent digit at position 0.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The entry holds at most CELL_COUNT digits"
    )]
    #[must_use]
    pub fn from_entry(entry: &Vec<u8, CELL_COUNT>) -> Self {
        let mut buffer = Self::empty();
        for (slot, &digit) in buffer.glyphs.iter_mut().zip(entry) {
            *slot = Glyph::digit(digit);
        }
        buffer.visible_count = entry.len() as u8;
        buffer
    }

    /// Packs a running countdown into the four two-digit fields: centiseconds at 0-1, seconds at
    /// 2-3, minutes at 4-5, hours at 6-7, ones digit first.
    ///
    /// `visible_count` is the width fixed when the countdown started.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting a two-digit field into ones and tens"
    )]
    #[must_use]
    pub fn countdown(fields: [u8; 4], visible_count: u8) -> Self {
        let mut buffer = Self::empty();
        for (pair, field) in buffer.glyphs.chunks_exact_mut(2).zip(fields) {
            if let [ones, tens] = pair {
                *ones = Glyph::digit(field % 10);
                *tens = Glyph::digit(field / 10 % 10);
            }
        }
        buffer.visible_count = visible_count.min(CELL_COUNT_U8);
        buffer
    }

    /// Appends a glyph at the next position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigitBufferFull`] once every position holds a glyph.
    pub(crate) fn push(&mut self, glyph: Glyph) -> Result<()> {
        let slot = self
            .glyphs
            .get_mut(usize::from(self.visible_count))
            .ok_or(Error::DigitBufferFull)?;
        *slot = glyph;
        self.visible_count = self.visible_count.saturating_add(1);
        Ok(())
    }

    /// Puts the decimal point on the position that the next push will fill.
    pub(crate) const fn mark_decimal_point(&mut self) {
        self.decimal_pos = Some(self.visible_count);
    }

    pub(crate) const fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    #[must_use]
    pub const fn visible_count(&self) -> u8 {
        self.visible_count
    }

    #[must_use]
    pub const fn decimal_pos(&self) -> Option<u8> {
        self.decimal_pos
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// The stored glyph at `position`, visible or not.
    #[must_use]
    pub fn glyph(&self, position: u8) -> Glyph {
        self.glyphs
            .get(usize::from(position))
            .copied()
            .unwrap_or_default()
    }

    /// The positions that carry a glyph, least significant first.
    #[must_use]
    pub fn visible(&self) -> &[Glyph] {
        self.glyphs
            .get(..usize::from(self.visible_count))
            .unwrap_or(&self.glyphs)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        *self == Self::error()
    }
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self::empty()
    }
}
