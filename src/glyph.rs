//! Seven-segment glyphs and their segment bit patterns.

/// Constants for 7-segment LED displays.
///
/// Bit set = segment lit. The display adapter applies the wiring polarity.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Array representing the segments for digits 0-9 on a 7-segment display.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// Uppercase `E`.
    pub const LETTER_E: u8 = Self::SEG_A | Self::SEG_D | Self::SEG_E | Self::SEG_F | Self::SEG_G;
    /// Lowercase `r`.
    pub const LETTER_R: u8 = Self::SEG_E | Self::SEG_G;
    /// Middle bar only.
    pub const MINUS: u8 = Self::SEG_G;
}

/// What one digit position can show.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    /// A decimal digit. Values above 9 render blank.
    Digit(u8),
    E,
    R,
    Minus,
    #[default]
    Blank,
}

impl Glyph {
    #[must_use]
    pub const fn digit(value: u8) -> Self {
        Self::Digit(value)
    }

    /// The digit value, if this is a digit glyph.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            Self::Digit(value) => Some(value),
            _ => None,
        }
    }

    /// Segment bits for this glyph, optionally with the decimal point lit.
    #[must_use]
    pub fn bits(self, decimal_point: bool) -> u8 {
        let bits = match self {
            Self::Digit(value) => Leds::DIGITS.get(usize::from(value)).copied().unwrap_or(0),
            Self::E => Leds::LETTER_E,
            Self::R => Leds::LETTER_R,
            Self::Minus => Leds::MINUS,
            Self::Blank => 0,
        };
        if decimal_point { bits | Leds::DECIMAL } else { bits }
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn digit_bits_match_table() {
        assert_eq!(Glyph::digit(0).bits(false), 0b_0011_1111);
        assert_eq!(Glyph::digit(8).bits(false), 0b_0111_1111);
    }

    #[test]
    fn decimal_point_adds_high_bit() {
        assert_eq!(Glyph::digit(1).bits(true), 0b_1000_0110);
    }

    #[test]
    fn error_letters_and_minus() {
        assert_eq!(Glyph::E.bits(false), 0b_0111_1001);
        assert_eq!(Glyph::R.bits(false), 0b_0101_0000);
        assert_eq!(Glyph::Minus.bits(false), 0b_0100_0000);
    }

    #[test]
    fn out_of_range_digit_is_blank() {
        assert_eq!(Glyph::Digit(12).bits(false), 0);
        assert_eq!(Glyph::Blank.bits(false), 0);
    }
}
