//! Renders a floating-point value into a seven-significant-digit [`DigitBuffer`].

use crate::digit_buffer::DigitBuffer;
use crate::glyph::Glyph;
use crate::shared_constants::DIGIT_BUDGET;
use crate::{Error, Result};

/// Largest magnitude that fits the digit budget.
pub const MAX_MAGNITUDE: u32 = 9_999_999;

/// Fractions at or below this are treated as zero.
const FRACTION_EPSILON: f32 = 1e-7;

/// Formats `value` for the display.
///
/// The integer part is kept whole; whatever is left of the seven-digit budget goes to the
/// fraction, rounded half away from zero with trailing zeros dropped. A rounding carry that
/// pushes the integer part past [`MAX_MAGNITUDE`] is an overflow.
///
/// # Errors
///
/// - [`Error::NumericInvalid`] for NaN or an infinite magnitude.
/// - [`Error::NumericOverflow`] when the magnitude needs more than seven integer digits.
///
/// Callers show [`DigitBuffer::error()`] for either, and treat the value as NaN from then on.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The magnitude is checked to be within 0..=9_999_999 before each cast"
)]
pub fn format(value: f32) -> Result<DigitBuffer> {
    if value.is_nan() {
        return Err(Error::NumericInvalid);
    }
    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };
    if magnitude.is_infinite() {
        return Err(Error::NumericInvalid);
    }
    if magnitude > MAX_MAGNITUDE as f32 {
        return Err(Error::NumericOverflow);
    }

    let mut int_part = magnitude as u32;
    let int_digits = digit_count(int_part);
    if int_digits > DIGIT_BUDGET {
        return Err(Error::NumericOverflow);
    }

    let frac_budget = DIGIT_BUDGET.saturating_sub(int_digits);
    let fraction = magnitude - int_part as f32;
    let mut frac_scaled = 0_u32;
    if frac_budget > 0 && fraction > FRACTION_EPSILON {
        let multiplier = 10_u32.pow(u32::from(frac_budget));
        frac_scaled = libm::roundf(fraction * multiplier as f32) as u32;
        if frac_scaled >= multiplier {
            frac_scaled = 0;
            int_part = int_part.saturating_add(1);
            if int_part > MAX_MAGNITUDE {
                return Err(Error::NumericOverflow);
            }
        }
    }

    let mut buffer = DigitBuffer::empty();
    buffer.set_negative(negative);

    // The fraction field is `frac_budget` digits wide, so leading zeros stay.
    let (mut fraction_digits, stripped) = strip_trailing_zeros(frac_scaled);
    if fraction_digits > 0 {
        for _ in stripped..frac_budget {
            buffer.push(Glyph::digit(low_digit(fraction_digits)))?;
            fraction_digits /= 10;
        }
        buffer.mark_decimal_point();
    }

    let mut integer_digits = int_part;
    loop {
        if buffer.visible_count() >= DIGIT_BUDGET {
            break;
        }
        buffer.push(Glyph::digit(low_digit(integer_digits)))?;
        integer_digits /= 10;
        if integer_digits == 0 {
            break;
        }
    }

    Ok(buffer)
}

/// Like [`format`], but substitutes the ERROR display on failure.
#[must_use]
pub fn format_or_error(value: f32) -> DigitBuffer {
    format(value).unwrap_or_else(|_| DigitBuffer::error())
}

/// Decimal digits in `value`, counting 0 as one digit.
#[expect(clippy::arithmetic_side_effects, reason = "At most ten iterations")]
const fn digit_count(mut value: u32) -> u8 {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

#[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
#[expect(clippy::cast_possible_truncation, reason = "Remainder is below 10")]
const fn low_digit(value: u32) -> u8 {
    (value % 10) as u8
}

#[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
#[expect(clippy::arithmetic_side_effects, reason = "At most nine zeros")]
const fn strip_trailing_zeros(mut value: u32) -> (u32, u8) {
    let mut stripped = 0;
    while value > 0 && value % 10 == 0 {
        value /= 10;
        stripped += 1;
    }
    (value, stripped)
}
