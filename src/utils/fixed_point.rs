use crate::error::{Error, Result};
use crate::types::COORDINATE_PRECISION;

/// Number of fractional digits in the fixed-decimal rendering
pub const FRACTION_DIGITS: usize = 6;

const SCALE: i64 = COORDINATE_PRECISION as i64;

// The rendering only round-trips if the scale matches the digit count
const _: () = assert!(SCALE == 10_i64.pow(FRACTION_DIGITS as u32));

/// Render a raw scaled integer as a fixed-decimal string
///
/// The output always carries exactly six fractional digits and at least one
/// integer digit, e.g. `0 → "0.000000"`, `-500000 → "-0.500000"` and
/// `180000000 → "180.000000"`. Every `i32`, including `i32::MIN`, is
/// rendered without overflow.
pub fn format_fixed_point(value: i32) -> String {
    let magnitude = i64::from(value).abs();
    let sign = if value < 0 { "-" } else { "" };
    format!(
        "{sign}{}.{:0width$}",
        magnitude / SCALE,
        magnitude % SCALE,
        width = FRACTION_DIGITS
    )
}

/// Parse a fixed-decimal string back into a raw scaled integer
///
/// Accepts an optional leading `-`, one or more integer digits and an
/// optional fraction of one to six digits. Shorter fractions are padded on
/// the right, so `"1.5"` parses to `1500000`.
pub fn parse_fixed_point(input: &str) -> Result<i32> {
    let invalid = |reason| Error::InvalidFixedPoint {
        input: input.to_string(),
        reason,
    };

    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected integer digits"));
    }

    let mut magnitude: i64 = 0;
    for digit in integer.bytes() {
        magnitude = magnitude * 10 + i64::from(digit - b'0');
        if magnitude > i64::from(i32::MAX) / SCALE + 1 {
            return Err(invalid("value out of range"));
        }
    }
    magnitude *= SCALE;

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected fraction digits"));
        }
        if fraction.len() > FRACTION_DIGITS {
            return Err(invalid("too many fraction digits"));
        }

        let mut scaled: i64 = 0;
        for digit in fraction.bytes() {
            scaled = scaled * 10 + i64::from(digit - b'0');
        }
        for _ in fraction.len()..FRACTION_DIGITS {
            scaled *= 10;
        }
        magnitude += scaled;
    }

    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| invalid("value out of range"))
}
