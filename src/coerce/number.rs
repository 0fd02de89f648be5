//! Numeric and boolean parsing for primitive destinations.

use std::borrow::Cow;
use std::num::ParseIntError;
use std::str::FromStr;

use super::CoerceError;

/// An integer destination parsed with base auto-detection.
///
/// Accepts an optional sign followed by decimal digits, or a `0x`, `0o`, `0b`
/// prefixed literal, or a leading-zero octal literal. Unsigned destinations
/// take no sign at all. Values that do not fit the destination width are
/// rejected rather than truncated.
pub trait Integer {
    fn parse_auto(&mut self, value: &str) -> Result<(), ParseIntError>;
}

/// A floating-point destination sized to its own width.
///
/// Finite literals too large for the width fail instead of becoming infinite.
pub trait Float {
    fn parse_float(&mut self, value: &str) -> Result<(), CoerceError>;
}

macro_rules! integer {
    ($signed:literal: $($t:ty),* $(,)?) => {
        $(
            impl Integer for $t {
                fn parse_auto(&mut self, value: &str) -> Result<(), ParseIntError> {
                    let (digits, radix) = split_radix(value, $signed);
                    *self = <$t>::from_str_radix(&digits, radix)?;
                    Ok(())
                }
            }
        )*
    };
}

integer!(true: i8, i16, i32, i64, i128, isize);
integer!(false: u8, u16, u32, u64, u128, usize);

macro_rules! float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Float for $t {
                fn parse_float(&mut self, value: &str) -> Result<(), CoerceError> {
                    *self = parse_finite(value, <$t>::from_str, <$t>::is_infinite)?;
                    Ok(())
                }
            }
        )*
    };
}

float!(f32, f64);

fn parse_finite<F, E>(
    value: &str,
    parse: impl Fn(&str) -> Result<F, E>,
    is_infinite: impl Fn(F) -> bool,
) -> Result<F, CoerceError>
where
    F: Copy,
    CoerceError: From<E>,
{
    let parsed = parse(value)?;
    if is_infinite(parsed) && !spells_infinity(value) {
        return Err(CoerceError::FloatRange(value.to_string()));
    }
    Ok(parsed)
}

fn spells_infinity(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parses the conventional boolean literals.
pub(crate) fn parse_bool(value: &str) -> Result<bool, CoerceError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::Bool(value.to_string())),
    }
}

/// Splits a literal into sign-prefixed digits and the radix its prefix selects.
fn split_radix(value: &str, signed: bool) -> (Cow<'_, str>, u32) {
    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+' | b'-') => value.split_at(1),
        _ => ("", value),
    };

    // A lone sign parses as an invalid digit.
    if !signed && !sign.is_empty() {
        return (Cow::Borrowed(sign), 10);
    }

    let (digits, radix) = if let Some(d) = strip_prefix_ci(rest, "0x") {
        (d, 16)
    } else if let Some(d) = strip_prefix_ci(rest, "0o") {
        (d, 8)
    } else if let Some(d) = strip_prefix_ci(rest, "0b") {
        (d, 2)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (&rest[1..], 8)
    } else {
        return (Cow::Borrowed(value), 10);
    };

    // A second sign after the radix prefix is malformed; parsing the whole
    // literal as decimal reports it as an invalid digit.
    if digits.starts_with(['+', '-']) {
        return (Cow::Borrowed(value), 10);
    }

    if sign.is_empty() {
        (Cow::Borrowed(digits), radix)
    } else {
        (Cow::Owned(format!("{sign}{digits}")), radix)
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
