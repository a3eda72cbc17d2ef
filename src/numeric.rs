//! Recognition and formatting of the decimal literals which may appear as node labels.
//!
//! A literal node keeps its value as text, so these two functions are the only places where text
//! and `f64` meet: [is_literal] decides whether the parser may treat a piece of input as a number,
//! and [format_literal] produces the normalised text stored in the node.

use core::str::FromStr;

use alloc::{format, string::String};

/// Returns true if `text` is a decimal literal: an optional sign followed by `NaN`, `Infinity`,
/// or digits with an optional fractional part and an optional exponent. At least one digit must
/// appear in the mantissa, so `.` and `e5` are rejected while `4.` and `.5` are accepted.
pub fn is_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if unsigned == "NaN" || unsigned == "Infinity" {
        return true;
    }

    let bytes = unsigned.as_bytes();
    let mut index = 0;

    let whole_digits = count_digits(&bytes[index..]);
    index += whole_digits;

    let mut fraction_digits = 0;
    if bytes.get(index) == Some(&b'.') {
        index += 1;
        fraction_digits = count_digits(&bytes[index..]);
        index += fraction_digits;
    }

    if whole_digits + fraction_digits == 0 {
        return false;
    }

    if let Some(b'e' | b'E') = bytes.get(index) {
        index += 1;
        if let Some(b'+' | b'-') = bytes.get(index) {
            index += 1;
        }

        let exponent_digits = count_digits(&bytes[index..]);
        if exponent_digits == 0 {
            return false;
        }
        index += exponent_digits;
    }

    index == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses literal text into its value. Returns `None` for anything [is_literal] would reject.
pub fn literal_value(text: &str) -> Option<f64> {
    if !is_literal(text) {
        return None;
    }

    f64::from_str(text).ok()
}

/// Formats a value in the normalised form used for literal labels: finite values always carry a
/// fractional part or an exponent (`5.0`, `0.25`, `1e21`), and the non-finite values are spelled
/// `NaN`, `Infinity` and `-Infinity`. The output is always accepted by [is_literal].
pub fn format_literal(value: f64) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value.is_infinite() {
        String::from(if value.is_sign_positive() { "Infinity" } else { "-Infinity" })
    } else {
        format!("{:?}", value)
    }
}
