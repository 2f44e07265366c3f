//! Random integers and locale-formatted rounding.
//!
//! Parsing follows JS `parseFloat` (longest numeric prefix, else NaN) and
//! formatting follows en-US `toLocaleString` (comma groups, at most three
//! fraction digits), so values round-trip the way page scripts expect.

#[cfg(test)]
#[path = "number_test.rs"]
mod number_test;

use rand::Rng;

use crate::error::{Error, Result};

/// Uniform integer in `[min, max]`.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] when `min > max`.
pub fn random_int(min: i64, max: i64) -> Result<i64> {
    random_int_with(&mut rand::rng(), min, max)
}

/// # Errors
///
/// Returns [`Error::InvalidRange`] when `min > max`.
pub fn random_int_with<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Result<i64> {
    if min > max {
        return Err(Error::InvalidRange { min, max });
    }
    Ok(rng.random_range(min..=max))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundMethod {
    #[default]
    Auto,
    Up,
    Down,
}

impl RoundMethod {
    /// `"up"` and `"down"` select ceil/floor; anything else rounds to nearest.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Auto,
        }
    }

    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Up => value.ceil(),
            Self::Down => value.floor(),
            Self::Auto => js_round(value),
        }
    }
}

/// Round `value` to a multiple of `precision` and format it for display.
///
/// A missing, zero, or NaN precision formats the parsed value unrounded.
#[must_use]
pub fn round_to(value: &str, precision: Option<f64>, method: RoundMethod) -> String {
    format_locale(round_value(parse_float(value), precision, method))
}

#[must_use]
pub fn round_value(value: f64, precision: Option<f64>, method: RoundMethod) -> f64 {
    match precision.filter(|p| *p != 0.0 && !p.is_nan()) {
        Some(precision) => method.apply(value / precision) * precision,
        None => value,
    }
}

/// `Math.round`: halves go toward positive infinity, and negatives that
/// round to zero stay `-0`.
fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 && value.is_sign_negative() { -0.0 } else { rounded }
}

/// Parse the longest leading decimal literal, like JS `parseFloat`.
#[must_use]
pub fn parse_float(raw: &str) -> f64 {
    let text = raw.trim_start();
    let (sign, body) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if body.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let bytes = body.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let int_end = digits_from(0);
    let mut end = int_end;
    let mut saw_digit = int_end > 0;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        saw_digit |= frac_end > end + 1;
        end = frac_end;
    }
    if !saw_digit {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    body[..end].parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

/// Format like en-US `Number.prototype.toLocaleString()`.
#[must_use]
pub fn format_locale(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}∞");
    }

    let (int_part, frac_part) = round_thousandths(value.abs());
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Shortest round-trip digits of `magnitude`, rounded half-up to three
/// fraction digits. ICU rounds this decimal form rather than the exact binary
/// value, so `1.0005` shows as `1.001`.
fn round_thousandths(magnitude: f64) -> (String, String) {
    let shortest = magnitude.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    if frac_part.len() <= 3 {
        return (int_part.to_owned(), frac_part.to_owned());
    }

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(3)).collect();
    if frac_part.as_bytes()[3] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }
    let split = digits.len() - 3;
    let text = |range: &[u8]| range.iter().copied().map(char::from).collect::<String>();
    (text(&digits[..split]), text(&digits[split..]))
}
