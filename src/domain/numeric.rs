use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric field as it arrives from an editing form.
///
/// Prices and discount values may be sent as JSON numbers, as strings
/// (possibly half-typed), or as anything else. Deserialization never fails;
/// interpretation is deferred to [`NumericInput::to_decimal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl NumericInput {
    /// Interprets the input as a decimal, or `None` when it holds no number.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumericInput::Number(number) => parse_leading_decimal(&number.to_string()),
            NumericInput::Text(text) => parse_leading_decimal(text),
            NumericInput::Other(_) => None,
        }
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value.into())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(NumericInput::Number)
            .unwrap_or(NumericInput::Other(serde_json::Value::Null))
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Parses the leading number of `input`, ignoring whatever follows it.
///
/// Accepts an optional sign, digits with an optional fractional part and an
/// optional exponent, after leading whitespace. `"10.5 %"` yields `10.5`;
/// `"abc"`, `""` and `"."` yield `None`.
///
/// Numbers `Decimal` cannot hold exactly are approximated: magnitudes above
/// `Decimal::MAX` saturate to `Decimal::MAX` (or `Decimal::MIN`), and values
/// below its smallest scale round towards zero.
pub fn parse_leading_decimal(input: &str) -> Option<Decimal> {
    let text = input.trim_start();
    let bytes = text.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    pos += count_digits(&bytes[pos..]);
    let integer = &text[int_start..pos];

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = count_digits(&bytes[pos + 1..]);
        if frac_len > 0 {
            fraction = &text[pos + 1..pos + 1 + frac_len];
            pos += 1 + frac_len;
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut exponent = "";
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_end = pos + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            exponent = &text[pos + 1..exp_end + exp_digits];
        }
    }

    let mut literal = String::with_capacity(integer.len() + fraction.len() + 2);
    literal.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        literal.push('.');
        literal.push_str(fraction);
    }

    let exact = if exponent.is_empty() {
        Decimal::from_str(&literal)
    } else {
        literal.push('e');
        literal.push_str(exponent);
        Decimal::from_scientific(&literal)
    };
    let magnitude = match exact {
        Ok(value) => value,
        Err(_) => approximate(&literal)?,
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Approximates a non-negative literal that is out of `Decimal`'s range or
/// precision.
fn approximate(literal: &str) -> Option<Decimal> {
    let value: f64 = literal.parse().ok()?;
    if value >= 1.0 {
        Some(Decimal::from_f64(value).unwrap_or(Decimal::MAX))
    } else {
        Some(Decimal::from_f64(value).unwrap_or(Decimal::ZERO))
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
