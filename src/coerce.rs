//! Type coercion of raw strings into typed scalars
//!
//! Number parsing accepts the longest leading decimal literal and ignores
//! whatever follows it, so `"42abc"` coerces to `42` and `"3.5px"` to `3.5`.
//! Leading whitespace is skipped, `Infinity` (optionally signed) is accepted,
//! and a string with no leading number fails.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::{EnvValue, ValueType};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?)(?:(Infinity)|(\d+)?(?:\.(\d*))?(?:[eE]([+-]?\d+))?)")
        .expect("valid regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("Failed to parse \"{key}\" to a boolean. Received value \"{value}\"")]
    Boolean { key: String, value: String },

    #[error("Failed to parse {{ {key}: \"{value}\" }} to a number")]
    Number { key: String, value: String },

    #[error("unexpected variable type: {0}")]
    UnsupportedType(ValueType),
}

/// Coerce `raw` into `value_type`. `key` is only used in error messages.
///
/// Strings are not coerced; callers store them untouched.
pub fn coerce(key: &str, raw: &str, value_type: ValueType) -> Result<EnvValue, CoerceError> {
    match value_type {
        ValueType::Boolean => match raw {
            "true" => Ok(EnvValue::Boolean(true)),
            "false" => Ok(EnvValue::Boolean(false)),
            _ => Err(CoerceError::Boolean { key: key.to_string(), value: raw.to_string() }),
        },
        ValueType::Number => parse_leading_float(raw)
            .map(EnvValue::Number)
            .ok_or_else(|| CoerceError::Number { key: key.to_string(), value: raw.to_string() }),
        other => Err(CoerceError::UnsupportedType(other)),
    }
}

/// Parse the longest leading float literal of `input`.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let caps = LEADING_NUMBER.captures(input.trim_start())?;
    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");

    if caps.get(2).is_some() {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let frac = caps.get(4).map(|m| m.as_str()).unwrap_or("");
    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let exp = caps.get(5).map(|m| m.as_str()).unwrap_or("0");
    let literal = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int.is_empty() { "0" } else { int },
        if frac.is_empty() { "0" } else { frac },
        exp
    );
    literal.parse::<f64>().ok()
}
