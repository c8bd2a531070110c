//! Per-kind conversion of raw input values.
//!
//! Coercions never see [`Value::Null`]; the engine skips coercion for absent
//! values. Text inputs are trimmed before parsing.

use super::{CoercionError, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::str::FromStr;

/// Text values (case-insensitive) that coerce to `false`.
pub const FALSE_VALUES: [&str; 5] = ["0", "{}", "[]", "none", "false"];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const TIME_FORMATS: [&str; 5] = [
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

static DATETIME_FORMATS: Lazy<Vec<String>> = Lazy::new(|| {
    DATE_FORMATS
        .iter()
        .flat_map(|date| {
            [" ", "T", ", "].into_iter().flat_map(move |separator| {
                TIME_FORMATS
                    .iter()
                    .map(move |time| format!("{date}{separator}{time}"))
            })
        })
        .collect()
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static MERIDIEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d)\s*([ap])\.?m\.?$").expect("meridiem pattern compiles")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static BARE_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|\s)(\d{1,2}) ([ap]m)$").expect("bare hour pattern compiles")
});

/// Renders any value as text.
#[must_use]
pub fn to_text(value: Value) -> Value {
    match value {
        Value::Str(_) => value,
        other => Value::Str(other.to_string()),
    }
}

/// Coerces a value to an integer, truncating fractional numbers.
///
/// # Errors
///
/// Returns a `coerce_int` error when the value has no integer reading.
pub fn to_integer(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_int";
    match value {
        Value::Int(_) => Ok(value),
        Value::Bool(flag) => Ok(Value::Int(i64::from(flag))),
        Value::Float(number) => Decimal::from_f64(number)
            .and_then(|decimal| decimal.trunc().to_i64())
            .map(Value::Int)
            .ok_or_else(|| CoercionError::new(KEY, format!("{number} is out of integer range"))),
        Value::Decimal(decimal) => decimal
            .trunc()
            .to_i64()
            .map(Value::Int)
            .ok_or_else(|| CoercionError::new(KEY, format!("{decimal} is out of integer range"))),
        Value::Str(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|err| CoercionError::new(KEY, format!("'{text}': {err}"))),
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces a value to a float. Empty text becomes null.
///
/// # Errors
///
/// Returns a `coerce_float` error for non-numeric values.
pub fn to_float(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_float";
    match value {
        Value::Float(_) => Ok(value),
        Value::Bool(flag) => Ok(Value::Float(if flag { 1.0 } else { 0.0 })),
        Value::Int(number) => Decimal::from(number)
            .to_f64()
            .map(Value::Float)
            .ok_or_else(|| CoercionError::new(KEY, format!("{number} has no float form"))),
        Value::Decimal(decimal) => decimal
            .to_f64()
            .map(Value::Float)
            .ok_or_else(|| CoercionError::new(KEY, format!("{decimal} has no float form"))),
        Value::Str(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::Str(text) => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|err| CoercionError::new(KEY, format!("'{text}': {err}"))),
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces a value to an exact decimal. Empty text becomes null.
///
/// # Errors
///
/// Returns a `coerce_decimal` error for non-numeric values.
pub fn to_decimal(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_decimal";
    match value {
        Value::Decimal(_) => Ok(value),
        Value::Bool(flag) => Ok(Value::Decimal(Decimal::from(i64::from(flag)))),
        Value::Int(number) => Ok(Value::Decimal(Decimal::from(number))),
        Value::Float(number) => Decimal::from_f64(number)
            .map(Value::Decimal)
            .ok_or_else(|| CoercionError::new(KEY, format!("{number} has no decimal form"))),
        Value::Str(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::Str(text) => {
            let trimmed = text.trim();
            Decimal::from_str(trimmed)
                .or_else(|_| Decimal::from_scientific(trimmed))
                .map(Value::Decimal)
                .map_err(|err| CoercionError::new(KEY, format!("'{text}': {err}")))
        }
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces a value to a calendar date. Empty text becomes null.
///
/// Datetimes keep their date part.
///
/// # Errors
///
/// Returns a `coerce_date` error for unparseable text and non-temporal values.
pub fn to_date(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_date";
    match value {
        Value::Date(_) => Ok(value),
        Value::DateTime(datetime) => Ok(Value::Date(datetime.date())),
        Value::Str(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::Str(text) => parse_date(&text)
            .or_else(|| parse_datetime(&text).map(|datetime| datetime.date()))
            .map(Value::Date)
            .ok_or_else(|| unparseable(KEY, &text)),
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces a value to a wall-clock time. Empty text becomes null.
///
/// Datetimes keep their time part.
///
/// # Errors
///
/// Returns a `coerce_time` error for unparseable text and non-temporal values.
pub fn to_time(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_time";
    match value {
        Value::Time(_) => Ok(value),
        Value::DateTime(datetime) => Ok(Value::Time(datetime.time())),
        Value::Str(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::Str(text) => parse_time(&text)
            .or_else(|| parse_datetime(&text).map(|datetime| datetime.time()))
            .map(Value::Time)
            .ok_or_else(|| unparseable(KEY, &text)),
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces a value to a datetime. Empty text becomes null.
///
/// Dates are placed at midnight.
///
/// # Errors
///
/// Returns a `coerce_datetime` error for unparseable text and non-temporal
/// values.
pub fn to_datetime(value: Value) -> Result<Value, CoercionError> {
    const KEY: &str = "coerce_datetime";
    match value {
        Value::DateTime(_) => Ok(value),
        Value::Date(date) => Ok(Value::DateTime(date.and_time(NaiveTime::MIN))),
        Value::Str(text) if text.trim().is_empty() => Ok(Value::Null),
        Value::Str(text) => parse_datetime(&text)
            .or_else(|| parse_date(&text).map(|date| date.and_time(NaiveTime::MIN)))
            .map(Value::DateTime)
            .ok_or_else(|| unparseable(KEY, &text)),
        other => Err(unsupported(KEY, &other)),
    }
}

/// Coerces any value to a boolean.
///
/// The value's text form is compared case-insensitively against
/// [`FALSE_VALUES`]; everything else is `true`.
#[must_use]
pub fn to_boolean(value: &Value) -> Value {
    match value {
        Value::Bool(_) => value.clone(),
        other => {
            let text = other.to_string().trim().to_lowercase();
            Value::Bool(!FALSE_VALUES.contains(&text.as_str()))
        }
    }
}

/// Reduces a related-row reference to its lookup key.
///
/// Maps yield the entry under `column` (null when absent); scalars pass
/// through unchanged.
#[must_use]
pub fn to_reference_key(column: &str, value: Value) -> Value {
    match value {
        Value::Map(mut entries) => entries.shift_remove(column).unwrap_or_default(),
        other => other,
    }
}

/// Reduces a collection of related-row references to a list of lookup keys.
///
/// A single scalar or map is treated as a one-element list.
#[must_use]
pub fn to_reference_keys(column: &str, value: Value) -> Value {
    let items = match value {
        Value::List(items) => items,
        other => vec![other],
    };
    Value::List(
        items
            .into_iter()
            .map(|item| to_reference_key(column, item))
            .collect(),
    )
}

fn normalise_time_text(text: &str) -> String {
    let spaced = MERIDIEM.replace(text.trim(), "$1 ${2}m");
    BARE_HOUR.replace(&spaced, "$1$2:00 $3").into_owned()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    let normalised = normalise_time_text(text);
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalised, format).ok())
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(zoned.naive_local());
    }
    let normalised = normalise_time_text(trimmed);
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalised, format).ok())
}

fn unparseable(key: &'static str, text: &str) -> CoercionError {
    CoercionError::new(key, format!("unrecognised format '{text}'"))
}

fn unsupported(key: &'static str, value: &Value) -> CoercionError {
    CoercionError::new(key, format!("cannot convert a {} value", value.type_name()))
}
