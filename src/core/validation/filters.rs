//! Reusable field filters
//!
//! `deserialize_with` helpers that normalize loosely-typed form input before
//! validation runs. Forms post numbers as strings and leave fields blank, so
//! blank-ish values are folded into defaults here rather than rejected.

use chrono::{DateTime, NaiveDate};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative whole count. Missing, `null`, `false`, `""` and `0` all
/// become 0; numeric strings are parsed; negatives and fractions are errors.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    count_from_value(&value).map_err(D::Error::custom)
}

fn count_from_value(value: &Value) -> Result<u32, String> {
    let number = match value {
        Value::Null => return Ok(0),
        Value::Bool(b) => return Ok(u32::from(*b)),
        Value::String(s) if s.trim().is_empty() => return Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", s))?,
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("{} is not a number", n))?,
        other => return Err(format!("expected a number, got {}", other)),
    };

    if number.is_nan() || number < 0.0 {
        return Err(format!("{} must not be negative", number));
    }
    if number.fract() != 0.0 {
        return Err(format!("{} must be a whole number", number));
    }
    if number > f64::from(u32::MAX) {
        return Err(format!("{} is too large", number));
    }
    Ok(number as u32)
}

/// Optional number; numeric strings are parsed, `null` and `""` are absent
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => Some(
            s.trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("'{}' is not a number", s)))?,
        ),
        other => return Err(D::Error::custom(format!("expected a number, got {}", other))),
    };

    // "NaN", "inf" and overflowing literals parse, but no amount can hold them
    match number {
        Some(n) if !n.is_finite() => {
            Err(D::Error::custom(format!("{} is not a finite number", n)))
        }
        other => Ok(other),
    }
}

/// Trim surrounding whitespace; `null` becomes the empty string
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()).unwrap_or_default())
}

/// Trimmed string, with blank values treated as absent
pub fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp
/// (date inputs are often posted as ISO date-times)
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("'{}' is not a valid date", s))),
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "lenient_count")]
        months: u32,
        #[serde(default, deserialize_with = "lenient_count")]
        days: u32,
    }

    fn counts(value: Value) -> Result<(u32, u32), serde_json::Error> {
        serde_json::from_value::<Counts>(value).map(|c| (c.months, c.days))
    }

    #[test]
    fn test_falsy_counts_become_zero() {
        assert_eq!(counts(json!({})).unwrap(), (0, 0));
        assert_eq!(counts(json!({"months": null, "days": false})).unwrap(), (0, 0));
        assert_eq!(counts(json!({"months": "", "days": 0})).unwrap(), (0, 0));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        assert_eq!(counts(json!({"months": "3", "days": " 15 "})).unwrap(), (3, 15));
        assert_eq!(counts(json!({"months": 2.0, "days": 1})).unwrap(), (2, 1));
    }

    #[test]
    fn test_bad_counts_are_rejected() {
        assert!(counts(json!({"months": -1})).is_err());
        assert!(counts(json!({"days": 1.5})).is_err());
        assert!(counts(json!({"days": "ten"})).is_err());
        assert!(counts(json!({"days": [1]})).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "non_empty")]
        note: Option<String>,
        #[serde(default, deserialize_with = "lenient_number")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_date")]
        born: Option<NaiveDate>,
    }

    #[test]
    fn test_form_normalization() {
        let form: Form = serde_json::from_value(json!({
            "name": "  Basic  ",
            "note": "   ",
            "amount": "500",
            "born": "1990-05-17T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(form.name, "Basic");
        assert_eq!(form.note, None);
        assert_eq!(form.amount, Some(500.0));
        assert_eq!(form.born, NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn test_form_missing_fields() {
        let form: Form = serde_json::from_value(json!({"name": null, "amount": ""})).unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.amount, None);
        assert_eq!(form.born, None);
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        for amount in ["NaN", "inf", "-inf", "1e400"] {
            assert!(
                serde_json::from_value::<Form>(json!({"amount": amount})).is_err(),
                "{}",
                amount
            );
        }
        let form: Form = serde_json::from_value(json!({"amount": "1e3"})).unwrap();
        assert_eq!(form.amount, Some(1000.0));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        assert!(serde_json::from_value::<Form>(json!({"born": "17/05/1990"})).is_err());
    }
}
