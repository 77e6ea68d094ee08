//! Field coercion for the quote service payload
//!
//! The service's table is loosely typed: numerics arrive as JSON numbers
//! or as strings, dates as "YYYY-MM-DD" or full timestamps, and junk
//! values appear in every column. All of that is absorbed here, at the
//! retrieval boundary: a field that cannot be coerced becomes `None` on
//! the typed `Quote`, never a zero and never an error, so one bad row
//! cannot poison a batch.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{OptionType, Quote};

/// One raw row of the quote table, wire field names preserved
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "fecha", default)]
    quote_date: Value,
    #[serde(rename = "vencimiento", default)]
    expiry: Value,
    #[serde(default)]
    strike: Value,
    #[serde(rename = "tipo", default)]
    option_type: Value,
    #[serde(rename = "precio", default)]
    price: Value,
    #[serde(rename = "σ", default)]
    implied_vol: Value,
}

impl RawQuote {
    /// Coerce every field to its typed form
    pub fn coerce(&self) -> Quote {
        Quote {
            quote_date: coerce_date(&self.quote_date),
            expiry: coerce_date(&self.expiry),
            strike: coerce_f64(&self.strike),
            option_type: coerce_option_type(&self.option_type),
            price: coerce_f64(&self.price),
            implied_vol: coerce_f64(&self.implied_vol),
        }
    }
}

/// Numeric coercion: JSON numbers and numeric strings pass, junk is `None`
///
/// Non-finite values are rejected so NaN can never enter a mean.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Date coercion: "YYYY-MM-DD", or the date part of an ISO timestamp
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    // "2024-05-01T00:00:00" keeps its date part
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

/// Option-type coercion: the exact "Call"/"Put" labels only
///
/// Matching is deliberately case-sensitive and untrimmed; an unrecognized
/// label is a missing value and can never match a filter key.
pub fn coerce_option_type(value: &Value) -> Option<OptionType> {
    match value.as_str()? {
        "Call" => Some(OptionType::Call),
        "Put" => Some(OptionType::Put),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(row: Value) -> RawQuote {
        serde_json::from_value(row).unwrap()
    }

    #[test]
    fn test_well_formed_row() {
        let quote = raw(json!({
            "fecha": "2024-05-01",
            "vencimiento": "2024-06-21",
            "strike": 9000.0,
            "tipo": "Call",
            "precio": 120.5,
            "σ": 18.5,
        }))
        .coerce();

        assert_eq!(
            quote,
            Quote::new(
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
                9000.0,
                OptionType::Call,
                120.5,
                18.5,
            )
        );
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let quote = raw(json!({
            "fecha": "2024-05-01",
            "vencimiento": "2024-06-21",
            "strike": "9100",
            "tipo": "Put",
            "precio": " 98.25 ",
            "σ": "20.75",
        }))
        .coerce();

        assert_eq!(quote.strike, Some(9100.0));
        assert_eq!(quote.price, Some(98.25));
        assert_eq!(quote.implied_vol, Some(20.75));
    }

    #[test]
    fn test_junk_becomes_missing_not_zero() {
        let quote = raw(json!({
            "fecha": "not a date",
            "vencimiento": null,
            "strike": "n/a",
            "tipo": "Straddle",
            "precio": {},
            "σ": "",
        }))
        .coerce();

        assert_eq!(quote, Quote::default());
        assert_ne!(quote.strike, Some(0.0));
        assert_ne!(quote.implied_vol, Some(0.0));
    }

    #[test]
    fn test_absent_keys_are_missing() {
        let quote = raw(json!({ "strike": 9000 })).coerce();

        assert_eq!(quote.strike, Some(9000.0));
        assert!(quote.quote_date.is_none());
        assert!(quote.option_type.is_none());
    }

    #[test]
    fn test_timestamp_keeps_date_part() {
        let value = json!("2024-06-21T00:00:00");
        assert_eq!(
            coerce_date(&value),
            Some(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
        );
    }

    #[test]
    fn test_non_finite_numeric_is_rejected() {
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!("inf")), None);
    }

    #[test]
    fn test_option_type_is_exact_match() {
        assert_eq!(coerce_option_type(&json!("Call")), Some(OptionType::Call));
        assert_eq!(coerce_option_type(&json!("Put")), Some(OptionType::Put));
        assert_eq!(coerce_option_type(&json!("call")), None);
        assert_eq!(coerce_option_type(&json!("PUT")), None);
        assert_eq!(coerce_option_type(&json!("Call ")), None);
        assert_eq!(coerce_option_type(&json!(1)), None);
    }
}
