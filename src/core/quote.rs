//! Option quote records
//!
//! One `Quote` is one row of the remote service's options table. Every
//! data field is optional: a field the retrieval layer could not coerce
//! arrives as `None`, and downstream aggregation skips missing values
//! instead of treating them as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Exact label used on the wire and in the UI
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option quote row
///
/// Implied volatility is in percentage units (18.5 means 18.5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Date the quote was observed
    pub quote_date: Option<NaiveDate>,
    /// Option expiration date
    pub expiry: Option<NaiveDate>,
    /// Strike price
    pub strike: Option<f64>,
    /// Call or Put
    pub option_type: Option<OptionType>,
    /// Traded or settlement price
    pub price: Option<f64>,
    /// Implied volatility in percent
    pub implied_vol: Option<f64>,
}

impl Quote {
    /// Create a fully populated quote
    pub fn new(
        quote_date: NaiveDate,
        expiry: NaiveDate,
        strike: f64,
        option_type: OptionType,
        price: f64,
        implied_vol: f64,
    ) -> Self {
        Self {
            quote_date: Some(quote_date),
            expiry: Some(expiry),
            strike: Some(strike),
            option_type: Some(option_type),
            price: Some(price),
            implied_vol: Some(implied_vol),
        }
    }
}

/// Distinct quote dates present in a batch, ascending
///
/// Rows with a missing date are skipped.
pub fn quote_dates(quotes: &[Quote]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = quotes.iter().filter_map(|q| q.quote_date).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Most recent quote date in a batch, if any
pub fn latest_quote_date(quotes: &[Quote]) -> Option<NaiveDate> {
    quotes.iter().filter_map(|q| q.quote_date).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_all_missing() {
        let q = Quote::default();
        assert!(q.quote_date.is_none());
        assert!(q.expiry.is_none());
        assert!(q.strike.is_none());
        assert!(q.option_type.is_none());
        assert!(q.price.is_none());
        assert!(q.implied_vol.is_none());
    }

    #[test]
    fn test_quote_dates_sorted_distinct() {
        let quotes = vec![
            Quote {
                quote_date: Some(date(2024, 5, 2)),
                ..Default::default()
            },
            Quote {
                quote_date: Some(date(2024, 5, 1)),
                ..Default::default()
            },
            Quote {
                quote_date: None,
                ..Default::default()
            },
            Quote {
                quote_date: Some(date(2024, 5, 2)),
                ..Default::default()
            },
        ];

        let dates = quote_dates(&quotes);
        assert_eq!(dates, vec![date(2024, 5, 1), date(2024, 5, 2)]);
        assert_eq!(latest_quote_date(&quotes), Some(date(2024, 5, 2)));
    }

    #[test]
    fn test_latest_of_empty_batch() {
        assert_eq!(latest_quote_date(&[]), None);
        assert!(quote_dates(&[]).is_empty());
    }

    #[test]
    fn test_option_type_labels() {
        assert_eq!(OptionType::Call.as_str(), "Call");
        assert_eq!(OptionType::Put.to_string(), "Put");
    }
}
