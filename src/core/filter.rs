//! Quote selection
//!
//! Narrows a raw quote batch to one option type and one quote date and
//! drops implausible volatilities before the surface is built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::{OptionType, Quote};

/// Implied vol (percent) a quote must strictly exceed to be kept
pub const DEFAULT_MIN_VOL: f64 = 1.0;

/// Selection keys for one surface request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteFilter {
    /// Requested option type (exact match)
    pub option_type: OptionType,
    /// Requested quote date (exact match)
    pub quote_date: NaiveDate,
    /// Vol floor, strictly-greater comparison
    /// Default: 1.0
    pub min_vol: f64,
}

impl QuoteFilter {
    /// Filter for a type/date pair with the default vol floor
    pub fn new(option_type: OptionType, quote_date: NaiveDate) -> Self {
        Self {
            option_type,
            quote_date,
            min_vol: DEFAULT_MIN_VOL,
        }
    }

    /// Same filter with a different vol floor
    pub fn with_min_vol(mut self, min_vol: f64) -> Self {
        self.min_vol = min_vol;
        self
    }

    /// Does a single quote pass all three clauses?
    ///
    /// A missing field fails its clause.
    pub fn matches(&self, quote: &Quote) -> bool {
        let type_ok = quote.option_type == Some(self.option_type);
        let date_ok = quote.quote_date == Some(self.quote_date);
        let vol_ok = quote.implied_vol.map(|v| v > self.min_vol).unwrap_or(false);

        type_ok && date_ok && vol_ok
    }

    /// Select matching quotes, preserving input order
    ///
    /// An empty result is a valid outcome, not an error.
    pub fn filter(&self, quotes: &[Quote]) -> Vec<Quote> {
        quotes.iter().filter(|q| self.matches(q)).cloned().collect()
    }
}
