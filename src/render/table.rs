//! Text rendering of quotes and surfaces
//!
//! Fixed-width tables for terminal output: the filtered quote listing in
//! the dashboard's display-column order, and the expiry × strike vol grid.
//! `-` marks a missing value in both.

use chrono::NaiveDate;

use crate::core::{OptionType, Quote, VolSurface};

/// Rows shown by default, matching the dashboard's table page size
pub const DEFAULT_MAX_ROWS: usize = 20;

/// Quote listing restricted to the display columns
///
/// Column order is quote date, expiry, strike, type, price, vol. At most
/// `max_rows` rows are rendered; a trailing line reports any truncation.
pub fn quote_table(quotes: &[Quote], max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str("quote date | expiry     |   strike | type |    price |    vol\n");
    out.push_str("-----------+------------+----------+------+----------+-------\n");

    for quote in quotes.iter().take(max_rows) {
        out.push_str(&format!(
            "{} | {} | {:>8} | {:<4} | {:>8} | {:>6}\n",
            fmt_date(quote.quote_date),
            fmt_date(quote.expiry),
            fmt_num(quote.strike, 1),
            fmt_type(quote.option_type),
            fmt_num(quote.price, 2),
            fmt_num(quote.implied_vol, 2),
        ));
    }

    if quotes.len() > max_rows {
        out.push_str(&format!("(showing {} of {} rows)\n", max_rows, quotes.len()));
    }

    out
}

/// Expiry × strike grid of mean vols
pub fn surface_table(surface: &VolSurface) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<14}|", "Expiry\\Strike"));
    for &strike in &surface.strikes {
        out.push_str(&format!(" {:>8.0}", strike));
    }
    out.push('\n');

    out.push_str(&format!("{}+", "-".repeat(14)));
    out.push_str(&"-".repeat(9 * surface.strikes.len()));
    out.push('\n');

    for (row, expiry) in surface.expiries.iter().enumerate() {
        out.push_str(&format!("{:<14}|", expiry.to_string()));
        for col in 0..surface.strikes.len() {
            match surface.vols[[row, col]] {
                Some(vol) => out.push_str(&format!(" {:>8.2}", vol)),
                None => out.push_str(&format!(" {:>8}", "-")),
            }
        }
        out.push('\n');
    }

    out
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => format!("{:<10}", "-"),
    }
}

fn fmt_num(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn fmt_type(option_type: Option<OptionType>) -> String {
    match option_type {
        Some(t) => t.to_string(),
        None => "-".to_string(),
    }
}
