//! Example: Build a volatility surface from a handful of quotes
//!
//! Run with: cargo run --example build_surface

use chrono::NaiveDate;
use ibex_surface::prelude::*;

fn main() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let june = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    let sept = NaiveDate::from_ymd_opt(2024, 9, 20).unwrap();

    let quotes = vec![
        Quote::new(day, june, 9000.0, OptionType::Call, 182.5, 18.0),
        Quote::new(day, june, 9000.0, OptionType::Call, 180.0, 20.0),
        Quote::new(day, june, 9100.0, OptionType::Call, 121.0, 22.0),
        Quote::new(day, sept, 9100.0, OptionType::Call, 240.0, 21.5),
        Quote::new(day, june, 9000.0, OptionType::Put, 95.0, 19.0), // wrong type
        Quote::new(day, june, 9200.0, OptionType::Call, 80.0, 0.4), // below the vol floor
    ];

    println!("=== MINI IBEX Surface ===\n");

    let filter = QuoteFilter::new(OptionType::Call, day);
    let filtered = filter.filter(&quotes);
    println!("{} quotes, {} kept after filtering\n", quotes.len(), filtered.len());

    match VolSurface::from_quotes(&filtered) {
        Some(surface) => {
            let (expiries, strikes) = surface.shape();
            println!(
                "Grid: {} expiries x {} strikes, {} populated cells\n",
                expiries,
                strikes,
                surface.populated_cells()
            );
            println!("{}", surface_table(&surface));
            println!("{}", quote_table(&filtered, DEFAULT_MAX_ROWS));
        }
        None => println!("No data for this selection."),
    }
}
