//! # MINI IBEX Volatility Surface
//!
//! Builds and renders the implied volatility surface for options on the
//! MINI IBEX index future from quotes served by a remote data service.
//!
//! ## Overview
//!
//! The pipeline is deliberately small: fetch the full quote table, narrow
//! it to one option type and one quote date, and aggregate what remains
//! into a rectangular expiry × strike grid of mean implied vols.
//! Everything is recomputed from scratch on every request; nothing is
//! cached between calls.
//!
//! ## Key Components
//!
//! - **Data fetching**: blocking client for the FastAPI quote service
//!   (`{"items": [...]}` envelope) with tolerant field coercion, where
//!   junk becomes a missing value and never a zero
//! - **QuoteFilter**: exact option-type/quote-date selection plus a
//!   configurable implied-vol floor
//! - **VolSurface**: rectangular grid of mean implied vols with
//!   missing-cell markers
//! - **Rendering**: terminal tables, SVG smile charts, and an egui
//!   dashboard (`surface-gui`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ibex_surface::prelude::*;
//!
//! let quotes = fetch_quotes().unwrap();
//! let day = latest_quote_date(&quotes).unwrap();
//!
//! let filtered = QuoteFilter::new(OptionType::Call, day).filter(&quotes);
//! match VolSurface::from_quotes(&filtered) {
//!     Some(surface) => println!("{}", surface_table(&surface)),
//!     None => println!("No data for this selection."),
//! }
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Price options or compute Greeks
//! - Retry or cache network fetches
//! - Validate the service schema beyond field coercion

pub mod core;
pub mod data;
pub mod render;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::core::{
        latest_quote_date, quote_dates, OptionType, Quote, QuoteFilter, SurfaceError,
        SurfaceResult, VolSurface, DEFAULT_MIN_VOL,
    };
    pub use crate::data::{fetch_quotes, load_quotes_file, ApiClient, ApiConfig, RawQuote};
    pub use crate::render::{quote_table, render_smile_svg, surface_table, DEFAULT_MAX_ROWS};
}

// Re-export the error pair at crate root
pub use crate::core::{SurfaceError, SurfaceResult};
