//! Core data types and transformations
//!
//! Defines the fundamental pieces:
//! - Quote: one option quote row, every field optional
//! - QuoteFilter: type/date/vol-floor selection
//! - VolSurface: expiry × strike grid of mean implied vols
//! - SurfaceError: crate-wide error type

pub mod error;
pub mod filter;
pub mod quote;
pub mod surface;

pub use error::*;
pub use filter::*;
pub use quote::*;
pub use surface::*;
