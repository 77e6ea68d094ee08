//! Data retrieval
//!
//! Handles:
//! - Quote service HTTP client (FastAPI `{"items": [...]}` envelope)
//! - Offline loading of the same payload from disk
//! - Coercion of loosely-typed wire fields into typed quotes

pub mod api;
pub mod coerce;

pub use api::*;
pub use coerce::*;
