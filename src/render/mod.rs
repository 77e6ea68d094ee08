//! Rendering collaborators
//!
//! Text tables for the terminal and SVG smile charts for files. The
//! interactive dashboard lives in the `surface-gui` binary.

pub mod plot;
pub mod table;

pub use plot::*;
pub use table::*;
