//! Error types for the surface service
//!
//! Only the data and render layers construct these. Filtering and surface
//! construction are total and report "nothing to show" through their
//! return types instead of errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

impl SurfaceError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
