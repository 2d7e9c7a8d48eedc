//! Error types for d3three

use crate::point::Orientation;
use thiserror::Error;

/// Main error type for d3three operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Integration errors: the scene was used before it was fully set up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no axis registered for orientation `{0}`")]
    MissingAxis(Orientation),

    #[error("unknown orientation `{0}`, expected one of x, y, z")]
    UnknownOrientation(String),

    #[error("invalid axis definition: {0}")]
    InvalidAxis(String),
}

/// Result type alias for d3three operations
pub type Result<T> = std::result::Result<T, Error>;
