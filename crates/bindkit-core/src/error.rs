//! Error types for bindkit.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding of persisted bindings failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Decoded data is structurally valid but unusable
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
