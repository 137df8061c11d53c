// Passbox — Top-level error types
//
// Aggregates errors from the store and generator modules into a single
// error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all passbox operations.
#[derive(Debug, Error)]
pub enum PassboxError {
    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("password generation error: {0}")]
    Generator(#[from] crate::generator::GeneratorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PassboxError>;
