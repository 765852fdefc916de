//! Error types for watch-core

use thiserror::Error;

/// Result type alias for watch-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for domain-model validation
#[derive(Error, Debug)]
pub enum Error {
    /// A pattern's required parameter is absent or has the wrong shape
    #[error("pattern {pattern} requires parameter `{key}`")]
    MissingParameter { pattern: String, key: String },

    /// Symbol is empty or otherwise unusable
    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),
}
