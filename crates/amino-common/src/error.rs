//! Error types shared across Amino crates

use thiserror::Error;

/// Result type alias for Amino operations
pub type Result<T> = std::result::Result<T, AminoError>;

/// Main error type for Amino
#[derive(Error, Debug)]
pub enum AminoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AminoError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}
