//! Error types for the Amino CLI
//!
//! Messages are user facing and say what to check next.

use amino_common::AminoError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The server answered with an error envelope
    #[error("Server error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected before anything was sent
    #[error("{0}")]
    InvalidInput(#[from] AminoError),

    #[error("Could not reach the Amino server: {0}. Check that it is running and that --server-url is correct.")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from the server: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
