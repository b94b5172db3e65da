//! Amino Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, identifier handling, error types and logging setup for the
//! Amino workspace.
//!
//! # Overview
//!
//! - **Types**: the composite protein record, per-source outcome types and the
//!   persisted search record, shared by the server and the CLI
//! - **Identifiers**: normalisation of user supplied protein/gene identifiers
//! - **Error Handling**: [`AminoError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber initialisation from environment
//!
//! # Example
//!
//! ```no_run
//! use amino_common::types::identifier::normalize_identifier;
//!
//! let id = normalize_identifier("  TP53 ")?;
//! assert_eq!(id, "TP53");
//! # Ok::<(), amino_common::AminoError>(())
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{AminoError, Result};
