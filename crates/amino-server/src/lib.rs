//! Amino Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP server aggregating protein and gene information from public
//! bioinformatics sources into one composite record.
//!
//! # Overview
//!
//! - **Sources**: one connector per upstream (UniProt, NCBI Gene, RCSB PDB,
//!   AlphaFold DB, STRING, DisGeNET, DrugBank)
//! - **Aggregation**: concurrent fan-out with per-source timeouts, merged by
//!   source priority
//! - **API Endpoints**: protein lookup and recorded search history
//! - **Database**: PostgreSQL search history with SQLx
//! - **Middleware**: CORS, request tracing and compression
//!
//! # Architecture
//!
//! Feature slices follow a **CQRS** layout:
//!
//! - **Commands** write state, e.g. recording a search
//! - **Queries** only read, e.g. listing the history or aggregating a protein
//!
//! A search whose history row cannot be written still returns its record; the
//! failure is reported as a warning.
//!
//! # Example
//!
//! ```no_run
//! use amino_server::{aggregation::Aggregator, api, config::Config, db};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = api::AppState {
//!         db: db::create_lazy_pool(&config.database)?,
//!         aggregator: Arc::new(Aggregator::from_config(&config.sources)?),
//!     };
//!     api::serve(&config, state).await
//! }
//! ```

pub mod aggregation;
pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod features;
pub mod middleware;
pub mod sources;

pub use aggregation::Aggregator;
pub use sources::{SourceConnector, SourceError};
