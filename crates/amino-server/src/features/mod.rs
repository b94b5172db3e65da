//! Feature slices of the Amino API
//!
//! Each feature is a vertical slice following the CQRS layout:
//! - `commands/` - write operations
//! - `queries/` - read operations
//! - `routes.rs` - HTTP route definitions
//!
//! # Features
//!
//! - **proteins**: live aggregation of one identifier, nothing recorded
//! - **searches**: aggregation with history, plus history listing and lookup

pub mod proteins;
pub mod searches;
pub mod shared;

use axum::Router;
use std::sync::Arc;

use crate::aggregation::Aggregator;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Search history store
    pub db: sqlx::PgPool,
    pub aggregator: Arc<Aggregator>,
}

/// Mounts every feature under its path prefix
///
/// - `/proteins` - protein lookup
/// - `/searches` - recorded searches
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/proteins", proteins::proteins_routes().with_state(state.aggregator.clone()))
        .nest("/searches", searches::searches_routes().with_state(state))
}
