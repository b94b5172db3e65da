//! Protein lookup routes
//!
//! - `GET /api/v1/proteins/:identifier` - aggregate all sources, nothing is recorded

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use super::queries::{LookupProteinError, LookupProteinQuery};
use crate::aggregation::Aggregator;
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn proteins_routes() -> Router<Arc<Aggregator>> {
    Router::new().route("/:identifier", get(lookup_protein))
}

/// `200` with `{ record, failures }`; `400` for an invalid identifier
#[tracing::instrument(skip(aggregator))]
async fn lookup_protein(
    State(aggregator): State<Arc<Aggregator>>,
    Path(identifier): Path<String>,
) -> Result<Response, LookupProteinError> {
    let lookup = super::queries::lookup::handle(&aggregator, LookupProteinQuery { identifier }).await?;

    tracing::debug!(
        sources = lookup.record.sources.len(),
        failures = lookup.failures.len(),
        "Protein looked up via API"
    );

    Ok(ApiResponse::success(lookup).into_response())
}

impl IntoResponse for LookupProteinError {
    fn into_response(self) -> Response {
        match self {
            LookupProteinError::InvalidIdentifier(e) => ErrorResponse::validation(e.to_string()),
        }
    }
}
