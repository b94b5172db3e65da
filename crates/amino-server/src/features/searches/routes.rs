//! Search history routes
//!
//! - `POST /api/v1/searches` - aggregate and record a search
//! - `GET /api/v1/searches` - paginated history, newest first
//! - `GET /api/v1/searches/:id` - one recorded search with its stored record

use amino_common::types::RecordSearchRequest;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use super::commands::{run, RunSearchCommand, RunSearchError};
use super::queries::{get, list, GetSearchError, GetSearchQuery, ListSearchesError, ListSearchesQuery};
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::features::FeatureState;

pub fn searches_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_searches).post(run_search))
        .route("/:id", get(get_search))
}

#[tracing::instrument(skip(state, request))]
async fn run_search(
    State(state): State<FeatureState>,
    Json(request): Json<RecordSearchRequest>,
) -> Result<Response, SearchApiError> {
    let command = RunSearchCommand {
        query: request.query,
    };
    let outcome = run::handle(state.db.clone(), &state.aggregator, command).await?;

    Ok(ApiResponse::success(outcome).into_response())
}

#[tracing::instrument(skip(state))]
async fn list_searches(
    State(state): State<FeatureState>,
    Query(query): Query<ListSearchesQuery>,
) -> Result<Response, SearchApiError> {
    let response = list::handle(state.db.clone(), query).await?;

    Ok(ApiResponse::success_with_meta(
        response.items,
        json!({ "pagination": response.pagination }),
    )
    .into_response())
}

#[tracing::instrument(skip(state))]
async fn get_search(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
) -> Result<Response, SearchApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| SearchApiError::InvalidId(id))?;
    let record = get::handle(state.db.clone(), GetSearchQuery { id }).await?;

    Ok(ApiResponse::success(record).into_response())
}

#[derive(Debug, thiserror::Error)]
enum SearchApiError {
    #[error("'{0}' is not a valid search id")]
    InvalidId(String),
    #[error(transparent)]
    Run(#[from] RunSearchError),
    #[error(transparent)]
    List(#[from] ListSearchesError),
    #[error(transparent)]
    Get(#[from] GetSearchError),
}

impl IntoResponse for SearchApiError {
    fn into_response(self) -> Response {
        match self {
            SearchApiError::InvalidId(_) => ErrorResponse::validation(self.to_string()),
            SearchApiError::Run(RunSearchError::InvalidIdentifier(e)) => {
                ErrorResponse::validation(e.to_string())
            },
            SearchApiError::List(ListSearchesError::InvalidPagination(msg)) => {
                ErrorResponse::validation(msg)
            },
            SearchApiError::List(e) => ErrorResponse::internal("Failed to list searches", &e),
            SearchApiError::Get(GetSearchError::NotFound(id)) => {
                ErrorResponse::not_found(format!("Search '{}' not found", id))
            },
            SearchApiError::Get(e) => ErrorResponse::internal("Failed to load search", &e),
        }
    }
}
