//! List recorded searches, newest first

use amino_common::types::SearchHistoryItem;
use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::shared::{PaginationMetadata, PaginationParams};

/// Page parameters are kept flat so they decode straight from a query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSearchesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSearchesResponse {
    pub items: Vec<SearchHistoryItem>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum ListSearchesError {
    #[error("{0}")]
    InvalidPagination(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListSearchesResponse, ListSearchesError>> for ListSearchesQuery {}

impl crate::cqrs::middleware::Query for ListSearchesQuery {}

impl ListSearchesQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    pub fn validate(&self) -> Result<(), ListSearchesError> {
        self.pagination()
            .validate()
            .map_err(ListSearchesError::InvalidPagination)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    protein_id: String,
    protein_name: Option<String>,
    gene_names: Vec<String>,
    organism: Option<String>,
    timestamp: DateTime<Utc>,
    summary: Option<String>,
}

impl From<HistoryRow> for SearchHistoryItem {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            protein_id: row.protein_id,
            protein_name: row.protein_name,
            gene_names: row.gene_names,
            organism: row.organism,
            timestamp: row.timestamp,
            summary: row.summary,
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListSearchesQuery,
) -> Result<ListSearchesResponse, ListSearchesError> {
    query.validate()?;
    crate::cqrs::middleware::trace_query(&query);

    let params = query.pagination();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM protein_searches")
        .fetch_one(&pool)
        .await?;

    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT id, protein_id, protein_name, gene_names, organism, "timestamp", summary
        FROM protein_searches
        ORDER BY "timestamp" DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(params.per_page())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    Ok(ListSearchesResponse {
        items: rows.into_iter().map(SearchHistoryItem::from).collect(),
        pagination: PaginationMetadata::from_params(&params, total),
    })
}
