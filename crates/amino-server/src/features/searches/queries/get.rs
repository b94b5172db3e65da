//! Fetch one recorded search with its stored composite record

use amino_common::types::SearchRecord;
use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSearchQuery {
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSearchError {
    #[error("Search '{0}' not found")]
    NotFound(Uuid),

    #[error("Stored search data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<SearchRecord, GetSearchError>> for GetSearchQuery {}

impl crate::cqrs::middleware::Query for GetSearchQuery {}

#[derive(Debug, sqlx::FromRow)]
struct SearchRow {
    id: Uuid,
    protein_id: String,
    protein_name: Option<String>,
    gene_names: Vec<String>,
    organism: Option<String>,
    timestamp: DateTime<Utc>,
    full_data: String,
    summary: Option<String>,
}

impl TryFrom<SearchRow> for SearchRecord {
    type Error = serde_json::Error;

    fn try_from(row: SearchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            protein_id: row.protein_id,
            protein_name: row.protein_name,
            gene_names: row.gene_names,
            organism: row.organism,
            timestamp: row.timestamp,
            full_data: RawValue::from_string(row.full_data)?,
            summary: row.summary,
        })
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetSearchQuery) -> Result<SearchRecord, GetSearchError> {
    crate::cqrs::middleware::trace_query(&query);

    // json columns keep their input text, so ::text returns the stored bytes
    let row = sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT id, protein_id, protein_name, gene_names, organism, "timestamp",
               full_data::text AS full_data, summary
        FROM protein_searches
        WHERE id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetSearchError::NotFound(query.id))?;

    Ok(SearchRecord::try_from(row)?)
}
