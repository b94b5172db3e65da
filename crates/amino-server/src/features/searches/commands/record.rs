//! Record a search in the history table
//!
//! The composite record is serialised once and bound as text with a `::json`
//! cast, so `full_data` holds exactly the bytes that were produced here.

use amino_common::types::ProteinRecord;
use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Longest summary stored alongside a search
pub const MAX_SUMMARY_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchCommand {
    pub protein_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub gene_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    /// Serialised composite record
    pub full_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordSearchError {
    #[error("Protein identifier is required")]
    ProteinIdRequired,

    #[error("Stored data must be valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RecordSearchResponse, RecordSearchError>> for RecordSearchCommand {}

impl crate::cqrs::middleware::Command for RecordSearchCommand {}

impl RecordSearchCommand {
    /// Build the row for a freshly aggregated record
    pub fn from_record(record: &ProteinRecord) -> Result<Self, RecordSearchError> {
        Ok(Self {
            protein_id: record.identifier.clone(),
            protein_name: record.protein_name.clone(),
            gene_names: record.gene_names.clone(),
            organism: record.organism.clone(),
            full_data: serde_json::to_string(record)?,
            summary: record.summary.as_deref().map(|s| truncate_chars(s, MAX_SUMMARY_CHARS)),
        })
    }

    pub fn validate(&self) -> Result<(), RecordSearchError> {
        if self.protein_id.trim().is_empty() {
            return Err(RecordSearchError::ProteinIdRequired);
        }
        serde_json::from_str::<serde::de::IgnoredAny>(&self.full_data)?;
        Ok(())
    }
}

/// Cut `text` to at most `max` characters without splitting a character
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[tracing::instrument(skip(pool, command), fields(protein_id = %command.protein_id))]
pub async fn handle(
    pool: PgPool,
    command: RecordSearchCommand,
) -> Result<RecordSearchResponse, RecordSearchError> {
    command.validate()?;
    crate::cqrs::middleware::trace_command(&command);

    let summary = command.summary.as_deref().map(|s| truncate_chars(s, MAX_SUMMARY_CHARS));

    let (id, timestamp): (Uuid, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO protein_searches (protein_id, protein_name, gene_names, organism, full_data, summary)
        VALUES ($1, $2, $3, $4, $5::json, $6)
        RETURNING id, "timestamp"
        "#,
    )
    .bind(&command.protein_id)
    .bind(&command.protein_name)
    .bind(&command.gene_names)
    .bind(&command.organism)
    .bind(&command.full_data)
    .bind(summary)
    .fetch_one(&pool)
    .await?;

    tracing::info!(search_id = %id, "Search recorded");

    Ok(RecordSearchResponse { id, timestamp })
}
