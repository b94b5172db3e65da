//! Run a search: aggregate an identifier and record it
//!
//! Recording is best effort. When the history table cannot be written the
//! record is still returned and the failure is reported as a warning.

use amino_common::types::identifier::normalize_identifier;
use amino_common::types::SearchOutcome;
use amino_common::AminoError;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::record::{self, RecordSearchCommand};
use crate::aggregation::Aggregator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSearchCommand {
    pub query: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RunSearchError {
    #[error("{0}")]
    InvalidIdentifier(#[from] AminoError),
}

impl Request<Result<SearchOutcome, RunSearchError>> for RunSearchCommand {}

impl crate::cqrs::middleware::Command for RunSearchCommand {}

impl RunSearchCommand {
    /// Returns the normalised identifier
    pub fn validate(&self) -> Result<String, RunSearchError> {
        Ok(normalize_identifier(&self.query)?)
    }
}

#[tracing::instrument(skip(pool, aggregator, command), fields(query = %command.query))]
pub async fn handle(
    pool: PgPool,
    aggregator: &Aggregator,
    command: RunSearchCommand,
) -> Result<SearchOutcome, RunSearchError> {
    let identifier = command.validate()?;
    crate::cqrs::middleware::trace_command(&command);

    let lookup = aggregator.lookup(&identifier).await;

    let mut warnings = Vec::new();
    let saved = match RecordSearchCommand::from_record(&lookup.record) {
        Ok(row) => record::handle(pool, row).await,
        Err(e) => Err(e),
    };

    let search_id = match saved {
        Ok(response) => Some(response.id),
        Err(e) => {
            tracing::warn!(error = %e, "Search could not be recorded");
            warnings.push(format!("Search could not be saved to history: {}", e));
            None
        },
    };

    Ok(SearchOutcome {
        record: lookup.record,
        failures: lookup.failures,
        search_id,
        warnings,
    })
}
