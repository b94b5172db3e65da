//! Aggregate one identifier without recording the search

use amino_common::types::identifier::normalize_identifier;
use amino_common::types::ProteinLookup;
use amino_common::AminoError;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::aggregation::Aggregator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupProteinQuery {
    pub identifier: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupProteinError {
    #[error("{0}")]
    InvalidIdentifier(#[from] AminoError),
}

impl Request<Result<ProteinLookup, LookupProteinError>> for LookupProteinQuery {}

impl crate::cqrs::middleware::Query for LookupProteinQuery {}

impl LookupProteinQuery {
    /// Returns the normalised identifier
    pub fn validate(&self) -> Result<String, LookupProteinError> {
        Ok(normalize_identifier(&self.identifier)?)
    }
}

#[tracing::instrument(skip(aggregator, query), fields(identifier = %query.identifier))]
pub async fn handle(
    aggregator: &Aggregator,
    query: LookupProteinQuery,
) -> Result<ProteinLookup, LookupProteinError> {
    let identifier = query.validate()?;
    crate::cqrs::middleware::trace_query(&query);

    Ok(aggregator.lookup(&identifier).await)
}
