//! Aggregation service
//!
//! Queries every source connector for one identifier and merges whatever
//! comes back into a single [`ProteinRecord`](amino_common::types::ProteinRecord). Connector failures are
//! recorded per source and never abort the lookup.
//!
//! The fan-out runs in two phases. Identity connectors (UniProt, NCBI Gene)
//! run first; the accession and gene symbol they resolve are passed as hints
//! to the annotation connectors, which then run together.

pub mod merge;

use amino_common::types::{FailureKind, ProteinLookup, SourceFailure, SourceKind};
use futures::future::join_all;
use std::time::Duration;

use crate::config::SourcesConfig;
use crate::sources::{
    curated, default_connectors, ConnectorQuery, PartialRecord, Phase, SharedConnector, SourceError,
};

pub use merge::merge;

/// Shared, read-only aggregation entry point
pub struct Aggregator {
    connectors: Vec<SharedConnector>,
    timeout: Duration,
}

impl Aggregator {
    /// Each connector call is cut off after `timeout`
    pub fn new(connectors: Vec<SharedConnector>, timeout: Duration) -> Self {
        Self { connectors, timeout }
    }

    /// All production connectors, configured from `config`
    pub fn from_config(config: &SourcesConfig) -> Result<Self, SourceError> {
        Ok(Self::new(
            default_connectors(config)?,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.connectors.iter().map(|c| c.source())
    }

    /// Aggregate everything known about `identifier`
    ///
    /// Never fails: sources that could not contribute are listed in
    /// [`ProteinLookup::failures`], and if every source fails the record only
    /// carries the identifier.
    #[tracing::instrument(skip(self), fields(connectors = self.connectors.len()))]
    pub async fn lookup(&self, identifier: &str) -> ProteinLookup {
        let mut partials = Vec::new();
        let mut failures = Vec::new();

        let query = ConnectorQuery::new(identifier);
        let identity = self.run_phase(Phase::Identity, &query).await;
        collect(identifier, identity, &mut partials, &mut failures);

        let (accession, gene_symbol) = hints(&partials);
        tracing::debug!(?accession, ?gene_symbol, "Identity phase resolved hints");

        let query = query.with_hints(accession, gene_symbol);
        let annotation = self.run_phase(Phase::Annotation, &query).await;
        collect(identifier, annotation, &mut partials, &mut failures);

        failures.sort_by_key(|f: &SourceFailure| f.source);

        let record = merge(identifier, partials);

        tracing::info!(
            identifier = %identifier,
            contributed = record.sources.len(),
            failed = failures.len(),
            "Lookup complete"
        );

        ProteinLookup { record, failures }
    }

    async fn run_phase(
        &self,
        phase: Phase,
        query: &ConnectorQuery,
    ) -> Vec<(SourceKind, Result<PartialRecord, SourceError>)> {
        let calls = self
            .connectors
            .iter()
            .filter(|c| c.phase() == phase)
            .map(|connector| async move {
                let source = connector.source();
                let result = match tokio::time::timeout(self.timeout, connector.fetch(query)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout(self.timeout)),
                };
                (source, result)
            });

        join_all(calls).await
    }
}

/// Sort connector results into partials and failures
///
/// A partial tagged with another identifier is rejected as malformed so it can
/// never leak into the record.
fn collect(
    identifier: &str,
    results: Vec<(SourceKind, Result<PartialRecord, SourceError>)>,
    partials: &mut Vec<PartialRecord>,
    failures: &mut Vec<SourceFailure>,
) {
    for (source, result) in results {
        match result {
            Ok(partial) if partial.identifier == identifier => partials.push(partial),
            Ok(partial) => {
                tracing::warn!(
                    %source,
                    expected = %identifier,
                    got = %partial.identifier,
                    "Discarding partial record for another identifier"
                );
                failures.push(SourceFailure::new(
                    source,
                    FailureKind::Malformed,
                    format!(
                        "returned data for '{}' instead of '{}'",
                        partial.identifier, identifier
                    ),
                ));
            },
            Err(e) => {
                tracing::warn!(%source, kind = %e.kind(), error = %e, "Source failed");
                failures.push(SourceFailure::new(source, e.kind(), e.to_string()));
            },
        }
    }
}

/// Accession and primary gene symbol from the highest priority partial that has them
///
/// Without an accession from the identity sources, a gene symbol is mapped to
/// its accession through the curated table.
fn hints(partials: &[PartialRecord]) -> (Option<String>, Option<String>) {
    let mut ordered: Vec<&PartialRecord> = partials.iter().collect();
    ordered.sort_by_key(|p| p.source);

    let gene_symbol = ordered
        .iter()
        .find_map(|p| p.gene_symbol().map(str::to_string));
    let accession = ordered
        .iter()
        .find_map(|p| p.accession.clone())
        .or_else(|| {
            gene_symbol
                .as_deref()
                .and_then(curated::accession_for)
                .map(str::to_string)
        });

    (accession, gene_symbol)
}
