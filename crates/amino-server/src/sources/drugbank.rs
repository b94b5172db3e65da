//! DrugBank drug-target associations
//!
//! DrugBank offers no open API, so associations come from the curated table
//! with the same exact-then-similar gene lookup used for diseases.

use amino_common::types::SourceKind;
use async_trait::async_trait;

use super::curated::{self, CuratedMatch};
use super::{ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};

#[derive(Debug, Default)]
pub struct DrugbankConnector;

impl DrugbankConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceConnector for DrugbankConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Drugbank
    }

    fn phase(&self) -> Phase {
        Phase::Annotation
    }

    #[tracing::instrument(skip_all, fields(source = "drugbank", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let symbol = query.gene_symbol_or_identifier();
        let (matched, drugs) = curated::drugs_for(symbol)
            .ok_or_else(|| SourceError::not_found(format!("no curated drugs for {}", symbol)))?;

        if let CuratedMatch::Similar(gene) = matched {
            tracing::debug!(gene = %symbol, similar_gene = gene, "Using drugs of a similar gene");
        }

        let mut partial = PartialRecord::new(SourceKind::Drugbank, &query.identifier);
        partial.drugs = drugs
            .iter()
            .map(|d| d.to_association(SourceKind::Drugbank))
            .collect();

        Ok(partial)
    }
}
