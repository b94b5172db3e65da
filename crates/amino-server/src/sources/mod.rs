//! Source connectors
//!
//! Each connector wraps one external database and turns a [`ConnectorQuery`]
//! into a [`PartialRecord`] holding only the fields that database knows about.
//! Connectors never see each other; the aggregation service decides what runs
//! when and how partial records are merged.
//!
//! # Connectors
//!
//! | connector | phase | needs |
//! |-----------|-------|-------|
//! | [`uniprot::UniprotConnector`] | identity | identifier |
//! | [`ncbi::NcbiGeneConnector`] | identity | identifier |
//! | [`pdb::PdbConnector`] | annotation | accession or gene symbol |
//! | [`alphafold::AlphafoldConnector`] | annotation | accession |
//! | [`string_db::StringConnector`] | annotation | gene symbol or identifier |
//! | [`disgenet::DisgenetConnector`] | annotation | gene symbol |
//! | [`drugbank::DrugbankConnector`] | annotation | gene symbol |

pub mod alphafold;
pub mod curated;
pub mod disgenet;
pub mod drugbank;
pub mod http;
pub mod ncbi;
pub mod pdb;
pub mod string_db;
pub mod uniprot;

use amino_common::types::{
    DiseaseAssociation, DrugAssociation, FailureKind, GoTerm, InteractionPartner, SourceKind,
    StructureEntry,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::SourcesConfig;

/// What a connector is asked about
///
/// `identifier` is the caller's query, unchanged. The hints are filled in
/// after the identity phase and let annotation connectors use the resolved
/// accession or gene symbol instead of guessing from the raw identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorQuery {
    pub identifier: String,
    pub accession: Option<String>,
    pub gene_symbol: Option<String>,
}

impl ConnectorQuery {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            accession: None,
            gene_symbol: None,
        }
    }

    pub fn with_hints(mut self, accession: Option<String>, gene_symbol: Option<String>) -> Self {
        self.accession = accession;
        self.gene_symbol = gene_symbol;
        self
    }

    /// Gene symbol hint, falling back to the raw identifier
    pub fn gene_symbol_or_identifier(&self) -> &str {
        self.gene_symbol.as_deref().unwrap_or(&self.identifier)
    }
}

/// When a connector runs during aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolves what the identifier is (accession, names, gene symbol)
    Identity,
    /// Annotates an already resolved protein
    Annotation,
}

/// Fields contributed by one connector for one identifier
#[derive(Debug, Clone, PartialEq)]
pub struct PartialRecord {
    pub source: SourceKind,
    /// Identifier this partial was fetched for; must equal the query identifier
    pub identifier: String,
    pub accession: Option<String>,
    pub protein_name: Option<String>,
    pub gene_names: Vec<String>,
    pub organism: Option<String>,
    pub sequence: Option<String>,
    pub sequence_length: Option<u32>,
    pub function: Option<String>,
    pub subcellular_locations: Vec<String>,
    pub go_terms: Vec<GoTerm>,
    pub structures: Vec<StructureEntry>,
    pub interactions: Vec<InteractionPartner>,
    pub interaction_network_url: Option<String>,
    pub diseases: Vec<DiseaseAssociation>,
    pub drugs: Vec<DrugAssociation>,
    pub summary: Option<String>,
}

impl PartialRecord {
    pub fn new(source: SourceKind, identifier: impl Into<String>) -> Self {
        Self {
            source,
            identifier: identifier.into(),
            accession: None,
            protein_name: None,
            gene_names: Vec::new(),
            organism: None,
            sequence: None,
            sequence_length: None,
            function: None,
            subcellular_locations: Vec::new(),
            go_terms: Vec::new(),
            structures: Vec::new(),
            interactions: Vec::new(),
            interaction_network_url: None,
            diseases: Vec::new(),
            drugs: Vec::new(),
            summary: None,
        }
    }

    /// Primary gene symbol as this source sees it
    pub fn gene_symbol(&self) -> Option<&str> {
        self.gene_names.first().map(String::as_str)
    }
}

/// Why a connector call failed
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Network(_) => FailureKind::Network,
            SourceError::Timeout(_) => FailureKind::Timeout,
            SourceError::NotFound(_) => FailureKind::NotFound,
            SourceError::Malformed(_) => FailureKind::Malformed,
            SourceError::Upstream { .. } => FailureKind::Upstream,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// One external database
#[async_trait]
pub trait SourceConnector: Send + Sync {
    fn source(&self) -> SourceKind;

    fn phase(&self) -> Phase;

    /// Fetch everything this source knows about the query
    ///
    /// The returned partial must be tagged with `query.identifier`.
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError>;
}

pub type SharedConnector = Arc<dyn SourceConnector>;

/// Build the full production connector set from configuration
pub fn default_connectors(config: &SourcesConfig) -> Result<Vec<SharedConnector>, SourceError> {
    let http = http::SourceHttp::new(config)?;

    let connectors: Vec<SharedConnector> = vec![
        Arc::new(uniprot::UniprotConnector::new(http.clone(), &config.uniprot_base_url)?),
        Arc::new(ncbi::NcbiGeneConnector::new(
            http.clone(),
            &config.ncbi_base_url,
            config.ncbi_api_key.clone(),
        )),
        Arc::new(pdb::PdbConnector::new(
            http.clone(),
            &config.rcsb_search_url,
            &config.rcsb_data_url,
            config.pdb_max_structures,
        )),
        Arc::new(alphafold::AlphafoldConnector::new(http.clone(), &config.alphafold_base_url)?),
        Arc::new(string_db::StringConnector::new(
            http.clone(),
            &config.string_base_url,
            config.string_required_score,
            config.string_limit,
        )),
        Arc::new(disgenet::DisgenetConnector::new(
            http,
            &config.disgenet_base_url,
            config.disgenet_api_key.clone(),
        )),
        Arc::new(drugbank::DrugbankConnector::new()),
    ];

    tracing::info!(count = connectors.len(), "Source connectors initialised");

    Ok(connectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SourceError::Network("x".into()).kind(), FailureKind::Network);
        assert_eq!(SourceError::Timeout(Duration::from_secs(1)).kind(), FailureKind::Timeout);
        assert_eq!(SourceError::not_found("x").kind(), FailureKind::NotFound);
        assert_eq!(SourceError::Malformed("x".into()).kind(), FailureKind::Malformed);
        assert_eq!(
            SourceError::Upstream { status: 500, message: "x".into() }.kind(),
            FailureKind::Upstream
        );
    }

    #[test]
    fn test_query_hints() {
        let query = ConnectorQuery::new("p53");
        assert_eq!(query.gene_symbol_or_identifier(), "p53");

        let query = query.with_hints(Some("P04637".into()), Some("TP53".into()));
        assert_eq!(query.gene_symbol_or_identifier(), "TP53");
        assert_eq!(query.identifier, "p53");
    }

    #[test]
    fn test_default_connectors_cover_every_source_once() {
        let connectors = default_connectors(&SourcesConfig::default()).unwrap();
        let mut kinds: Vec<_> = connectors.iter().map(|c| c.source()).collect();
        kinds.sort();
        assert_eq!(kinds, SourceKind::ALL.to_vec());
    }
}
