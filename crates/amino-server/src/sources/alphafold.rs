//! AlphaFold DB connector

use amino_common::types::{SourceKind, StructureEntry};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use super::http::{join_url, SourceHttp};
use super::uniprot::accession_regex;
use super::{ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};

const METHOD: &str = "AI prediction";

pub struct AlphafoldConnector {
    http: SourceHttp,
    base_url: String,
    accession_pattern: Regex,
}

impl AlphafoldConnector {
    pub fn new(http: SourceHttp, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            accession_pattern: accession_regex()?,
        })
    }

    /// Accession hint, or the identifier itself when it is shaped like one
    fn accession(&self, query: &ConnectorQuery) -> Option<String> {
        query.accession.clone().or_else(|| {
            let candidate = query.identifier.trim().to_uppercase();
            self.accession_pattern.is_match(&candidate).then_some(candidate)
        })
    }
}

#[async_trait]
impl SourceConnector for AlphafoldConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Alphafold
    }

    fn phase(&self) -> Phase {
        Phase::Annotation
    }

    #[tracing::instrument(skip_all, fields(source = "alphafold", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let accession = self.accession(query).ok_or_else(|| {
            SourceError::not_found(format!("no UniProt accession known for {}", query.identifier))
        })?;

        let url = join_url(&self.base_url, &format!("prediction/{}", accession));
        let models: Vec<Prediction> = self
            .http
            .fetch_json(self.http.client().get(url), "AlphaFold prediction")
            .await?
            .unwrap_or_default();

        if models.is_empty() {
            return Err(SourceError::not_found(format!("no AlphaFold model for {}", accession)));
        }

        let mut partial = PartialRecord::new(SourceKind::Alphafold, &query.identifier);
        partial.structures = models.into_iter().map(|m| m.into_structure(&accession)).collect();

        Ok(partial)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    entry_id: String,
    #[serde(default)]
    latest_version: Option<u32>,
    #[serde(default)]
    global_metric_value: Option<f64>,
    #[serde(default)]
    pdb_url: Option<String>,
    #[serde(default)]
    cif_url: Option<String>,
    #[serde(default)]
    uniprot_description: Option<String>,
}

impl Prediction {
    fn into_structure(self, accession: &str) -> StructureEntry {
        let method = match self.latest_version {
            Some(version) => format!("{} (model v{})", METHOD, version),
            None => METHOD.to_string(),
        };

        StructureEntry {
            id: self.entry_id,
            source: SourceKind::Alphafold,
            method: Some(method),
            resolution: None,
            title: self.uniprot_description,
            confidence: self.global_metric_value,
            viewer_url: format!("https://alphafold.ebi.ac.uk/entry/{}", accession),
            download_url: self.pdb_url.or(self.cif_url),
        }
    }
}
