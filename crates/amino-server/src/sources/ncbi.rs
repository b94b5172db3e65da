//! NCBI Gene connector (E-utilities `esearch` + `esummary`)

use amino_common::types::SourceKind;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::http::{join_url, SourceHttp};
use super::{curated, ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};

pub struct NcbiGeneConnector {
    http: SourceHttp,
    base_url: String,
    api_key: Option<String>,
}

impl NcbiGeneConnector {
    pub fn new(http: SourceHttp, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key,
        }
    }

    fn params<'a>(&'a self, mut params: Vec<(&'a str, &'a str)>) -> Vec<(&'a str, &'a str)> {
        params.push(("db", "gene"));
        params.push(("retmode", "json"));
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }
        params
    }

    async fn gene_id(&self, symbol: &str) -> Result<Option<String>, SourceError> {
        if let Some(id) = curated::gene_id_for(symbol) {
            tracing::debug!(gene = %symbol, gene_id = id, "Using curated NCBI gene id");
            return Ok(Some(id.to_string()));
        }

        let term = format!("{}[Gene Name] AND Homo sapiens[Organism]", symbol.trim());
        let url = join_url(&self.base_url, "esearch.fcgi");
        let request = self
            .http
            .client()
            .get(url)
            .query(&self.params(vec![("term", term.as_str())]));

        let response: Option<SearchResponse> = self.http.fetch_json(request, "NCBI esearch").await?;

        Ok(response.and_then(|r| r.esearchresult.idlist.into_iter().next()))
    }

    async fn summary(&self, gene_id: &str) -> Result<GeneSummary, SourceError> {
        let url = join_url(&self.base_url, "esummary.fcgi");
        let request = self
            .http
            .client()
            .get(url)
            .query(&self.params(vec![("id", gene_id)]));

        let response: SummaryResponse = self
            .http
            .fetch_json(request, "NCBI esummary")
            .await?
            .ok_or_else(|| SourceError::Malformed("empty NCBI esummary response".to_string()))?;

        let entry = response
            .result
            .get(gene_id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("NCBI gene {}", gene_id)))?;

        serde_json::from_value(entry)
            .map_err(|e| SourceError::Malformed(format!("NCBI gene summary: {}", e)))
    }
}

#[async_trait]
impl SourceConnector for NcbiGeneConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Ncbi
    }

    fn phase(&self) -> Phase {
        Phase::Identity
    }

    #[tracing::instrument(skip_all, fields(source = "ncbi", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let gene_id = self
            .gene_id(query.gene_symbol_or_identifier())
            .await?
            .ok_or_else(|| SourceError::not_found(format!("no NCBI gene for {}", query.identifier)))?;

        let summary = self.summary(&gene_id).await?;
        tracing::debug!(gene_id = %gene_id, symbol = %summary.name, "Resolved NCBI gene");

        Ok(summary.into_partial(&query.identifier))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    result: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct GeneSummary {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    otheraliases: String,
    #[serde(default)]
    organism: Option<GeneOrganism>,
}

#[derive(Debug, Deserialize)]
struct GeneOrganism {
    #[serde(default)]
    scientificname: String,
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl GeneSummary {
    fn into_partial(self, identifier: &str) -> PartialRecord {
        let mut partial = PartialRecord::new(SourceKind::Ncbi, identifier);

        if let Some(symbol) = text(&self.name) {
            partial.gene_names.push(symbol);
        }
        for alias in self.otheraliases.split(',').filter_map(text) {
            if !partial.gene_names.contains(&alias) {
                partial.gene_names.push(alias);
            }
        }

        // Descriptions sometimes carry a bracketed organism suffix
        let description = self.description.split('[').next().unwrap_or_default();
        partial.protein_name = text(description);
        partial.organism = self.organism.and_then(|o| text(&o.scientificname));
        partial.function = text(&self.summary);

        partial
    }
}
