//! DisGeNET gene-disease association connector
//!
//! Well-known genes are answered from the curated table. Everything else goes
//! to the DisGeNET API; when that call fails, the curated entry of a similar
//! gene is served instead.

use amino_common::types::{DiseaseAssociation, SourceKind};
use async_trait::async_trait;
use serde::Deserialize;

use super::http::{join_url, SourceHttp};
use super::{curated, ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};

pub struct DisgenetConnector {
    http: SourceHttp,
    base_url: String,
    api_key: Option<String>,
}

impl DisgenetConnector {
    pub fn new(http: SourceHttp, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key,
        }
    }

    async fn associations(&self, symbol: &str) -> Result<Vec<DiseaseAssociation>, SourceError> {
        let url = join_url(&self.base_url, &format!("gda/gene/{}", symbol));
        let mut request = self.http.client().get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let body: Option<GdaBody> = self.http.fetch_json(request, "DisGeNET associations").await?;

        Ok(body
            .map(GdaBody::into_items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(GdaItem::into_association)
            .collect())
    }
}

fn curated_partial(
    identifier: &str,
    diseases: &[curated::CuratedDisease],
) -> PartialRecord {
    let mut partial = PartialRecord::new(SourceKind::Disgenet, identifier);
    partial.diseases = diseases
        .iter()
        .map(|d| d.to_association(SourceKind::Disgenet))
        .collect();
    partial
}

#[async_trait]
impl SourceConnector for DisgenetConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Disgenet
    }

    fn phase(&self) -> Phase {
        Phase::Annotation
    }

    #[tracing::instrument(skip_all, fields(source = "disgenet", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let symbol = query.gene_symbol_or_identifier().trim().to_uppercase();

        if let Some(diseases) = curated::diseases_for(&symbol) {
            tracing::debug!(gene = %symbol, "Serving curated disease associations");
            return Ok(curated_partial(&query.identifier, diseases));
        }

        match self.associations(&symbol).await {
            Ok(diseases) if diseases.is_empty() => Err(SourceError::not_found(format!(
                "no DisGeNET associations for {}",
                symbol
            ))),
            Ok(diseases) => {
                let mut partial = PartialRecord::new(SourceKind::Disgenet, &query.identifier);
                partial.diseases = diseases;
                Ok(partial)
            },
            Err(e) => match curated::similar_diseases(&symbol) {
                Some((similar, diseases)) => {
                    tracing::info!(
                        gene = %symbol,
                        similar_gene = similar,
                        error = %e,
                        "DisGeNET unavailable, serving curated associations of a similar gene"
                    );
                    Ok(curated_partial(&query.identifier, diseases))
                },
                None => Err(e),
            },
        }
    }
}

/// DisGeNET answers with a bare list or wraps it in `results` or `payload`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GdaBody {
    List(Vec<GdaItem>),
    Wrapped {
        #[serde(default)]
        results: Option<Vec<GdaItem>>,
        #[serde(default)]
        payload: Option<Vec<GdaItem>>,
    },
}

impl GdaBody {
    fn into_items(self) -> Vec<GdaItem> {
        match self {
            GdaBody::List(items) => items,
            GdaBody::Wrapped { results, payload } => results.or(payload).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GdaItem {
    #[serde(default, alias = "diseaseName")]
    disease_name: Option<String>,
    #[serde(default, alias = "diseaseType")]
    disease_type: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

impl GdaItem {
    fn into_association(self) -> Option<DiseaseAssociation> {
        let name = self.disease_name.filter(|n| !n.trim().is_empty())?;
        Some(DiseaseAssociation {
            name,
            description: self.disease_type,
            score: self.score,
            source: SourceKind::Disgenet,
        })
    }
}
