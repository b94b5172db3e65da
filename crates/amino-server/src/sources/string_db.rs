//! STRING protein interaction connector

use amino_common::types::{InteractionEvidence, InteractionPartner, SourceKind};
use async_trait::async_trait;
use serde::Deserialize;

use super::http::{join_url, SourceHttp};
use super::{ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};
use crate::config::HUMAN_TAXON_ID;

pub struct StringConnector {
    http: SourceHttp,
    base_url: String,
    required_score: u32,
    limit: u32,
}

impl StringConnector {
    pub fn new(http: SourceHttp, base_url: &str, required_score: u32, limit: u32) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            required_score,
            limit,
        }
    }

    /// Map a gene symbol or accession to its STRING id
    async fn string_id(&self, identifier: &str) -> Result<Option<StringId>, SourceError> {
        let url = join_url(&self.base_url, "json/get_string_ids");
        let species = HUMAN_TAXON_ID.to_string();
        let request = self.http.client().post(url).form(&[
            ("identifiers", identifier),
            ("species", species.as_str()),
            ("limit", "1"),
            ("echo_query", "1"),
        ]);

        let ids: Option<Vec<StringId>> = self.http.fetch_json(request, "STRING id mapping").await?;
        Ok(ids.and_then(|ids| ids.into_iter().next()))
    }

    async fn interactions(&self, string_id: &str) -> Result<Vec<Interaction>, SourceError> {
        let url = join_url(&self.base_url, "json/interactions");
        let species = HUMAN_TAXON_ID.to_string();
        let required_score = self.required_score.to_string();
        let limit = self.limit.to_string();
        let request = self.http.client().post(url).form(&[
            ("identifiers", string_id),
            ("species", species.as_str()),
            ("required_score", required_score.as_str()),
            ("limit", limit.as_str()),
        ]);

        Ok(self
            .http
            .fetch_json(request, "STRING interactions")
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl SourceConnector for StringConnector {
    fn source(&self) -> SourceKind {
        SourceKind::StringDb
    }

    fn phase(&self) -> Phase {
        Phase::Annotation
    }

    #[tracing::instrument(skip_all, fields(source = "string", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let lookup = query.gene_symbol_or_identifier();
        let mapped = self
            .string_id(lookup)
            .await?
            .ok_or_else(|| SourceError::not_found(format!("{} is unknown to STRING", lookup)))?;

        let interactions = self.interactions(&mapped.string_id).await?;
        tracing::debug!(
            string_id = %mapped.string_id,
            count = interactions.len(),
            "Fetched STRING interactions"
        );

        let mut partial = PartialRecord::new(SourceKind::StringDb, &query.identifier);
        partial.interactions = interactions
            .into_iter()
            .filter_map(|i| i.partner_of(&mapped.string_id))
            .collect();
        partial.interaction_network_url = Some(network_url(&mapped.string_id));

        Ok(partial)
    }
}

pub fn network_url(string_id: &str) -> String {
    format!(
        "https://string-db.org/cgi/network?identifiers={}&species={}",
        string_id, HUMAN_TAXON_ID
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StringId {
    string_id: String,
}

#[derive(Debug, Deserialize)]
struct Interaction {
    #[serde(rename = "stringId_A")]
    string_id_a: String,
    #[serde(rename = "stringId_B")]
    string_id_b: String,
    #[serde(rename = "preferredName_A", default)]
    preferred_name_a: String,
    #[serde(rename = "preferredName_B", default)]
    preferred_name_b: String,
    score: f64,
    #[serde(default)]
    nscore: f64,
    #[serde(default)]
    fscore: f64,
    #[serde(default)]
    pscore: f64,
    #[serde(default)]
    ascore: f64,
    #[serde(default)]
    escore: f64,
    #[serde(default)]
    dscore: f64,
    #[serde(default)]
    tscore: f64,
}

impl Interaction {
    /// The other protein of the pair; `None` for self-interactions
    fn partner_of(self, string_id: &str) -> Option<InteractionPartner> {
        let (identifier, name) = if self.string_id_a == string_id {
            (self.string_id_b, self.preferred_name_b)
        } else if self.string_id_b == string_id {
            (self.string_id_a, self.preferred_name_a)
        } else {
            // The query protein may be reported under a merged id; keep side B
            (self.string_id_b, self.preferred_name_b)
        };

        if identifier == string_id {
            return None;
        }

        Some(InteractionPartner {
            name: if name.is_empty() { identifier.clone() } else { name },
            identifier,
            score: self.score,
            evidence: Some(InteractionEvidence {
                neighborhood: self.nscore,
                fusion: self.fscore,
                cooccurrence: self.pscore,
                coexpression: self.ascore,
                experimental: self.escore,
                database: self.dscore,
                textmining: self.tscore,
            }),
        })
    }
}
