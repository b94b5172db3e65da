//! RCSB PDB connector
//!
//! Finds human entries through the RCSB search API, by UniProt accession
//! first and gene name second, then details each entry through the data API.

use amino_common::types::{SourceKind, StructureEntry};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};

use super::http::{join_url, SourceHttp};
use super::{ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};

const ACCESSION_ATTRIBUTE: &str =
    "rcsb_polymer_entity_container_identifiers.reference_sequence_identifiers.database_accession";
const GENE_NAME_ATTRIBUTE: &str = "rcsb_gene_name.value";
const ORGANISM_ATTRIBUTE: &str = "rcsb_entity_source_organism.taxonomy_lineage.name";

pub struct PdbConnector {
    http: SourceHttp,
    search_url: String,
    data_url: String,
    max_structures: usize,
}

impl PdbConnector {
    pub fn new(http: SourceHttp, search_url: &str, data_url: &str, max_structures: usize) -> Self {
        Self {
            http,
            search_url: search_url.to_string(),
            data_url: data_url.to_string(),
            max_structures,
        }
    }

    fn search_body(&self, attribute: &str, value: &str) -> Value {
        json!({
            "query": {
                "type": "group",
                "logical_operator": "and",
                "nodes": [
                    {
                        "type": "terminal",
                        "service": "text",
                        "parameters": {
                            "attribute": attribute,
                            "operator": "exact_match",
                            "value": value,
                        }
                    },
                    {
                        "type": "terminal",
                        "service": "text",
                        "parameters": {
                            "attribute": ORGANISM_ATTRIBUTE,
                            "operator": "exact_match",
                            "value": "Homo sapiens",
                        }
                    }
                ]
            },
            "return_type": "entry",
            "request_options": {
                "paginate": { "start": 0, "rows": self.max_structures }
            }
        })
    }

    async fn search(&self, attribute: &str, value: &str) -> Result<Vec<String>, SourceError> {
        let url = join_url(&self.search_url, "rcsbsearch/v2/query");
        let request = self.http.client().post(url).json(&self.search_body(attribute, value));

        let response: Option<SearchResponse> = match self.http.fetch_json(request, "PDB search").await {
            Err(SourceError::NotFound(_)) => None,
            other => other?,
        };

        Ok(response
            .map(|r| r.result_set.into_iter().map(|hit| hit.identifier).collect())
            .unwrap_or_default())
    }

    async fn entry_ids(&self, query: &ConnectorQuery) -> Result<Vec<String>, SourceError> {
        if let Some(accession) = &query.accession {
            let ids = self.search(ACCESSION_ATTRIBUTE, accession).await?;
            if !ids.is_empty() {
                return Ok(ids);
            }
            tracing::debug!(accession = %accession, "No PDB entries by accession, trying gene name");
        }

        self.search(GENE_NAME_ATTRIBUTE, query.gene_symbol_or_identifier()).await
    }

    async fn detail(&self, id: &str) -> Result<StructureEntry, SourceError> {
        let url = join_url(&self.data_url, &format!("rest/v1/core/entry/{}", id));
        let entry: EntryDetail = self
            .http
            .fetch_json(self.http.client().get(url), "PDB entry")
            .await?
            .ok_or_else(|| SourceError::Malformed(format!("empty PDB entry {}", id)))?;

        Ok(entry.into_structure(id))
    }
}

#[async_trait]
impl SourceConnector for PdbConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Pdb
    }

    fn phase(&self) -> Phase {
        Phase::Annotation
    }

    #[tracing::instrument(skip_all, fields(source = "pdb", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let mut ids = self.entry_ids(query).await?;
        ids.truncate(self.max_structures);

        if ids.is_empty() {
            return Err(SourceError::not_found(format!("no PDB entries for {}", query.identifier)));
        }

        let details = join_all(ids.iter().map(|id| self.detail(id))).await;

        let mut partial = PartialRecord::new(SourceKind::Pdb, &query.identifier);
        for (id, detail) in ids.iter().zip(details) {
            match detail {
                Ok(structure) => partial.structures.push(structure),
                Err(e) => tracing::warn!(entry = %id, error = %e, "Dropping PDB entry"),
            }
        }

        if partial.structures.is_empty() {
            return Err(SourceError::Malformed(format!(
                "none of {} PDB entries could be detailed",
                ids.len()
            )));
        }

        Ok(partial)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result_set: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    identifier: String,
}

#[derive(Debug, Default, Deserialize)]
struct EntryDetail {
    #[serde(default)]
    exptl: Vec<Experiment>,
    #[serde(default)]
    rcsb_entry_info: Option<EntryInfo>,
    #[serde(default, rename = "struct")]
    structure: Option<StructInfo>,
}

#[derive(Debug, Deserialize)]
struct Experiment {
    #[serde(default)]
    method: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryInfo {
    #[serde(default)]
    resolution_combined: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct StructInfo {
    #[serde(default)]
    title: Option<String>,
}

impl EntryDetail {
    fn into_structure(self, id: &str) -> StructureEntry {
        StructureEntry {
            id: id.to_string(),
            source: SourceKind::Pdb,
            method: self.exptl.into_iter().next().and_then(|e| e.method),
            resolution: self
                .rcsb_entry_info
                .and_then(|info| info.resolution_combined)
                .and_then(|values| values.into_iter().next()),
            title: self.structure.and_then(|s| s.title),
            confidence: None,
            viewer_url: format!("https://www.rcsb.org/structure/{}", id),
            download_url: Some(format!("https://files.rcsb.org/download/{}.pdb", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;

    #[test]
    fn test_entry_detail_into_structure() {
        let detail: EntryDetail = serde_json::from_str(
            r#"{
                "exptl": [{"method": "X-RAY DIFFRACTION"}],
                "rcsb_entry_info": {"resolution_combined": [2.2]},
                "struct": {"title": "TUMOR SUPPRESSOR P53 COMPLEXED WITH DNA"}
            }"#,
        )
        .unwrap();

        let structure = detail.into_structure("1TUP");
        assert_eq!(structure.method.as_deref(), Some("X-RAY DIFFRACTION"));
        assert_eq!(structure.resolution, Some(2.2));
        assert_eq!(structure.viewer_url, "https://www.rcsb.org/structure/1TUP");
        assert_eq!(structure.source, SourceKind::Pdb);
    }

    #[test]
    fn test_nmr_entry_has_no_resolution() {
        let detail: EntryDetail = serde_json::from_str(
            r#"{"exptl": [{"method": "SOLUTION NMR"}], "rcsb_entry_info": {"resolution_combined": null}}"#,
        )
        .unwrap();
        let structure = detail.into_structure("2K8F");
        assert_eq!(structure.resolution, None);
        assert_eq!(structure.title, None);
    }

    #[test]
    fn test_search_body_limits_rows() {
        let http = SourceHttp::new(&SourcesConfig::default()).unwrap();
        let connector = PdbConnector::new(http, "http://s", "http://d", 3);
        let body = connector.search_body(GENE_NAME_ATTRIBUTE, "TP53");
        assert_eq!(body["request_options"]["paginate"]["rows"], 3);
        assert_eq!(body["query"]["nodes"][0]["parameters"]["value"], "TP53");
        assert_eq!(body["return_type"], "entry");
    }
}
