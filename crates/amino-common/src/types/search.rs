//! Persisted search records and the search API payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use uuid::Uuid;

use super::protein::ProteinRecord;
use super::source::SourceFailure;

/// Body of `POST /api/v1/searches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchRequest {
    pub query: String,
}

/// Response of `POST /api/v1/searches`
///
/// `search_id` is absent and `warnings` explains why when the search could not
/// be persisted; the record is returned either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub record: ProteinRecord,
    #[serde(default)]
    pub failures: Vec<SourceFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_id: Option<Uuid>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One row of the search history, without the stored composite record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub id: Uuid,
    pub protein_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub gene_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A stored search including the composite record exactly as it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: Uuid,
    pub protein_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub gene_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Composite record JSON, byte for byte as persisted
    pub full_data: Box<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl SearchRecord {
    /// Decode the stored composite record
    pub fn protein_record(&self) -> crate::Result<ProteinRecord> {
        Ok(serde_json::from_str(self.full_data.get())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_data_is_kept_verbatim() {
        let stored = r#"{"identifier":"TP53",  "gene_names":["TP53","P53"]}"#;
        let body = format!(
            r#"{{"id":"{}","protein_id":"TP53","timestamp":"2026-01-01T00:00:00Z","full_data":{}}}"#,
            Uuid::nil(),
            stored
        );

        let record: SearchRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(record.full_data.get(), stored);

        let decoded = record.protein_record().unwrap();
        assert_eq!(decoded.gene_names, vec!["TP53", "P53"]);
    }

    #[test]
    fn test_outcome_omits_missing_search_id() {
        let outcome = SearchOutcome {
            record: ProteinRecord::empty("BRCA1"),
            failures: Vec::new(),
            search_id: None,
            warnings: vec!["Search could not be saved".to_string()],
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert!(value.get("search_id").is_none());
        assert_eq!(value["warnings"][0], "Search could not be saved");
    }
}
