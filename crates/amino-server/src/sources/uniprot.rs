//! UniProtKB REST connector
//!
//! Resolves an identifier to one reviewed human entry and extracts the basic
//! protein fields, GO annotations and disease comments from it.
//!
//! Resolution order:
//! 1. curated gene symbol to accession table
//! 2. direct entry fetch when the identifier looks like an accession
//! 3. free text, `gene:` and `protein_name:` searches restricted to human

use amino_common::types::{DiseaseAssociation, GoAspect, GoTerm, SourceKind};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use super::http::{join_url, SourceHttp};
use super::{curated, ConnectorQuery, PartialRecord, Phase, SourceConnector, SourceError};
use crate::config::HUMAN_TAXON_ID;

const ACCESSION_PATTERN: &str =
    r"^[OPQ][0-9][A-Z0-9]{3}[0-9]$|^[A-NR-Z][0-9]([A-Z][A-Z0-9]{2}[0-9]){1,2}$";

const SEARCH_PAGE_SIZE: &str = "5";

pub struct UniprotConnector {
    http: SourceHttp,
    base_url: String,
    accession_pattern: Regex,
}

/// Compile the UniProt accession pattern
pub(crate) fn accession_regex() -> Result<Regex, SourceError> {
    Regex::new(ACCESSION_PATTERN)
        .map_err(|e| SourceError::Malformed(format!("accession pattern: {}", e)))
}

impl UniprotConnector {
    pub fn new(http: SourceHttp, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            accession_pattern: accession_regex()?,
        })
    }

    pub fn is_accession(&self, candidate: &str) -> bool {
        self.accession_pattern.is_match(candidate)
    }

    async fn entry(&self, accession: &str) -> Result<Option<UniprotEntry>, SourceError> {
        let url = join_url(&self.base_url, &format!("uniprotkb/{}", accession));
        match self.http.fetch_json(self.http.client().get(url), "UniProt entry").await {
            Ok(entry) => Ok(entry),
            Err(SourceError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<UniprotEntry>, SourceError> {
        let url = join_url(&self.base_url, "uniprotkb/search");
        let request = self.http.client().get(url).query(&[
            ("query", query),
            ("format", "json"),
            ("size", SEARCH_PAGE_SIZE),
        ]);

        match self
            .http
            .fetch_json::<SearchResponse>(request, "UniProt search")
            .await
        {
            Ok(response) => Ok(response.and_then(|r| r.results.into_iter().next())),
            // UniProt rejects some free text with 400; the next query form may still work
            Err(SourceError::NotFound(_)) | Err(SourceError::Upstream { status: 400, .. }) => {
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    async fn resolve(&self, identifier: &str) -> Result<Option<UniprotEntry>, SourceError> {
        let cleaned = identifier.trim().to_uppercase();

        if let Some(accession) = curated::accession_for(&cleaned) {
            tracing::debug!(gene = %cleaned, accession, "Using curated accession");
            if let Some(entry) = self.entry(accession).await? {
                return Ok(Some(entry));
            }
        }

        if self.is_accession(&cleaned) {
            if let Some(entry) = self.entry(&cleaned).await? {
                return Ok(Some(entry));
            }
        }

        let forms = [
            format!("{} AND organism_id:{}", cleaned, HUMAN_TAXON_ID),
            format!("gene:{} AND organism_id:{}", cleaned, HUMAN_TAXON_ID),
            format!("protein_name:{} AND organism_id:{}", cleaned, HUMAN_TAXON_ID),
        ];

        for form in &forms {
            if let Some(entry) = self.search(form).await? {
                return Ok(Some(entry));
            }
            tracing::debug!(query = %form, "UniProt search had no hits");
        }

        Ok(None)
    }
}

#[async_trait]
impl SourceConnector for UniprotConnector {
    fn source(&self) -> SourceKind {
        SourceKind::Uniprot
    }

    fn phase(&self) -> Phase {
        Phase::Identity
    }

    #[tracing::instrument(skip_all, fields(source = "uniprot", identifier = %query.identifier))]
    async fn fetch(&self, query: &ConnectorQuery) -> Result<PartialRecord, SourceError> {
        let entry = self
            .resolve(&query.identifier)
            .await?
            .ok_or_else(|| SourceError::not_found(format!("no UniProt entry for {}", query.identifier)))?;

        tracing::debug!(accession = %entry.primary_accession, "Resolved UniProt entry");

        Ok(entry.into_partial(&query.identifier))
    }
}

// ============================================================================
// Response model
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<UniprotEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniprotEntry {
    primary_accession: String,
    #[serde(default)]
    protein_description: Option<ProteinDescription>,
    #[serde(default)]
    genes: Vec<Gene>,
    #[serde(default)]
    organism: Option<Organism>,
    #[serde(default)]
    sequence: Option<Sequence>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default, rename = "uniProtKBCrossReferences")]
    cross_references: Vec<CrossReference>,
}

#[derive(Debug, Deserialize)]
struct Valued {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProteinDescription {
    #[serde(default)]
    recommended_name: Option<RecommendedName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedName {
    #[serde(default)]
    full_name: Option<Valued>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gene {
    #[serde(default)]
    gene_name: Option<Valued>,
    #[serde(default)]
    synonyms: Vec<Valued>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organism {
    #[serde(default)]
    scientific_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sequence {
    value: String,
    #[serde(default)]
    length: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Comment {
    comment_type: String,
    #[serde(default)]
    texts: Vec<Valued>,
    #[serde(default)]
    subcellular_locations: Vec<SubcellularLocation>,
    #[serde(default)]
    disease: Option<Disease>,
}

#[derive(Debug, Deserialize)]
struct SubcellularLocation {
    #[serde(default)]
    location: Option<Valued>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Disease {
    #[serde(default)]
    disease_id: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrossReference {
    database: String,
    id: String,
    #[serde(default)]
    properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
struct Property {
    key: String,
    value: String,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl UniprotEntry {
    fn into_partial(self, identifier: &str) -> PartialRecord {
        let mut partial = PartialRecord::new(SourceKind::Uniprot, identifier);

        partial.accession = Some(self.primary_accession);
        partial.protein_name = self
            .protein_description
            .and_then(|d| d.recommended_name)
            .and_then(|n| n.full_name)
            .and_then(|v| non_empty(v.value));

        for gene in self.genes {
            let names = gene.gene_name.into_iter().chain(gene.synonyms);
            for name in names.filter_map(|v| non_empty(v.value)) {
                if !partial.gene_names.contains(&name) {
                    partial.gene_names.push(name);
                }
            }
        }

        partial.organism = self.organism.and_then(|o| o.scientific_name).and_then(non_empty);

        if let Some(sequence) = self.sequence {
            partial.sequence_length = sequence
                .length
                .or_else(|| u32::try_from(sequence.value.len()).ok());
            partial.sequence = non_empty(sequence.value);
        }

        for comment in self.comments {
            match comment.comment_type.as_str() {
                "FUNCTION" if partial.function.is_none() => {
                    partial.function = comment.texts.into_iter().next().and_then(|t| non_empty(t.value));
                },
                "SUBCELLULAR LOCATION" => {
                    partial.subcellular_locations.extend(
                        comment
                            .subcellular_locations
                            .into_iter()
                            .filter_map(|l| l.location)
                            .filter_map(|v| non_empty(v.value)),
                    );
                },
                "DISEASE" => {
                    let text = comment.texts.into_iter().next().and_then(|t| non_empty(t.value));
                    if let Some(disease) = comment.disease {
                        if let Some(name) = disease.disease_id.and_then(non_empty) {
                            partial.diseases.push(DiseaseAssociation {
                                name,
                                description: disease.description.and_then(non_empty).or(text),
                                score: None,
                                source: SourceKind::Uniprot,
                            });
                        }
                    }
                },
                _ => {},
            }
        }

        partial.go_terms = self
            .cross_references
            .into_iter()
            .filter(|r| r.database == "GO")
            .map(go_term)
            .collect();

        partial
    }
}

/// Build a GO term from a cross-reference such as
/// `{"id":"GO:0006915","properties":[{"key":"GoTerm","value":"P:apoptotic process"}]}`
fn go_term(reference: CrossReference) -> GoTerm {
    let mut term = GoTerm {
        id: reference.id,
        term: String::new(),
        aspect: None,
        evidence: None,
    };

    for property in reference.properties {
        match property.key.as_str() {
            "GoTerm" => match property.value.split_once(':') {
                Some((prefix, name)) if prefix.len() == 1 => {
                    term.aspect = prefix.chars().next().and_then(GoAspect::from_prefix);
                    term.term = name.to_string();
                },
                _ => term.term = property.value,
            },
            "GoEvidenceType" => term.evidence = Some(property.value),
            _ => {},
        }
    }

    term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;

    fn connector() -> UniprotConnector {
        let http = SourceHttp::new(&SourcesConfig::default()).unwrap();
        UniprotConnector::new(http, "http://localhost").unwrap()
    }

    #[test]
    fn test_accession_pattern() {
        let connector = connector();
        assert!(connector.is_accession("P04637"));
        assert!(connector.is_accession("Q9Y6K9"));
        assert!(connector.is_accession("A0A024R161"));
        assert!(!connector.is_accession("TP53"));
        assert!(!connector.is_accession("P0463"));
    }

    #[test]
    fn test_go_term_with_aspect_prefix() {
        let reference: CrossReference = serde_json::from_str(
            r#"{"database":"GO","id":"GO:0006915","properties":[
                {"key":"GoTerm","value":"P:apoptotic process"},
                {"key":"GoEvidenceType","value":"IDA:UniProtKB"}]}"#,
        )
        .unwrap();

        let term = go_term(reference);
        assert_eq!(term.id, "GO:0006915");
        assert_eq!(term.term, "apoptotic process");
        assert_eq!(term.aspect, Some(GoAspect::BiologicalProcess));
        assert_eq!(term.evidence.as_deref(), Some("IDA:UniProtKB"));
    }

    #[test]
    fn test_go_term_without_prefix_keeps_value() {
        let reference: CrossReference = serde_json::from_str(
            r#"{"database":"GO","id":"GO:1","properties":[{"key":"GoTerm","value":"odd term"}]}"#,
        )
        .unwrap();
        let term = go_term(reference);
        assert_eq!(term.term, "odd term");
        assert_eq!(term.aspect, None);
    }

    #[test]
    fn test_entry_into_partial() {
        let entry: UniprotEntry = serde_json::from_str(
            r#"{
                "primaryAccession": "P04637",
                "proteinDescription": {"recommendedName": {"fullName": {"value": "Cellular tumor antigen p53"}}},
                "genes": [{"geneName": {"value": "TP53"}, "synonyms": [{"value": "P53"}, {"value": "TP53"}]}],
                "organism": {"scientificName": "Homo sapiens"},
                "sequence": {"value": "MEEPQSDPSV", "length": 393},
                "comments": [
                    {"commentType": "FUNCTION", "texts": [{"value": "Acts as a tumor suppressor."}]},
                    {"commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                        {"location": {"value": "Cytoplasm"}}, {"location": {"value": "Nucleus"}}]},
                    {"commentType": "DISEASE", "disease": {"diseaseId": "Li-Fraumeni syndrome",
                        "description": "Autosomal dominant cancer predisposition."}}
                ],
                "uniProtKBCrossReferences": [
                    {"database": "PDB", "id": "1TUP"},
                    {"database": "GO", "id": "GO:0005634", "properties": [{"key": "GoTerm", "value": "C:nucleus"}]}
                ]
            }"#,
        )
        .unwrap();

        let partial = entry.into_partial("tp53");
        assert_eq!(partial.identifier, "tp53");
        assert_eq!(partial.accession.as_deref(), Some("P04637"));
        assert_eq!(partial.protein_name.as_deref(), Some("Cellular tumor antigen p53"));
        assert_eq!(partial.gene_names, vec!["TP53", "P53"]);
        assert_eq!(partial.organism.as_deref(), Some("Homo sapiens"));
        assert_eq!(partial.sequence_length, Some(393));
        assert_eq!(partial.function.as_deref(), Some("Acts as a tumor suppressor."));
        assert_eq!(partial.subcellular_locations, vec!["Cytoplasm", "Nucleus"]);
        assert_eq!(partial.diseases.len(), 1);
        assert_eq!(partial.diseases[0].name, "Li-Fraumeni syndrome");
        assert_eq!(partial.go_terms.len(), 1);
        assert_eq!(partial.go_terms[0].aspect, Some(GoAspect::CellularComponent));
    }

    #[test]
    fn test_minimal_entry() {
        let entry: UniprotEntry = serde_json::from_str(r#"{"primaryAccession":"Q00001"}"#).unwrap();
        let partial = entry.into_partial("Q00001");
        assert_eq!(partial.accession.as_deref(), Some("Q00001"));
        assert!(partial.protein_name.is_none());
        assert!(partial.gene_names.is_empty());
    }
}
