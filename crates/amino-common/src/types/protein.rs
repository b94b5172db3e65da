//! The composite protein record and its parts

use serde::{Deserialize, Serialize};

use super::source::{SourceFailure, SourceKind};

/// Everything known about one protein/gene identifier after aggregation
///
/// `identifier` is always the identifier the caller asked about, whatever the
/// sources resolved it to; the resolved UniProt accession lives in
/// `accession`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub gene_names: Vec<String>,
    /// Primary gene symbol, first of `gene_names` as resolved by the sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default)]
    pub subcellular_locations: Vec<String>,
    #[serde(default)]
    pub go_terms: Vec<GoTerm>,
    #[serde(default)]
    pub structures: Vec<StructureEntry>,
    #[serde(default)]
    pub interactions: Vec<InteractionPartner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_network_url: Option<String>,
    #[serde(default)]
    pub diseases: Vec<DiseaseAssociation>,
    #[serde(default)]
    pub drugs: Vec<DrugAssociation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Sources that contributed at least one field, in priority order
    #[serde(default)]
    pub sources: Vec<SourceKind>,
}

impl ProteinRecord {
    /// A record with only the identifier set
    pub fn empty(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            accession: None,
            protein_name: None,
            gene_names: Vec::new(),
            gene_symbol: None,
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
            sources: Vec::new(),
        }
    }

    /// True when no source contributed anything
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
            && self.accession.is_none()
            && self.protein_name.is_none()
            && self.gene_names.is_empty()
            && self.organism.is_none()
            && self.sequence.is_none()
            && self.function.is_none()
            && self.structures.is_empty()
            && self.interactions.is_empty()
            && self.diseases.is_empty()
            && self.drugs.is_empty()
            && self.summary.is_none()
    }

    /// Name to show for this record: protein name, then gene symbol, then the query
    pub fn display_name(&self) -> &str {
        self.protein_name
            .as_deref()
            .or(self.gene_symbol.as_deref())
            .unwrap_or(&self.identifier)
    }
}

/// Gene Ontology branch a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoAspect {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl GoAspect {
    /// Parse the single-letter prefix used by UniProt ("P:", "F:", "C:")
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'P' => Some(GoAspect::BiologicalProcess),
            'F' => Some(GoAspect::MolecularFunction),
            'C' => Some(GoAspect::CellularComponent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoTerm {
    /// GO identifier, e.g. `GO:0006915`
    pub id: String,
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<GoAspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// An experimental or predicted 3D structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureEntry {
    /// PDB entry id or AlphaFold model id
    pub id: String,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Resolution in Ångström (experimental structures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Mean pLDDT (predicted structures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub viewer_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// A protein that interacts with the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPartner {
    /// Source specific identifier, e.g. `9606.ENSP00000269305`
    pub identifier: String,
    /// Preferred (gene) name of the partner
    pub name: String,
    /// Combined confidence, 0..=1
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<InteractionEvidence>,
}

/// Per-channel evidence scores behind a combined interaction score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvidence {
    pub neighborhood: f64,
    pub fusion: f64,
    pub cooccurrence: f64,
    pub coexpression: f64,
    pub experimental: f64,
    pub database: f64,
    pub textmining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseAssociation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Association strength, 0..=1, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub source: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugAssociation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    /// Approval status groups, e.g. "approved", "investigational"
    #[serde(default)]
    pub groups: Vec<String>,
    pub source: SourceKind,
}

/// Result of aggregating one identifier: the record plus the sources that failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinLookup {
    pub record: ProteinRecord,
    #[serde(default)]
    pub failures: Vec<SourceFailure>,
}

impl ProteinLookup {
    pub fn failed_sources(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.failures.iter().map(|f| f.source)
    }
}
