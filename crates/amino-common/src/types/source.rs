//! External data sources and per-source failure reporting

use serde::{Deserialize, Serialize};

use crate::error::AminoError;

/// One external database the aggregator talks to
///
/// The declaration order is the merge priority: earlier sources win when two
/// sources provide the same scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Uniprot,
    Ncbi,
    Pdb,
    Alphafold,
    #[serde(rename = "string")]
    StringDb,
    Disgenet,
    Drugbank,
}

impl SourceKind {
    pub const ALL: [SourceKind; 7] = [
        SourceKind::Uniprot,
        SourceKind::Ncbi,
        SourceKind::Pdb,
        SourceKind::Alphafold,
        SourceKind::StringDb,
        SourceKind::Disgenet,
        SourceKind::Drugbank,
    ];

    /// Stable machine name, as used in JSON and log fields
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Uniprot => "uniprot",
            SourceKind::Ncbi => "ncbi",
            SourceKind::Pdb => "pdb",
            SourceKind::Alphafold => "alphafold",
            SourceKind::StringDb => "string",
            SourceKind::Disgenet => "disgenet",
            SourceKind::Drugbank => "drugbank",
        }
    }

    /// Human readable database name
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Uniprot => "UniProt",
            SourceKind::Ncbi => "NCBI Gene",
            SourceKind::Pdb => "PDB",
            SourceKind::Alphafold => "AlphaFold",
            SourceKind::StringDb => "STRING",
            SourceKind::Disgenet => "DisGeNET",
            SourceKind::Drugbank => "DrugBank",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = AminoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| AminoError::UnknownSource(s.to_string()))
    }
}

/// Why a connector produced no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection refused, DNS failure, reset
    Network,
    /// The connector did not answer within its deadline
    Timeout,
    /// The source does not know the identifier
    NotFound,
    /// The response body did not have the expected shape
    Malformed,
    /// The source answered with an error status
    Upstream,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::NotFound => "not_found",
            FailureKind::Malformed => "malformed",
            FailureKind::Upstream => "upstream",
        };
        f.write_str(name)
    }
}

/// A source that contributed nothing to a composite record, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: SourceKind,
    pub kind: FailureKind,
    pub message: String,
}

impl SourceFailure {
    pub fn new(source: SourceKind, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            message: message.into(),
        }
    }
}
