//! Domain types shared by the server and the CLI

pub mod identifier;
pub mod protein;
pub mod search;
pub mod source;

pub use protein::{
    DiseaseAssociation, DrugAssociation, GoAspect, GoTerm, InteractionEvidence,
    InteractionPartner, ProteinLookup, ProteinRecord, StructureEntry,
};
pub use search::{RecordSearchRequest, SearchHistoryItem, SearchOutcome, SearchRecord};
pub use source::{FailureKind, SourceFailure, SourceKind};
