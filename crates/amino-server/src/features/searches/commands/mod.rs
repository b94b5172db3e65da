pub mod record;
pub mod run;

pub use record::{RecordSearchCommand, RecordSearchError, RecordSearchResponse};
pub use run::{RunSearchCommand, RunSearchError};
