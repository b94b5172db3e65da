//! Recorded searches: run, list and fetch

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{RecordSearchCommand, RunSearchCommand};
pub use queries::{GetSearchQuery, ListSearchesQuery};
pub use routes::searches_routes;
