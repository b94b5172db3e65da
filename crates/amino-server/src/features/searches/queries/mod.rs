pub mod get;
pub mod list;

pub use get::{GetSearchError, GetSearchQuery};
pub use list::{ListSearchesError, ListSearchesQuery, ListSearchesResponse};
