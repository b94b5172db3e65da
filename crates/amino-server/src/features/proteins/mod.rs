pub mod queries;
pub mod routes;

pub use queries::{LookupProteinError, LookupProteinQuery};
pub use routes::proteins_routes;
