pub mod lookup;

pub use lookup::{LookupProteinError, LookupProteinQuery};
