pub mod profile;
pub mod query;

pub use profile::*;
pub use query::*;
