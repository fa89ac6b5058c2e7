pub mod error;
pub mod hierarchy;
pub mod lifecycle;
pub mod models;
pub mod semantic;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use hierarchy::{NoHierarchy, TypeHierarchy};
pub use lifecycle::{LoadStatus, MappingLifecycle};
pub use models::*;
pub use semantic::SymbolTranslator;
