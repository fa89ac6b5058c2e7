//! Mapping tables for twice-renamed JVM artifacts and the resolver that joins
//! them.
//!
//! A *community* table (names seen in locally recompiled source) and a
//! *canonical* table (human-readable names) share their obfuscated side. The
//! resolver bridges the two through that shared identifier.

pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod paths;
pub mod resolver;
pub mod service;

pub use error::{MappingError, Result};
pub use model::{ClassMapping, MappingTable, MappingTableBuilder, MethodMapping, ParseStats};
pub use parser::{LineSource, MalformedPolicy, ParseOptions, PeekableLines, parse_flat, parse_retrace};
pub use resolver::{
    Resolver, describe_class, describe_field, describe_method, format_method, resolve_class_name,
    resolve_field_name, resolve_method_name,
};
pub use service::{
    FsFetcher, MappingFetcher, MappingPair, MappingService, ProfileStore, load_pair, load_table,
};
