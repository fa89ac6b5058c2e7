pub mod class;
pub mod method;
pub mod stats;
pub mod table;
pub mod type_name;

pub use class::ClassMapping;
pub use method::MethodMapping;
pub use stats::ParseStats;
pub use table::{MappingTable, MappingTableBuilder};
