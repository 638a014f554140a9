pub mod query_builder;
pub mod schema_registry;
pub mod tree_builder;

pub use query_builder::*;
pub use schema_registry::*;
pub use tree_builder::*;
