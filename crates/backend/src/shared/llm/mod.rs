pub mod knowledge_base;
pub mod metadata_registry;
pub mod openai_provider;
pub mod tool_executor;
pub mod types;

pub use types::*;
pub use metadata_registry::METADATA_REGISTRY;
pub use tool_executor::{execute_tool_call, metadata_tool_definitions};
