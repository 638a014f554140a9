pub mod condition;
pub mod config;
pub mod response;
pub mod schema;

pub use condition::*;
pub use config::*;
pub use response::*;
pub use schema::*;
