pub mod config;
pub mod response;
pub mod schema;

pub use config::*;
pub use response::*;
pub use schema::*;
