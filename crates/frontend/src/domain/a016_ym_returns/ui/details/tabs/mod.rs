//! YM Returns Detail Tabs
//!
//! Tab components for YM returns detail view

pub mod general;
pub mod json;
pub mod lines;
pub mod projections;

pub use general::GeneralTab;
pub use json::JsonTab;
pub use lines::LinesTab;
pub use projections::ProjectionsTab;
