//! Tab components for WB Sales details

mod general;
mod json;
mod line;
mod links;
mod projections;

pub use general::GeneralTab;
pub use json::JsonTab;
pub use line::LineTab;
pub use links::LinksTab;
pub use projections::ProjectionsTab;
