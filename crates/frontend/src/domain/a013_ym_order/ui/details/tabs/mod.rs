//! Tab components for YM Order details

mod campaign;
mod general;
mod json;
mod lines;
mod links;
mod projections;

pub use campaign::CampaignTab;
pub use general::GeneralTab;
pub use json::JsonTab;
pub use lines::LinesTab;
pub use links::LinksTab;
pub use projections::ProjectionsTab;
