pub mod data_spec;
pub mod drill_spec;
pub mod general;
pub mod meta;
pub mod params;
pub mod view_spec;

pub use data_spec::DataSpecTab;
pub use drill_spec::DrillSpecTab;
pub use general::GeneralTab;
pub use meta::MetaTab;
pub use params::ParamsTab;
pub use view_spec::ViewSpecTab;
