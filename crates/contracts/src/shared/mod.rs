pub mod indicators;
pub mod metadata;
pub mod pivot;
pub mod universal_dashboard;
pub mod form_settings;
pub mod logger;
