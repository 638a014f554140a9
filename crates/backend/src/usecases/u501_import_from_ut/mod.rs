pub mod ut_odata_client;
pub mod executor;
pub mod progress_tracker;
pub mod odata_models_organization;
pub mod odata_models_counterparty;
pub mod odata_models_nomenclature;

pub use executor::ImportExecutor;
pub use progress_tracker::ProgressTracker;
