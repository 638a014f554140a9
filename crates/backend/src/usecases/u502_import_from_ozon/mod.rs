pub mod ozon_api_client;
pub mod executor;
pub mod progress_tracker;

pub use executor::ImportExecutor;
pub use progress_tracker::ProgressTracker;
