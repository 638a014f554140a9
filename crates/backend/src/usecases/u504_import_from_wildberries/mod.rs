pub mod wildberries_api_client;
pub mod executor;
pub mod progress_tracker;
pub mod processors;

pub use executor::ImportExecutor;
pub use progress_tracker::ProgressTracker;
