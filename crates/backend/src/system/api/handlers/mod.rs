// Authentication handlers
pub mod auth;

// User management handlers
pub mod users;

// Logging handlers
pub mod logs;

// Form settings handlers
pub mod form_settings;

// Scheduled tasks handlers
pub mod tasks;
