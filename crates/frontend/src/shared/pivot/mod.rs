pub mod config_panel;
pub mod pivot_table;
pub mod saved_configs;
pub mod settings_table;
pub mod sql_viewer;

pub use config_panel::*;
pub use pivot_table::*;
pub use saved_configs::*;
pub use settings_table::*;
pub use sql_viewer::*;
