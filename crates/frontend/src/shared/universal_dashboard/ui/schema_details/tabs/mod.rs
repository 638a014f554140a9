//! Schema details tabs

mod fields_tab;
mod settings_tab;
mod sql_tab;
mod test_tab;

pub use fields_tab::FieldsTab;
pub use settings_tab::SettingsTab;
pub use sql_tab::SqlTab;
pub use test_tab::TestTab;
