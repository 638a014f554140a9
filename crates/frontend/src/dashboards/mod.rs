pub mod d400_monthly_summary;
pub mod d401_metadata_dashboard;
pub mod d401_wb_finance;

pub use d400_monthly_summary::ui::MonthlySummaryDashboard;
pub use d401_metadata_dashboard::ui::MetadataDashboard;
pub use d401_wb_finance::ui::D401WbFinanceDashboard;
