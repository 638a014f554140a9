pub mod d400_monthly_summary;
