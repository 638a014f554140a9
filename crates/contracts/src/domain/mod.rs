pub mod a001_connection_1c;
pub mod a002_organization;
pub mod a003_counterparty;
pub mod a004_nomenclature;
pub mod a005_marketplace;
pub mod a006_connection_mp;
pub mod a007_marketplace_product;
pub mod a008_marketplace_sales;
pub mod a009_ozon_returns;
pub mod a010_ozon_fbs_posting;
pub mod a011_ozon_fbo_posting;
pub mod a012_wb_sales;
pub mod a013_ym_order;
pub mod a014_ozon_transactions;
pub mod a015_wb_orders;
pub mod a016_ym_returns;
pub mod a017_llm_agent;
pub mod a018_llm_chat;
pub mod a019_llm_artifact;
pub mod a020_wb_promotion;
pub mod a021_production_output;
pub mod a022_kit_variant;
pub mod a023_purchase_of_goods;
pub mod a024_bi_indicator;
pub mod common;
pub mod connection_1c;
