pub mod common;
pub mod u501_import_from_ut;
pub mod u502_import_from_ozon;
pub mod u503_import_from_yandex;
pub mod u504_import_from_wildberries;
pub mod u505_match_nomenclature;
pub mod u506_import_from_lemanapro;
pub mod u507_import_from_erp;
