pub mod u501_import_ut;
pub mod u502_import_ozon;
pub mod u503_import_yandex;
pub mod u504_import_wildberries;

pub use u501_import_ut::U501ImportUtManager;
pub use u502_import_ozon::U502ImportOzonManager;
pub use u503_import_yandex::U503ImportYandexManager;
pub use u504_import_wildberries::U504ImportWildberriesManager;
