pub mod aggregate;
pub mod excel;

pub use aggregate::{Nomenclature, NomenclatureDto, NomenclatureId};
pub use excel::{ExcelRow, ImportResult};
