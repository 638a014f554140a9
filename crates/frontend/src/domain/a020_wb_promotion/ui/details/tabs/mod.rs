pub mod general;
pub mod json;
pub mod nomenclatures;

pub use general::GeneralTab;
pub use json::JsonTab;
pub use nomenclatures::NomenclaturesTab;
