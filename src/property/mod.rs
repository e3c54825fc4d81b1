//! Property records and portfolio loading

mod data;
pub mod loader;

pub use data::{Property, Charges, ChargeCategory};
pub use loader::{load_properties, load_properties_from_reader};
