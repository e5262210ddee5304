//! Data module - CSV loading and row filtering

mod filter;
mod loader;
mod model;

pub use filter::{ProvinceFilter, Selection, ALL_PROVINCES};
pub use loader::{DataLoader, Dataset, LoaderError};
pub use model::{CsvColumns, Observation};
