//! Tabular dataset: named numeric columns aligned on a shared row index.

pub mod loader;
pub mod types;
pub mod writer;

pub use loader::{load, LoadOptions};
pub use types::{Column, Dataset};
pub use writer::save;
