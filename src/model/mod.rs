//! Data model for tabular data representation

mod schema;
pub mod serial;
mod table;

pub use schema::{CellType, Column};
pub use table::{CellValue, Row, Table};
