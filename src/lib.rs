//! sheetmerge - Combine spreadsheets into a single workbook
//!
//! Loads several spreadsheet files, unions them by column name, optionally
//! drops columns and translates headers, and encodes the result as one
//! Excel sheet named "Combined Data".

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod transform;
pub mod translate;

pub use config::Config;
pub use error::PipelineError;
pub use model::Table;
pub use pipeline::{Pipeline, PipelineOutput, Selections};
