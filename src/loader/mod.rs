//! Loader layer: turns uploaded files into tables

mod csv;
mod excel;

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{LoadError, PipelineError};
use crate::model::{Column, Table};

pub use self::csv::CsvLoader;
pub use self::excel::ExcelLoader;

/// Declared tabular format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Office Open XML workbook (also accepts xls/xlsm/ods via calamine)
    Xlsx,
    /// Comma-separated text
    Csv,
}

impl FileFormat {
    /// Format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Some(FileFormat::Xlsx),
            "csv" | "txt" => Some(FileFormat::Csv),
            _ => None,
        }
    }

    /// Detect format from content (for names without a usable extension)
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.len() >= 4 {
            // Excel ZIP format (xlsx) or old OLE format (xls)
            if &bytes[0..4] == b"PK\x03\x04" || &bytes[0..4] == b"\xD0\xCF\x11\xE0" {
                return FileFormat::Xlsx;
            }
        }
        FileFormat::Csv
    }
}

/// An uploaded file: display name, raw bytes and declared format
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub format: FileFormat,
}

impl UploadedFile {
    /// Wrap a byte buffer, declaring its format from the name or content
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let format = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileFormat::from_extension)
            .unwrap_or_else(|| FileFormat::detect(&bytes));
        Self {
            name,
            bytes,
            format,
        }
    }

    /// Read a file from disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(path.display().to_string(), bytes))
    }
}

/// Trait for reading one uploaded file into a table
pub trait Loader: Send + Sync {
    /// Parse the first sheet (or the whole text) of a file into a Table
    fn load(&self, bytes: &[u8]) -> Result<Table, LoadError>;
}

/// Pick the loader for a declared format
pub fn loader_for(format: FileFormat) -> &'static dyn Loader {
    match format {
        FileFormat::Xlsx => &ExcelLoader,
        FileFormat::Csv => &CsvLoader,
    }
}

/// Load every file in order; the first failure aborts with the file's name
pub fn load_all(files: &[UploadedFile]) -> Result<Vec<Table>, PipelineError> {
    files
        .iter()
        .map(|file| {
            let table = loader_for(file.format)
                .load(&file.bytes)
                .map_err(|source| PipelineError::Parse {
                    file: file.name.clone(),
                    source,
                })?;
            debug!(
                file = %file.name,
                columns = table.column_count(),
                rows = table.row_count(),
                "loaded file"
            );
            Ok(table)
        })
        .collect()
}

/// Build columns from raw header cells.
///
/// Empty headers become `Unnamed: <i>`; repeated headers become
/// `name.1`, `name.2`, ... in order of appearance.
pub(crate) fn header_columns<I>(headers: I) -> Vec<Column>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut columns = Vec::new();

    for (i, raw) in headers.into_iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            raw
        };

        let mut name = base.clone();
        if let Some(&last) = seen.get(&base) {
            let mut count = last;
            loop {
                count += 1;
                name = format!("{}.{}", base, count);
                if !seen.contains_key(&name) {
                    break;
                }
            }
            seen.insert(base, count);
        }
        seen.insert(name.clone(), 0);
        columns.push(Column::new(name, i));
    }

    columns
}
