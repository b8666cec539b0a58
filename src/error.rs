//! Error types for the combine pipeline

use thiserror::Error;

/// Why a single input file could not be read
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Failure of the external translation capability
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Any failure that aborts a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to parse '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: LoadError,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("failed to translate column '{column}': {source}")]
    Translation {
        column: String,
        #[source]
        source: TranslateError,
    },

    #[error("no translator configured for target language '{0}'")]
    MissingTranslator(String),

    #[error("failed to export workbook: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
