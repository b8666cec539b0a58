//! Output: table previews and the exported workbook

mod json;
mod terminal;
mod xlsx;

use anyhow::Result;
use termcolor::WriteColor;

use crate::config::OutputFormat;
use crate::model::Table;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use xlsx::{export_xlsx, ExportBuffer, SHEET_NAME, XLSX_MIME_TYPE};

/// Trait for table preview formatters
pub trait PreviewFormatter {
    /// Render the first `limit` rows of `table` under `title`
    fn render(
        &self,
        table: &Table,
        title: &str,
        limit: usize,
        writer: &mut dyn WriteColor,
    ) -> Result<()>;
}

/// Factory for creating preview formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create a preview formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn PreviewFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}
