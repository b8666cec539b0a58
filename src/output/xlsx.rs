//! Excel workbook export

use std::path::Path;

use rust_xlsxwriter::{
    ColNum, DocProperties, ExcelDateTime, Format, FormatBorder, RowNum, Workbook, Worksheet,
    XlsxError,
};
use tracing::{info, warn};

use crate::config::DEFAULT_OUTPUT_FILE;
use crate::model::serial::{date_to_serial, datetime_to_serial};
use crate::model::{CellValue, Table};

/// Name of the single sheet in the exported workbook
pub const SHEET_NAME: &str = "Combined Data";

/// Longest string a single Excel cell can hold, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// MIME type of the exported workbook
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serialized workbook bytes, produced once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBuffer {
    bytes: Vec<u8>,
}

impl ExportBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Suggested download name
    pub fn file_name(&self) -> &'static str {
        DEFAULT_OUTPUT_FILE
    }

    pub fn mime_type(&self) -> &'static str {
        XLSX_MIME_TYPE
    }

    /// Write the buffer to disk
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}

/// Encode a table as a one-sheet workbook: header row, then one row per
/// table row. No index column is written and null cells stay blank.
pub fn export_xlsx(table: &Table) -> Result<ExportBuffer, XlsxError> {
    let mut workbook = Workbook::new();

    // Fixed creation time so the same table always encodes to the same bytes
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col_idx, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col_idx)?, &column.name, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = row_num(row_idx + 1)?;
        for (col_idx, cell) in row.cells.iter().enumerate() {
            write_cell(
                worksheet,
                excel_row,
                col_num(col_idx)?,
                cell,
                &date_format,
                &datetime_format,
            )?;
        }
    }

    let bytes = workbook.save_to_buffer()?;

    info!(
        columns = table.column_count(),
        rows = table.row_count(),
        bytes = bytes.len(),
        "exported workbook"
    );

    Ok(ExportBuffer { bytes })
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &CellValue,
    date_format: &Format,
    datetime_format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        // Excel has no representation for NaN or infinity
        CellValue::Float(f) if !f.is_finite() => {}
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::String(s) => {
            worksheet.write_string(row, col, truncate_chars(s, MAX_CELL_CHARS))?;
        }
        CellValue::Date(d) => {
            worksheet.write_number_with_format(row, col, date_to_serial(*d), date_format)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_number_with_format(
                row,
                col,
                datetime_to_serial(*dt),
                datetime_format,
            )?;
        }
    }
    Ok(())
}

/// Cut `text` to at most `max` characters, on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => {
            warn!(chars = text.chars().count(), max, "truncating oversized cell text");
            &text[..end]
        }
        None => text,
    }
}

fn row_num(index: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ExcelLoader, Loader};
    use chrono::NaiveDate;

    fn sample() -> Table {
        let mut table = Table::from_names(&["Name", "Age", "City", "Joined"]);
        table.add_row(
            vec![
                "Alice".into(),
                30i64.into(),
                CellValue::Null,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().into(),
            ],
            2,
        );
        table.add_row(
            vec!["Bob".into(), 41.5.into(), "Paris".into(), CellValue::Null],
            3,
        );
        table
    }

    #[test]
    fn test_export_roundtrip() {
        let table = sample();
        let buffer = export_xlsx(&table).unwrap();
        let loaded = ExcelLoader.load(buffer.as_bytes()).unwrap();

        assert_eq!(loaded.column_names(), table.column_names());
        assert_eq!(loaded.row_count(), 2);
        for (loaded_row, row) in loaded.rows.iter().zip(&table.rows) {
            assert_eq!(loaded_row.cells, row.cells);
        }
    }

    #[test]
    fn test_export_sheet_name() {
        use calamine::{open_workbook_auto_from_rs, Reader};

        let buffer = export_xlsx(&sample()).unwrap();
        let workbook = open_workbook_auto_from_rs(std::io::Cursor::new(buffer.into_bytes())).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    }

    #[test]
    fn test_export_is_deterministic() {
        let first = export_xlsx(&sample()).unwrap();
        let second = export_xlsx(&sample()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_empty_table() {
        let buffer = export_xlsx(&Table::default()).unwrap();
        assert!(!buffer.is_empty());
        assert_eq!(buffer.mime_type(), XLSX_MIME_TYPE);
        assert_eq!(buffer.file_name(), "Combined_Data.xlsx");
        assert!(ExcelLoader.load(buffer.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_text_is_truncated() {
        let mut table = Table::from_names(&["Notes", "Short"]);
        let long = "é".repeat(MAX_CELL_CHARS + 5000);
        table.add_row(vec![long.into(), "ok".into()], 2);

        let buffer = export_xlsx(&table).unwrap();
        let loaded = ExcelLoader.load(buffer.as_bytes()).unwrap();

        match loaded.cell(0, "Notes") {
            Some(CellValue::String(s)) => {
                assert_eq!(s.chars().count(), MAX_CELL_CHARS);
                assert!(s.chars().all(|c| c == 'é'));
            }
            other => panic!("unexpected cell: {:?}", other),
        }
        assert_eq!(loaded.cell(0, "Short"), Some(&"ok".into()));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("añb", 2), "añ");
    }
}
