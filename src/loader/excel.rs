//! Excel workbook loader (xlsx, xls, ods)

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::LoadError;
use crate::model::serial::serial_to_cell;
use crate::model::{CellValue, Table};

use super::{header_columns, Loader};

/// Loader for Excel workbooks; reads the first sheet only
pub struct ExcelLoader;

impl Loader for ExcelLoader {
    fn load(&self, bytes: &[u8]) -> Result<Table, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoSheets)?;

        let range: Range<Data> = workbook.worksheet_range(&sheet_name)?;

        Ok(parse_range(&range))
    }
}

fn parse_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    // First row is header; an empty sheet is an empty table
    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(header_columns(header_row.iter().map(cell_to_string)));

    for (line_num, row) in rows.enumerate() {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        table.add_row(cells, line_num + 2); // +2 for 1-indexing and header
    }

    table.infer_column_types();
    table
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_to_cell(dt.as_f64()).display().into_owned(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::Float(f) => {
            // Check if it's actually an integer
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => serial_to_cell(dt.as_f64()),
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                CellValue::DateTime(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(build: impl FnOnce(&mut rust_xlsxwriter::Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(workbook.add_worksheet());
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_load_first_sheet() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "Name").unwrap();
            sheet.write_string(0, 1, "Age").unwrap();
            sheet.write_string(1, 0, "Alice").unwrap();
            sheet.write_number(1, 1, 30).unwrap();
            sheet.write_string(2, 0, "Bob").unwrap();
            sheet.write_number(2, 1, 41.5).unwrap();
        });

        let table = ExcelLoader.load(&bytes).unwrap();
        assert_eq!(table.column_names(), vec!["Name", "Age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "Age"), Some(&CellValue::Int(30)));
        assert_eq!(table.cell(1, "Age"), Some(&CellValue::Float(41.5)));
        assert_eq!(table.rows[1].source_line, 3);
    }

    #[test]
    fn test_missing_cells_are_null() {
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "a").unwrap();
            sheet.write_string(0, 1, "b").unwrap();
            sheet.write_string(1, 0, "x").unwrap();
            sheet.write_string(2, 1, "y").unwrap();
        });

        let table = ExcelLoader.load(&bytes).unwrap();
        assert_eq!(table.cell(0, "b"), Some(&CellValue::Null));
        assert_eq!(table.cell(1, "a"), Some(&CellValue::Null));
    }

    #[test]
    fn test_empty_sheet_is_empty_table() {
        let bytes = workbook_bytes(|_| {});
        let table = ExcelLoader.load(&bytes).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_date_cell_beyond_calendar_stays_numeric() {
        use rust_xlsxwriter::Format;

        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let bytes = workbook_bytes(|sheet| {
            sheet.write_string(0, 0, "When").unwrap();
            sheet
                .write_number_with_format(1, 0, 45306.0, &date_format)
                .unwrap();
            sheet
                .write_number_with_format(2, 0, 1.0e9, &date_format)
                .unwrap();
        });

        let table = ExcelLoader.load(&bytes).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(table.cell(0, "When"), Some(&CellValue::Date(date)));
        assert_eq!(table.cell(1, "When"), Some(&CellValue::Float(1.0e9)));
    }

    #[test]
    fn test_malformed_input() {
        assert!(ExcelLoader.load(b"definitely not a zip").is_err());
    }
}
