//! JSON preview format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::model::{CellType, CellValue, Table};

use super::PreviewFormatter;

/// JSON preview formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonColumn<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    cell_type: CellType,
}

#[derive(Serialize)]
struct JsonPreview<'a> {
    title: &'a str,
    columns: Vec<JsonColumn<'a>>,
    rows: Vec<&'a [CellValue]>,
    total_rows: usize,
}

impl PreviewFormatter for JsonOutput {
    fn render(
        &self,
        table: &Table,
        title: &str,
        limit: usize,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        let preview = JsonPreview {
            title,
            columns: table
                .columns
                .iter()
                .map(|c| JsonColumn {
                    name: &c.name,
                    cell_type: c.inferred_type,
                })
                .collect(),
            rows: table.head(limit).iter().map(|r| r.cells.as_slice()).collect(),
            total_rows: table.row_count(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &preview)?;
        } else {
            serde_json::to_writer(&mut *writer, &preview)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
