//! Box-drawn terminal preview

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::Table;

use super::PreviewFormatter;

/// Terminal table preview with a coloured title
pub struct TerminalOutput {
    title_color: Color,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            title_color: Color::Cyan,
        }
    }

    fn write_title(&self, title: &str, writer: &mut dyn WriteColor) -> Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(self.title_color)).set_bold(true))?;
        write!(writer, "### {}", title)?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewFormatter for TerminalOutput {
    fn render(
        &self,
        table: &Table,
        title: &str,
        limit: usize,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        self.write_title(title, writer)?;

        if table.column_count() == 0 {
            writeln!(writer, "(no columns)")?;
            writeln!(writer)?;
            return Ok(());
        }

        let rows = table.head(limit);
        let mut data: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
        data.push(table.columns.iter().map(|c| c.name.clone()).collect());
        for row in rows {
            data.push(row.cells.iter().map(|c| c.display().into_owned()).collect());
        }

        write!(writer, "{}", build_table(&data))?;

        let hidden = table.row_count().saturating_sub(limit);
        if hidden > 0 {
            writeln!(writer, "... {} more rows", hidden)?;
        }
        writeln!(
            writer,
            "{} rows × {} columns",
            table.row_count(),
            table.column_count()
        )?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Build a formatted table from data; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();

    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();

    output.push_str(&border(&col_widths, '┌', '┬', '┐'));
    output.push_str(&data_line(&data[0], &col_widths));
    output.push_str(&border(&col_widths, '├', '┼', '┤'));
    for row in data.iter().skip(1) {
        output.push_str(&data_line(row, &col_widths));
    }
    output.push_str(&border(&col_widths, '└', '┴', '┘'));

    output
}

fn border(col_widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
}

fn data_line(row: &[String], col_widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (i, width) in col_widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!(" {:width$} │", cell, width = width));
    }
    line.push('\n');
    line
}
