//! Union-by-name concatenation of tables

use indexmap::IndexSet;
use tracing::info;

use crate::model::{CellValue, Column, Row, Table};

/// Concatenate tables, aligning columns by exact name.
///
/// The result's columns are the union of all input columns in first-seen
/// order; rows keep input order and are padded with nulls for columns their
/// source did not have.
pub fn combine<I>(tables: I) -> Table
where
    I: IntoIterator<Item = Table>,
{
    let tables: Vec<Table> = tables.into_iter().collect();

    let names: IndexSet<&str> = tables
        .iter()
        .flat_map(|t| t.columns.iter().map(|c| c.name.as_str()))
        .collect();

    // Source column position -> combined column position, per input
    let mappings: Vec<Vec<usize>> = tables
        .iter()
        .map(|t| {
            t.columns
                .iter()
                .filter_map(|c| names.get_index_of(c.name.as_str()))
                .collect()
        })
        .collect();

    let mut combined = Table::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(*name, i))
            .collect(),
    );
    let width = combined.column_count();

    for (table, mapping) in tables.iter().zip(&mappings) {
        combined.rows.reserve(table.row_count());
        for row in &table.rows {
            let mut cells = vec![CellValue::Null; width];
            for (cell, &target) in row.cells.iter().zip(mapping) {
                cells[target] = cell.clone();
            }
            combined.rows.push(Row::new(cells, row.source_line));
        }
    }

    combined.infer_column_types();

    info!(
        inputs = tables.len(),
        columns = combined.column_count(),
        rows = combined.row_count(),
        "combined tables"
    );

    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        let mut table = Table::from_names(names);
        for (i, row) in rows.into_iter().enumerate() {
            table.add_row(row, i + 2);
        }
        table
    }

    #[test]
    fn test_combine_aligns_by_name() {
        let a = table(&["Name", "Age"], vec![vec!["Alice".into(), 30i64.into()]]);
        let b = table(&["Name", "City"], vec![vec!["Bob".into(), "Paris".into()]]);

        let combined = combine(vec![a, b]);

        assert_eq!(combined.column_names(), vec!["Name", "Age", "City"]);
        assert_eq!(
            combined.rows[0].cells,
            vec!["Alice".into(), CellValue::Int(30), CellValue::Null]
        );
        assert_eq!(
            combined.rows[1].cells,
            vec!["Bob".into(), CellValue::Null, "Paris".into()]
        );
    }

    #[test]
    fn test_combine_disjoint_counts() {
        let a = table(
            &["a", "b"],
            vec![vec![1i64.into(), 2i64.into()], vec![3i64.into(), 4i64.into()]],
        );
        let b = table(&["c"], vec![vec!["x".into()]]);
        let c = table(&["d", "e", "f"], vec![]);

        let combined = combine(vec![a, b, c]);

        assert_eq!(combined.column_count(), 2 + 1 + 3);
        assert_eq!(combined.row_count(), 2 + 1);
        assert!(combined.rows.iter().all(|r| r.cells.len() == 6));
    }

    #[test]
    fn test_combine_reordered_columns() {
        let a = table(&["x", "y"], vec![vec![1i64.into(), 2i64.into()]]);
        let b = table(&["y", "x"], vec![vec![20i64.into(), 10i64.into()]]);

        let combined = combine(vec![a, b]);

        assert_eq!(combined.column_names(), vec!["x", "y"]);
        assert_eq!(combined.rows[1].cells, vec![CellValue::Int(10), CellValue::Int(20)]);
    }

    #[test]
    fn test_combine_is_case_sensitive() {
        let a = table(&["name"], vec![vec!["a".into()]]);
        let b = table(&["Name"], vec![vec!["b".into()]]);

        let combined = combine(vec![a, b]);

        assert_eq!(combined.column_names(), vec!["name", "Name"]);
    }

    #[test]
    fn test_combine_empty_input() {
        let combined = combine(Vec::new());
        assert!(combined.is_empty());
        assert_eq!(combined.column_count(), 0);
    }
}
