//! Column removal

use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::model::Table;

/// Remove the named columns and their cells from every row.
///
/// Names that are not in the table are ignored.
pub fn prune<S: AsRef<str>>(mut table: Table, columns: &[S]) -> Table {
    let drop: FxHashSet<&str> = columns.iter().map(|c| c.as_ref()).collect();
    if drop.is_empty() {
        return table;
    }

    for name in &drop {
        if table.column_index(name).is_none() {
            warn!(column = %name, "ignoring drop of unknown column");
        }
    }

    let keep: Vec<bool> = table
        .columns
        .iter()
        .map(|c| !drop.contains(c.name.as_str()))
        .collect();

    if keep.iter().all(|&k| k) {
        return table;
    }

    table.columns = retain_by_mask(std::mem::take(&mut table.columns), &keep);
    for row in &mut table.rows {
        row.cells = retain_by_mask(std::mem::take(&mut row.cells), &keep);
    }
    table.reindex_columns();

    info!(
        dropped = keep.iter().filter(|&&k| !k).count(),
        columns = table.column_count(),
        "pruned columns"
    );

    table
}

/// Like [`prune`], but every name must exist in the table
pub fn prune_strict<S: AsRef<str>>(table: Table, columns: &[S]) -> Result<Table> {
    if let Some(missing) = columns
        .iter()
        .map(|c| c.as_ref())
        .find(|name| table.column_index(name).is_none())
    {
        return Err(PipelineError::ColumnNotFound(missing.to_string()));
    }
    Ok(prune(table, columns))
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}
