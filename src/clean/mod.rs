//! Cleaner: sentinel fill and duplicate-row removal

use std::borrow::Cow;

use rustc_hash::FxHashMap;

use crate::model::{CellValue, Table};

/// Replacement text for absent cells
pub const SENTINEL: &str = "Missing";

/// Clean a table: fill every absent cell with the sentinel text, then drop
/// duplicate rows (full-row value equality, first occurrence kept, order of
/// the remaining rows preserved).
///
/// Consumes its input so a caller can never observe the pre-clean table
/// through a stale reference. Idempotent: cleaning a cleaned table is a
/// no-op. Filling runs before deduplication so that a row with an absent
/// cell and a row already carrying the sentinel collapse in one pass.
pub fn clean(mut table: Table) -> Table {
    fill_missing(&mut table);
    drop_duplicates(&mut table);
    table.infer_types();
    table
}

fn fill_missing(table: &mut Table) {
    for row in &mut table.rows {
        let mut changed = false;
        for cell in &mut row.cells {
            if cell.is_null() {
                *cell = CellValue::String(Cow::Borrowed(SENTINEL));
                changed = true;
            }
        }
        if changed {
            row.recompute_hash();
        }
    }
}

fn drop_duplicates(table: &mut Table) {
    // Hash buckets with cell-equality verification on collision
    let mut seen: FxHashMap<u64, Vec<Vec<CellValue>>> = FxHashMap::default();

    table.rows.retain(|row| {
        let bucket = seen.entry(row.row_hash).or_default();
        if bucket.iter().any(|cells| cells == &row.cells) {
            false
        } else {
            bucket.push(row.cells.clone());
            true
        }
    });
}
