//! Table, Row, and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use rustc_hash::{FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Int and Float hash through the same f64 representation so that
        // cross-type numeric equality stays consistent with hashing.
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Int(i) => {
                2u8.hash(state);
                (*i as f64).to_bits().hash(state);
            }
            CellValue::Float(f) => {
                2u8.hash(state);
                if f.is_nan() {
                    f64::NAN.to_bits().hash(state);
                } else {
                    f.to_bits().hash(state);
                }
            }
            CellValue::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(d) => {
                4u8.hash(state);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                5u8.hash(state);
                dt.hash(state);
            }
        }
    }
}

impl CellValue {
    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The cell's scalar type
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Pre-computed hash over every cell, used for duplicate detection
    pub row_hash: u64,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row with computed full-row hash
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        let row_hash = Self::compute_hash(&cells);
        Self {
            cells,
            row_hash,
            source_line,
        }
    }

    /// Hash every cell with FxHasher for cheap full-row identity
    fn compute_hash(cells: &[CellValue]) -> u64 {
        let mut hasher = FxHasher::default();
        for cell in cells {
            cell.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Recompute the hash after cells were mutated
    pub fn recompute_hash(&mut self) {
        self.row_hash = Self::compute_hash(&self.cells);
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Names of columns whose inferred type is numeric.
    ///
    /// Metadata query only; this is what decides whether visualization is
    /// offered on a column.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Re-infer every column's type by widening over its cells
    pub fn infer_types(&mut self) {
        for col_idx in 0..self.columns.len() {
            let mut inferred = CellType::Null;
            for row in &self.rows {
                if let Some(cell) = row.cells.get(col_idx) {
                    inferred = inferred.widen(cell.cell_type());
                }
            }
            self.columns[col_idx].inferred_type = inferred;
        }
    }

    /// Project a subset of columns into a new table.
    ///
    /// Columns keep the table's original order no matter what order the
    /// names are given in. An empty selection yields a zero-column table.
    pub fn select(&self, names: &[String]) -> Result<Table> {
        let wanted: FxHashSet<&str> = names.iter().map(|n| n.as_str()).collect();

        for name in names {
            if self.column_index(name).is_none() {
                return Err(PipelineError::UnknownColumn(name.clone()));
            }
        }

        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| wanted.contains(c.name.as_str()))
            .map(|(i, _)| i)
            .collect();

        let columns: Vec<Column> = keep
            .iter()
            .enumerate()
            .map(|(new_idx, &old_idx)| {
                let col = &self.columns[old_idx];
                Column::with_type(col.name.clone(), new_idx, col.inferred_type)
            })
            .collect();

        let mut projected = Table::new(columns);
        for row in &self.rows {
            let cells: Vec<CellValue> = keep
                .iter()
                .map(|&i| row.cells.get(i).cloned().unwrap_or(CellValue::Null))
                .collect();
            projected.add_row(cells, row.source_line);
        }

        Ok(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![
            Column::with_type("id", 0, CellType::Int),
            Column::with_type("name", 1, CellType::String),
            Column::with_type("score", 2, CellType::Float),
        ]);
        table.add_row(
            vec![CellValue::Int(1), "alice".into(), CellValue::Float(9.5)],
            2,
        );
        table.add_row(
            vec![CellValue::Int(2), "bob".into(), CellValue::Float(7.0)],
            3,
        );
        table
    }

    #[test]
    fn test_cross_type_numeric_equality() {
        assert_eq!(CellValue::Int(2), CellValue::Float(2.0));
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Int(2), CellValue::String(Cow::Borrowed("2")));
    }

    #[test]
    fn test_equal_rows_hash_equal() {
        let a = Row::new(vec![CellValue::Int(2), "x".into()], 2);
        let b = Row::new(vec![CellValue::Float(2.0), "x".into()], 5);
        assert_eq!(a.row_hash, b.row_hash);
    }

    #[test]
    fn test_select_preserves_original_column_order() {
        let table = sample_table();
        let projected = table
            .select(&["score".to_string(), "id".to_string()])
            .unwrap();
        let names: Vec<_> = projected.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "score"]);
        assert_eq!(projected.rows[0].cells[0], CellValue::Int(1));
        assert_eq!(projected.rows[0].cells[1], CellValue::Float(9.5));
    }

    #[test]
    fn test_select_unknown_column() {
        let table = sample_table();
        let err = table.select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownColumn(name) if name == "nope"));
    }

    #[test]
    fn test_select_empty_yields_zero_columns() {
        let table = sample_table();
        let projected = table.select(&[]).unwrap();
        assert_eq!(projected.column_count(), 0);
        assert_eq!(projected.row_count(), 2);
        assert!(projected.rows.iter().all(|r| r.cells.is_empty()));
    }

    #[test]
    fn test_numeric_columns() {
        let table = sample_table();
        assert_eq!(table.numeric_columns(), ["id", "score"]);
    }
}
