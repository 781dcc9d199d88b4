//! CSV text parsing with per-cell type inference

use std::borrow::Cow;

use crate::error::{PipelineError, Result};
use crate::model::{CellType, CellValue, Column, Table};

/// Parse comma-separated text (header row first) into a Table
pub(super) fn parse_csv(text: &str) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = csv_reader.headers()?.clone();

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.to_string(), i))
        .collect();

    let mut table = Table::new(columns);

    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result?;

        // Short rows are padded below; rows wider than the header have no
        // column to align to and the table invariant would not hold
        if record.len() > table.column_count() {
            return Err(PipelineError::Parse(format!(
                "row {} has {} fields, expected {}",
                line_num + 2,
                record.len(),
                table.column_count()
            )));
        }

        let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();

        // Pad with nulls if row has fewer columns
        let cells = if cells.len() < table.column_count() {
            let mut padded = cells;
            padded.resize(table.column_count(), CellValue::Null);
            padded
        } else {
            cells
        };

        table.add_row(cells, line_num + 2); // +2 for 1-indexing and header
    }

    table.infer_types();
    normalize_mixed_columns(&mut table);

    Ok(table)
}

/// Parse a string value into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    // Check for empty/null (the usual CSV missing-value tokens)
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed == "NA"
    {
        return CellValue::Null;
    }

    // Try parsing as boolean
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("no") {
        return CellValue::Bool(false);
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Try parsing as float
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    // Try parsing as date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    // Default to string
    CellValue::String(Cow::Owned(trimmed.to_string()))
}

/// Demote columns that inferred to Mixed down to uniform text.
///
/// Each column carries exactly one declared type; when cell inference
/// disagrees within a column, every non-absent cell is re-rendered as its
/// display string and the column becomes a string column.
fn normalize_mixed_columns(table: &mut Table) {
    let mixed: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.inferred_type == CellType::Mixed)
        .map(|(i, _)| i)
        .collect();

    if mixed.is_empty() {
        return;
    }

    for row in &mut table.rows {
        for &col_idx in &mixed {
            if let Some(cell) = row.cells.get_mut(col_idx) {
                if !cell.is_null() {
                    *cell = CellValue::String(Cow::Owned(cell.display().into_owned()));
                }
            }
        }
        row.recompute_hash();
    }

    for &col_idx in &mixed {
        table.columns[col_idx].inferred_type = CellType::String;
    }
}
