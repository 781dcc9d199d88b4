//! Text preview of a table for the CLI shell
//!
//! Presentation glue only: renders the head of a table and a column
//! summary. No contract beyond not panicking on any table.

use crate::model::Table;

/// Render the first `limit` rows as a box-drawn text table
pub fn render_preview(table: &Table, limit: usize) -> String {
    if table.column_count() == 0 {
        return String::from("(no columns)\n");
    }

    let headers: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();

    let mut data: Vec<Vec<String>> = Vec::new();
    data.push(headers);

    for row in table.rows.iter().take(limit) {
        let row_data: Vec<String> = row.cells.iter().map(|c| c.display().into_owned()).collect();
        data.push(row_data);
    }

    let mut output = build_table(&data);
    if table.row_count() > limit {
        output.push_str(&format!("({} of {} rows)\n", limit, table.row_count()));
    }
    output
}

/// Render a per-column `name: type` summary and the numeric-column list
pub fn render_summary(table: &Table) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} rows x {} columns\n",
        table.row_count(),
        table.column_count()
    ));
    for column in &table.columns {
        output.push_str(&format!("  {}: {}\n", column.name, column.inferred_type));
    }

    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        output.push_str("No numeric columns available for visualization\n");
    } else {
        output.push_str(&format!("Numeric columns: {}\n", numeric.join(", ")));
    }
    output
}

/// Build a formatted table from data (first row is the header)
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

    // Top border
    output.push('┌');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┬');
        }
    }
    output.push_str("┐\n");

    // Header row
    if let Some(header) = data.first() {
        output.push_str(&format_row(header, &col_widths));
    }

    // Header separator
    output.push('├');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┼');
        }
    }
    output.push_str("┤\n");

    // Data rows
    for row in data.iter().skip(1) {
        output.push_str(&format_row(row, &col_widths));
    }

    // Bottom border
    output.push('└');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┴');
        }
    }
    output.push_str("┘\n");

    output
}

fn format_row(row: &[String], col_widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (i, width) in col_widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        let padding = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('│');
    }
    line.push('\n');
    line
}
