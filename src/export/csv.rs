//! CSV serialization

use std::io::Write;

use crate::error::Result;
use crate::model::Table;

use super::Exporter;

/// Serializes a table as comma-separated text: one header row of column
/// names, one line per row. Numbers are written unquoted; text is quoted
/// only when it contains a delimiter, quote, or newline.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        // A zero-column table has nothing to serialize; the csv crate
        // rejects empty records, so emit nothing rather than failing.
        if table.column_count() == 0 {
            return Ok(());
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        let header: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        csv_writer.write_record(&header)?;

        for row in &table.rows {
            let record: Vec<String> = row
                .cells
                .iter()
                .map(|cell| cell.display().into_owned())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{export, Format};
    use crate::loader::load_csv;
    use crate::model::Table;

    #[test]
    fn test_header_and_rows() {
        let table = load_csv(b"a,b\n1,x\n2,y\n").unwrap();
        let bytes = export(&table, Format::Csv).unwrap();
        assert_eq!(bytes, b"a,b\n1,x\n2,y\n");
    }

    #[test]
    fn test_text_with_delimiter_is_quoted() {
        let table = load_csv(b"a,b\n1,\"x,y\"\n").unwrap();
        let bytes = export(&table, Format::Csv).unwrap();
        assert_eq!(bytes, b"a,b\n1,\"x,y\"\n");
    }

    #[test]
    fn test_zero_column_table_is_empty_output() {
        let table = Table::new(vec![]);
        let bytes = export(&table, Format::Csv).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_header_only_for_empty_rows() {
        let table = load_csv(b"a,b\n1,2\n").unwrap();
        let projected = table.select(&["a".to_string()]).unwrap();
        let mut empty = projected.clone();
        empty.rows.clear();
        let bytes = export(&empty, Format::Csv).unwrap();
        assert_eq!(bytes, b"a\n");
    }
}
