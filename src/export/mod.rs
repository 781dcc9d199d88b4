//! Exporter: serialize a Table to a downloadable byte stream

mod csv;
mod excel;

use std::io::Write;

use crate::error::{PipelineError, Result};
use crate::model::Table;

pub use self::csv::CsvExporter;
pub use self::excel::ExcelExporter;

/// Export serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Excel,
}

impl std::str::FromStr for Format {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "excel" | "xlsx" => Ok(Format::Excel),
            _ => Err(PipelineError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Excel => write!(f, "Excel"),
        }
    }
}

impl Format {
    /// File extension for the download filename
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Excel => "xlsx",
        }
    }

    /// MIME type label for the download.
    ///
    /// The Excel branch uses the real spreadsheet MIME type rather than a
    /// generic text label.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Download filename for an exported table
pub fn download_filename(format: Format) -> String {
    format!("cleaned_data.{}", format.extension())
}

/// Trait for table serializers
pub trait Exporter {
    /// Serialize a table to a writer
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating exporters based on format tag
pub struct ExporterFactory;

impl ExporterFactory {
    /// Create an exporter for the given format
    pub fn create(format: Format) -> Box<dyn Exporter> {
        match format {
            Format::Csv => Box::new(CsvExporter),
            Format::Excel => Box::new(ExcelExporter),
        }
    }
}

/// Serialize a table to bytes in the given format.
///
/// Deterministic for CSV. The Excel container carries a creation timestamp
/// in its document properties, so its raw bytes may differ between runs;
/// compare parsed content, not bytes.
pub fn export(table: &Table, format: Format) -> Result<Vec<u8>> {
    let exporter = ExporterFactory::create(format);
    let mut buffer = Vec::new();
    exporter.write(table, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("Excel".parse::<Format>().unwrap(), Format::Excel);
        assert_eq!("xlsx".parse::<Format>().unwrap(), Format::Excel);
    }

    #[test]
    fn test_unrecognized_format_tag_fails() {
        let err = "PDF".parse::<Format>().unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(tag) if tag == "PDF"));
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename(Format::Csv), "cleaned_data.csv");
        assert_eq!(download_filename(Format::Excel), "cleaned_data.xlsx");
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(Format::Csv.mime_type(), "text/csv");
        assert!(Format::Excel.mime_type().contains("spreadsheetml"));
    }
}
