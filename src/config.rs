//! Configuration for one pipeline run

use std::path::PathBuf;

use crate::export::Format;

/// Parameters for a single load/clean/select/export interaction
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input CSV file
    pub input: PathBuf,
    /// Remove duplicate rows and fill absent values
    pub clean: bool,
    /// Columns to keep (empty keeps all, in original order)
    pub columns: Vec<String>,
    /// Export serialization format
    pub format: Format,
    /// Output path override (defaults to cleaned_data.<ext>)
    pub output: Option<PathBuf>,
    /// Number of rows to show in the preview
    pub preview_rows: Option<usize>,
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            clean: false,
            columns: Vec::new(),
            format: Format::Csv,
            output: None,
            preview_rows: None,
        }
    }

    /// Enable cleaning
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Set columns to keep
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Set export format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set output path
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Set preview row count
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }
}
