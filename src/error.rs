//! Error taxonomy for the load/clean/export pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors surfaced by the core pipeline.
///
/// Each failure aborts the single operation that raised it; nothing here is
/// fatal to the process and there are no retry semantics.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("malformed input stream: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("Excel write error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

// CSV-level failures are malformed-input conditions; fold them into the
// Parse variant so every bad-stream path reports through one taxonomy.
impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Parse(e.to_string())
    }
}
