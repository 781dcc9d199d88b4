//! datatidy - clean and convert tabular data
//!
//! A small pipeline for tabular files: load a CSV byte stream into a typed
//! [`Table`], optionally clean it (drop duplicate rows, fill absent values
//! with the sentinel text "Missing"), project a subset of columns, and
//! export the result as CSV or Excel.

pub mod clean;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod preview;

pub use clean::{clean, SENTINEL};
pub use config::Config;
pub use error::{PipelineError, Result};
pub use export::{download_filename, export, Format};
pub use loader::{load_csv, LoaderCache};
pub use model::Table;
