//! Loader: byte streams in, typed Tables out

mod csv;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{PipelineError, Result};
use crate::model::Table;

/// Parse a CSV byte stream (header row first) into a Table.
///
/// Pure and idempotent: the same bytes always yield an equal Table. Fails
/// with a parse error on anything that is not well-formed delimited text.
pub fn load_csv(bytes: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| PipelineError::Parse(format!("input is not valid UTF-8 text: {}", e)))?;

    if text.contains('\0') {
        return Err(PipelineError::Parse(
            "input contains NUL bytes, not delimited text".to_string(),
        ));
    }

    if text.trim().is_empty() {
        return Err(PipelineError::Parse("input stream is empty".to_string()));
    }

    csv::parse_csv(text)
}

/// Content-addressed memo of the bytes-to-Table mapping.
///
/// Keyed by the exact byte content of the upload, never by filename, so
/// re-submitting different bytes under the same name can never serve a
/// stale table. Optional: `load_csv` alone satisfies the loader contract.
#[derive(Default)]
pub struct LoaderCache {
    entries: IndexMap<Vec<u8>, Arc<Table>>,
}

impl LoaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse through the cache, returning a shared handle to the Table
    pub fn load(&mut self, bytes: &[u8]) -> Result<Arc<Table>> {
        if let Some(table) = self.entries.get(bytes) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_csv(bytes)?);
        self.entries.insert(bytes.to_vec(), Arc::clone(&table));
        Ok(table)
    }

    /// Number of distinct byte streams cached
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached tables
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
