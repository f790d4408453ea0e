//! Raw-matrix sources and structured error types.
//!
//! The `RowSource` trait abstracts over where a trade log comes from (a local
//! CSV export, a remote spreadsheet export, an in-memory matrix) so the
//! ingestion pipeline only ever sees a materialized row matrix.

pub mod csv_file;
pub mod sheet;

pub use csv_file::{parse_csv_text, CsvFileSource};
pub use sheet::SheetExportSource;

use std::path::PathBuf;
use thiserror::Error;

/// Ordered rows of string cells. Rows may be ragged.
pub type RowMatrix = Vec<Vec<String>>;

/// Errors from acquiring a row matrix.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("source returned an empty document")]
    EmptyResponse,
}

/// Anything that can produce a raw row matrix.
pub trait RowSource: Send + Sync {
    /// Human-readable name for logs and reports.
    fn name(&self) -> String;

    /// Materialize the full row matrix.
    fn fetch_rows(&self) -> Result<RowMatrix, SourceError>;
}

/// A fixed, already-materialized matrix.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    rows: RowMatrix,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rows: RowMatrix) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RowSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn fetch_rows(&self) -> Result<RowMatrix, SourceError> {
        Ok(self.rows.clone())
    }
}
