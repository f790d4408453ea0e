//! Local CSV export source.

use super::{RowMatrix, RowSource, SourceError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse CSV text into a row matrix.
///
/// No header handling (the header may sit below narrative rows), ragged
/// rows allowed, and rows whose cells are all empty are dropped: sheet
/// exports pad blank lines with trailing commas.
pub fn parse_csv_text(text: &str) -> Result<RowMatrix, SourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = RowMatrix::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Reads a trade log from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CsvFileSource {
    fn name(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn fetch_rows(&self) -> Result<RowMatrix, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound {
                path: self.path.clone(),
            });
        }
        let text = std::fs::read_to_string(&self.path)?;
        let rows = parse_csv_text(&text)?;
        debug!(path = %self.path.display(), rows = rows.len(), "read local CSV");
        Ok(rows)
    }
}
