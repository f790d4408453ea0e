//! Ingestion boundary: raw row matrix → ordered TradeRecords.

use super::columns::ColumnMap;
use super::header::{locate_header_row, HeaderLocation};
use super::normalize::normalize_row;
use crate::domain::TradeRecord;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Structural ingestion failures. Per-field defects never end up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("row matrix is empty")]
    EmptyMatrix,

    #[error("no header row found and only {rows} row(s) present; nothing to parse")]
    NoUsableData { rows: usize },
}

/// Result of ingesting one row matrix.
#[derive(Debug, Clone)]
pub struct Ingestion {
    /// Index of the row used as header.
    pub header_index: usize,
    /// True when no header-like row was found and row 0 was used.
    pub header_fallback: bool,
    /// Trimmed header labels, in column order.
    pub headers: Vec<String>,
    /// Admitted records, in input order.
    pub records: Vec<TradeRecord>,
    /// Data rows dropped for having neither symbol nor exit date.
    pub skipped_rows: usize,
}

impl Ingestion {
    pub fn issue_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_issues()).count()
    }
}

/// Rows with neither a symbol nor a date are blank or footer rows.
pub fn is_admissible(record: &TradeRecord) -> bool {
    !record.symbol.is_empty() || !record.exit_date.is_empty()
}

/// Locate the header, resolve columns, and normalize every data row.
///
/// Falls back to row 0 as the header when no header-like row exists, as
/// long as at least one data row follows it.
pub fn ingest_matrix<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Ingestion, IngestError> {
    if rows.is_empty() {
        return Err(IngestError::EmptyMatrix);
    }

    let (header_index, header_fallback) = match locate_header_row(rows) {
        HeaderLocation::Found(i) => (i, false),
        HeaderLocation::NotFound if rows.len() < 2 => {
            return Err(IngestError::NoUsableData { rows: rows.len() });
        }
        HeaderLocation::NotFound => {
            warn!("no header row recognised; treating the first row as header");
            (0, true)
        }
    };

    let header = &rows[header_index];
    let columns = ColumnMap::from_header(header);
    let headers: Vec<String> = header.iter().map(|h| h.as_ref().trim().to_string()).collect();
    debug!(header_index, ?headers, "resolved header row");

    let missing = columns.missing_fields();
    if !missing.is_empty() {
        debug!(?missing, "header lacks columns for some canonical fields");
    }

    let mut records = Vec::with_capacity(rows.len() - header_index - 1);
    let mut skipped_rows = 0;
    for row in &rows[header_index + 1..] {
        let record = normalize_row(row, &columns);
        if is_admissible(&record) {
            records.push(record);
        } else {
            skipped_rows += 1;
        }
    }

    let ingestion = Ingestion {
        header_index,
        header_fallback,
        headers,
        records,
        skipped_rows,
    };
    info!(
        records = ingestion.records.len(),
        skipped = ingestion.skipped_rows,
        with_issues = ingestion.issue_count(),
        "ingested trade log"
    );
    Ok(ingestion)
}
