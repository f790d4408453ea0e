//! Remote spreadsheet export source.
//!
//! Fetches a publicly shared Google Sheet tab through its CSV export
//! endpoint and parses it with the same CSV path as local files.

use super::csv_file::parse_csv_text;
use super::{RowMatrix, RowSource, SourceError};
use std::time::Duration;
use tracing::debug;

const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// A spreadsheet tab exported as CSV over HTTP.
#[derive(Debug, Clone)]
pub struct SheetExportSource {
    sheet_id: String,
    gid: String,
    timeout: Duration,
}

impl SheetExportSource {
    pub fn new(sheet_id: impl Into<String>, gid: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            gid: gid.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// CSV export URL for this sheet tab.
    pub fn export_url(&self) -> String {
        format!(
            "{EXPORT_BASE}/{}/export?format=csv&gid={}",
            self.sheet_id, self.gid
        )
    }
}

impl RowSource for SheetExportSource {
    fn name(&self) -> String {
        format!("sheet:{}#gid={}", self.sheet_id, self.gid)
    }

    fn fetch_rows(&self) -> Result<RowMatrix, SourceError> {
        let url = self.export_url();
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!(%url, "fetching sheet export");
        let resp = client
            .get(&url)
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp
            .text()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(SourceError::EmptyResponse);
        }

        let rows = parse_csv_text(&body)?;
        if rows.is_empty() {
            return Err(SourceError::EmptyResponse);
        }
        debug!(rows = rows.len(), "parsed sheet export");
        Ok(rows)
    }
}
