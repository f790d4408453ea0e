//! Trade-log loading with source fallback.
//!
//! Sources are tried in order (remote sheet export first when configured,
//! then each local CSV candidate):
//! 1. Fetch the raw row matrix
//! 2. Ingest it into canonical records
//! 3. The first source that yields at least one record wins
//! 4. If every source fails → `AllSourcesFailed` with each source's reason

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use tradelog_core::fingerprint::dataset_hash;
use tradelog_core::ingest::{ingest_matrix, IngestError, Ingestion};
use tradelog_core::source::{CsvFileSource, RowSource, SheetExportSource, SourceError};

use crate::config::SourceConfig;

/// Why a single source was passed over.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Fetch(#[from] SourceError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("no trade records after ingestion")]
    NoRecords,
}

#[derive(Debug)]
pub struct SourceAttempt {
    pub source_name: String,
    pub error: AttemptError,
}

impl fmt::Display for SourceAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_name, self.error)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no trade-log source configured (set a sheet id or a local CSV path)")]
    NoSources,

    #[error("all {} sources failed: {}", attempts.len(), join_attempts(attempts))]
    AllSourcesFailed { attempts: Vec<SourceAttempt> },
}

fn join_attempts(attempts: &[SourceAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A successfully loaded trade log with provenance.
#[derive(Debug, Clone)]
pub struct LoadedTrades {
    /// Name of the source that supplied the rows.
    pub source_name: String,
    /// BLAKE3 over the raw row matrix.
    pub dataset_hash: String,
    pub ingestion: Ingestion,
}

fn try_source(source: &dyn RowSource) -> Result<LoadedTrades, AttemptError> {
    let rows = source.fetch_rows()?;
    let hash = dataset_hash(&rows);
    let ingestion = ingest_matrix(&rows)?;
    if ingestion.records.is_empty() {
        return Err(AttemptError::NoRecords);
    }
    Ok(LoadedTrades {
        source_name: source.name(),
        dataset_hash: hash,
        ingestion,
    })
}

/// Load from the first source that produces records.
pub fn load_trades(sources: &[&dyn RowSource]) -> Result<LoadedTrades, LoadError> {
    if sources.is_empty() {
        return Err(LoadError::NoSources);
    }

    let mut attempts = Vec::new();
    for source in sources {
        let name = source.name();
        debug!(source = %name, "trying source");
        match try_source(*source) {
            Ok(loaded) => {
                info!(
                    source = %name,
                    records = loaded.ingestion.records.len(),
                    fallbacks = attempts.len(),
                    "trade log loaded"
                );
                return Ok(loaded);
            }
            Err(error) => {
                warn!(source = %name, %error, "source failed, trying next");
                attempts.push(SourceAttempt {
                    source_name: name,
                    error,
                });
            }
        }
    }

    Err(LoadError::AllSourcesFailed { attempts })
}

/// Build the ordered source list: sheet export first, then local paths.
pub fn build_sources(config: &SourceConfig) -> Vec<Box<dyn RowSource>> {
    let mut sources: Vec<Box<dyn RowSource>> = Vec::new();
    if let Some(id) = config.sheet_id() {
        sources.push(Box::new(
            SheetExportSource::new(id, config.gid.trim())
                .with_timeout(Duration::from_secs(config.timeout_secs)),
        ));
    }
    for path in &config.local_paths {
        sources.push(Box::new(CsvFileSource::new(path.clone())));
    }
    sources
}

/// `build_sources` followed by `load_trades`.
pub fn load_from_config(config: &SourceConfig) -> Result<LoadedTrades, LoadError> {
    let owned = build_sources(config);
    let sources: Vec<&dyn RowSource> = owned.iter().map(|s| s.as_ref()).collect();
    load_trades(&sources)
}
