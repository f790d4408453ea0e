//! Tradelog Core: domain types, ingestion pipeline, raw-matrix sources.
//!
//! This crate turns an arbitrary spreadsheet export into canonical trades:
//! - Domain types (trade records, tagged field values, issue flags, strategy labels)
//! - Header Locator: finds the header row below any narrative preamble
//! - Column Resolver: maps label variants onto canonical fields
//! - Row Normalizer: coercion, date normalization, issue flags, ROI
//! - Row sources: local CSV, remote sheet export, in-memory matrix
//! - Dataset fingerprinting

pub mod domain;
pub mod fingerprint;
pub mod ingest;
pub mod source;

pub use domain::{FieldValue, Issue, StrategyLabel, TradeRecord};
pub use ingest::{ingest_matrix, IngestError, Ingestion};
pub use source::{CsvFileSource, MemorySource, RowMatrix, RowSource, SheetExportSource, SourceError};
