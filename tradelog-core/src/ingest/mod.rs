//! Trade-log ingestion: header detection, column resolution, row normalization

pub mod columns;
pub mod dates;
pub mod header;
pub mod normalize;
pub mod pipeline;

pub use columns::{CanonicalField, ColumnMap};
pub use dates::{normalize_date, parse_calendar_date};
pub use header::{is_header_row, locate_header_row, HeaderLocation};
pub use normalize::{build_record, compute_roi, detect_issues, normalize_row, RecordParts};
pub use pipeline::{ingest_matrix, is_admissible, IngestError, Ingestion};
