//! Dataset fingerprinting: a stable identity for the raw row matrix a run
//! was computed from.

use crate::source::RowMatrix;

/// BLAKE3 over every cell, with row and cell separators so that
/// `[["ab"]]` and `[["a","b"]]` hash differently.
pub fn dataset_hash(rows: &RowMatrix) -> String {
    let mut hasher = blake3::Hasher::new();
    for row in rows {
        for cell in row {
            hasher.update(&(cell.len() as u64).to_le_bytes());
            hasher.update(cell.as_bytes());
        }
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}
