//! Data-quality flags attached to trade records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named data-quality defect on one record.
///
/// Flags never exclude a record on their own; they only suppress ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Issue {
    /// P&L cell blank, missing, or not numeric.
    #[serde(rename = "Missing PnL")]
    MissingPnl,
    /// Max-risk cell blank, missing, not numeric, or zero.
    #[serde(rename = "Missing Max risk")]
    MissingMaxRisk,
}

impl Issue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::MissingPnl => "Missing PnL",
            Issue::MissingMaxRisk => "Missing Max risk",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
