//! StrategyLabel: the grouping key for per-strategy statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy label, canonicalized once at normalization time.
///
/// Blank labels collapse to `Unknown`. A sheet that literally says
/// "Unknown" stays `Named`, so the two are separate groups that happen
/// to display the same.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(untagged)]
pub enum StrategyLabel {
    Named(String),
    #[default]
    Unknown,
}

impl StrategyLabel {
    /// Canonicalize a raw cell: trim, and map blank to `Unknown`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            StrategyLabel::Unknown
        } else {
            StrategyLabel::Named(trimmed.to_string())
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            StrategyLabel::Named(name) => name,
            StrategyLabel::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StrategyLabel::Unknown)
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for StrategyLabel {
    fn from(raw: &str) -> Self {
        StrategyLabel::from_raw(raw)
    }
}
