//! Data-quality view: which records carry defects, and how many of each kind.

use serde::{Deserialize, Serialize};
use tradelog_core::domain::{Issue, TradeRecord};

/// Counts of per-record defects.
///
/// A record may count toward several kinds at once. `unparsed_exit_dates`
/// covers non-blank exit dates that did not normalize to `YYYY-MM-DD`;
/// those records are excluded from every time-bucketed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub total_records: usize,
    pub flagged: usize,
    pub missing_pnl: usize,
    pub missing_max_risk: usize,
    pub invalid_numbers: usize,
    pub unparsed_exit_dates: usize,
}

/// Records with at least one issue flag, in input order.
pub fn issue_records(records: &[TradeRecord]) -> Vec<&TradeRecord> {
    records.iter().filter(|r| r.has_issues()).collect()
}

/// True when the exit date is present but did not normalize.
pub fn has_unparsed_exit_date(record: &TradeRecord) -> bool {
    !record.exit_date.is_empty() && record.exit_day().is_none()
}

pub fn summarize_issues(records: &[TradeRecord]) -> IssueSummary {
    let mut summary = IssueSummary {
        total_records: records.len(),
        ..IssueSummary::default()
    };
    for rec in records {
        if rec.has_issues() {
            summary.flagged += 1;
        }
        if rec.issues.contains(&Issue::MissingPnl) {
            summary.missing_pnl += 1;
        }
        if rec.issues.contains(&Issue::MissingMaxRisk) {
            summary.missing_max_risk += 1;
        }
        if rec.has_invalid_numbers() {
            summary.invalid_numbers += 1;
        }
        if has_unparsed_exit_date(rec) {
            summary.unparsed_exit_dates += 1;
        }
    }
    summary
}
