//! Row Normalizer: one raw row plus the column map in, one TradeRecord out.
//!
//! Steps per row:
//! 1. Resolve each canonical field through its aliases (missing → "").
//! 2. Coerce numeric fields into tagged `FieldValue`s.
//! 3. Normalize both dates to `YYYY-MM-DD`, keeping unparseable text.
//! 4. Flag data-quality issues.
//! 5. Derive ROI only for issue-free rows.

use super::columns::{CanonicalField, ColumnMap};
use super::dates::normalize_date;
use crate::domain::{
    parse_number, parse_quantity, FieldValue, Issue, StrategyLabel, TradeRecord,
};
use std::collections::BTreeMap;

/// Resolved, typed field values before issue detection and ROI derivation.
#[derive(Debug, Clone, Default)]
pub struct RecordParts {
    pub exit_date: String,
    pub open_date: String,
    pub symbol: String,
    pub side: String,
    pub strategy: String,
    pub quantity: FieldValue<i64>,
    pub pnl: FieldValue<f64>,
    pub max_risk: FieldValue<f64>,
    pub raw_fields: BTreeMap<String, String>,
}

/// Issue flags for a pair of numeric fields, in a fixed order.
pub fn detect_issues(pnl: &FieldValue<f64>, max_risk: &FieldValue<f64>) -> Vec<Issue> {
    let mut issues = Vec::new();
    if pnl.value().is_none() {
        issues.push(Issue::MissingPnl);
    }
    match max_risk {
        FieldValue::Present(v) if *v != 0.0 => {}
        _ => issues.push(Issue::MissingMaxRisk),
    }
    issues
}

/// ROI as a percentage, or `None` when either input is unusable.
pub fn compute_roi(pnl: &FieldValue<f64>, max_risk: &FieldValue<f64>) -> Option<f64> {
    match (pnl, max_risk) {
        (FieldValue::Present(p), FieldValue::Present(m)) if *m != 0.0 => Some(p / m * 100.0),
        _ => None,
    }
}

/// Finish a record: canonicalize the strategy label, flag issues, derive ROI.
pub fn build_record(parts: RecordParts) -> TradeRecord {
    let issues = detect_issues(&parts.pnl, &parts.max_risk);
    let roi = if issues.is_empty() {
        compute_roi(&parts.pnl, &parts.max_risk)
    } else {
        None
    };

    TradeRecord {
        exit_date: parts.exit_date,
        open_date: parts.open_date,
        symbol: parts.symbol,
        side: parts.side,
        strategy: StrategyLabel::from_raw(&parts.strategy),
        quantity: parts.quantity,
        pnl: parts.pnl,
        max_risk: parts.max_risk,
        roi,
        issues,
        raw_fields: parts.raw_fields,
    }
}

/// Normalize one raw row against the resolved header.
pub fn normalize_row<S: AsRef<str>>(row: &[S], columns: &ColumnMap) -> TradeRecord {
    let field = |f: CanonicalField| columns.resolve(row, f);

    build_record(RecordParts {
        exit_date: normalize_date(field(CanonicalField::ExitDate)),
        open_date: normalize_date(field(CanonicalField::OpenDate)),
        symbol: field(CanonicalField::Symbol).trim().to_string(),
        side: field(CanonicalField::Side).trim().to_string(),
        strategy: field(CanonicalField::Strategy).to_string(),
        quantity: parse_quantity(field(CanonicalField::Quantity)),
        pnl: parse_number(field(CanonicalField::Pnl)),
        max_risk: parse_number(field(CanonicalField::MaxRisk)),
        raw_fields: columns.raw_fields(row),
    })
}
