//! TradeRecord: one canonical, normalized options trade.

use super::field::FieldValue;
use super::issue::Issue;
use super::strategy::StrategyLabel;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical date format carried on records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A canonical trade record produced from one raw row.
///
/// Never mutated after construction. `roi` is `Some` exactly when `issues`
/// is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    // ── Dates ──
    /// Exit date as `YYYY-MM-DD`, the raw text if unparseable, or empty.
    pub exit_date: String,
    /// Open date, same conventions. Informational only.
    pub open_date: String,

    // ── Identification ──
    pub symbol: String,
    pub side: String,
    pub strategy: StrategyLabel,

    // ── Size and outcome ──
    pub quantity: FieldValue<i64>,
    pub pnl: FieldValue<f64>,
    pub max_risk: FieldValue<f64>,

    // ── Derived ──
    /// `pnl / max_risk * 100`.
    pub roi: Option<f64>,
    pub issues: Vec<Issue>,

    /// Header label → cell text, kept for auditing only.
    pub raw_fields: BTreeMap<String, String>,
}

impl TradeRecord {
    /// P&L with absence degraded to zero.
    pub fn pnl_or_zero(&self) -> f64 {
        self.pnl.value().unwrap_or(0.0)
    }

    /// Max risk with absence degraded to zero.
    pub fn max_risk_or_zero(&self) -> f64 {
        self.max_risk.value().unwrap_or(0.0)
    }

    pub fn is_winner(&self) -> bool {
        self.pnl_or_zero() > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.pnl_or_zero() < 0.0
    }

    pub fn is_breakeven(&self) -> bool {
        self.pnl_or_zero() == 0.0
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// True if a numeric cell held text rather than being blank.
    pub fn has_invalid_numbers(&self) -> bool {
        self.pnl.is_invalid() || self.max_risk.is_invalid() || self.quantity.is_invalid()
    }

    /// Exit date as a calendar day, if it was normalized.
    pub fn exit_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.exit_date, DATE_FORMAT).ok()
    }

    /// Open date as a calendar day, if it was normalized.
    pub fn open_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.open_date, DATE_FORMAT).ok()
    }

    /// `YYYY-MM` bucket key of the exit date.
    pub fn exit_month(&self) -> Option<String> {
        self.exit_day().map(|d| d.format("%Y-%m").to_string())
    }

    /// Calendar year of the exit date.
    pub fn exit_year(&self) -> Option<i32> {
        self.exit_day().map(|d| d.year())
    }

    /// Holding period in calendar days, when both dates parsed.
    pub fn days_held(&self) -> Option<i64> {
        Some((self.exit_day()? - self.open_day()?).num_days())
    }
}
