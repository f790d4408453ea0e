//! Headline figures over a record set.

use serde::{Deserialize, Serialize};
use tradelog_core::domain::TradeRecord;

/// Portfolio-level KPIs.
///
/// `win_rate` is a fraction in `[0, 1]`. `roi` is total P&L over total
/// max risk, or `0.0` when total max risk is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_pnl: f64,
    pub trade_count: usize,
    pub winners: usize,
    pub losers: usize,
    pub breakeven: usize,
    pub win_rate: f64,
    pub total_max_risk: f64,
    pub roi: f64,
}

impl KpiSet {
    pub fn empty() -> Self {
        Self {
            total_pnl: 0.0,
            trade_count: 0,
            winners: 0,
            losers: 0,
            breakeven: 0,
            win_rate: 0.0,
            total_max_risk: 0.0,
            roi: 0.0,
        }
    }
}

/// Compute KPIs over every record, dated or not. Absent numbers count as zero.
pub fn compute_kpis(records: &[TradeRecord]) -> KpiSet {
    if records.is_empty() {
        return KpiSet::empty();
    }

    let total_pnl: f64 = records.iter().map(TradeRecord::pnl_or_zero).sum();
    let total_max_risk: f64 = records.iter().map(TradeRecord::max_risk_or_zero).sum();
    let winners = records.iter().filter(|r| r.is_winner()).count();
    let losers = records.iter().filter(|r| r.is_loser()).count();
    let breakeven = records.len() - winners - losers;

    KpiSet {
        total_pnl,
        trade_count: records.len(),
        winners,
        losers,
        breakeven,
        win_rate: winners as f64 / records.len() as f64,
        total_max_risk,
        roi: if total_max_risk > 0.0 {
            total_pnl / total_max_risk
        } else {
            0.0
        },
    }
}
