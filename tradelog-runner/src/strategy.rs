//! Per-strategy statistics and strategy-by-month views.
//!
//! Grouping is by `StrategyLabel` identity: every record whose strategy cell
//! was blank lands in the single `Unknown` group. Groups are exhaustive and
//! disjoint, so trade counts across groups always sum to the input length.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tradelog_core::domain::{StrategyLabel, TradeRecord};

/// Statistics for one strategy group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStat {
    pub strategy: StrategyLabel,
    pub trade_count: usize,
    pub total_pnl: f64,
    pub winners: usize,
    pub losers: usize,
    pub breakeven: usize,
    /// Percent, 0–100.
    pub win_rate: f64,
    pub avg_pnl: f64,
    /// Mean ROI over records whose ROI is defined; `None` when there are none.
    pub avg_roi: Option<f64>,
    pub roi_sample_count: usize,
    pub max_pnl: f64,
    pub min_pnl: f64,
}

/// Aggregate figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_pnl: f64,
    pub trade_count: usize,
    pub winners: usize,
    /// Percent, 0–100.
    pub win_rate: f64,
}

/// One strategy's cumulative P&L on the shared month axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySeries {
    pub strategy: StrategyLabel,
    pub cumulative_pnl: Vec<f64>,
}

/// Cumulative P&L per strategy, aligned to a common ascending month axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCumulative {
    pub months: Vec<String>,
    pub series: Vec<StrategySeries>,
}

/// Group records by strategy, groups in order of first appearance.
pub fn group_by_strategy<'a, I>(records: I) -> Vec<(StrategyLabel, Vec<&'a TradeRecord>)>
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut slots: HashMap<&StrategyLabel, usize> = HashMap::new();
    let mut groups: Vec<(StrategyLabel, Vec<&TradeRecord>)> = Vec::new();
    for rec in records {
        let idx = *slots.entry(&rec.strategy).or_insert_with(|| {
            groups.push((rec.strategy.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(rec);
    }
    groups
}

fn stat_for_group(strategy: StrategyLabel, recs: &[&TradeRecord]) -> StrategyStat {
    let n = recs.len();
    let pnls: Vec<f64> = recs.iter().map(|r| r.pnl_or_zero()).collect();
    let total_pnl: f64 = pnls.iter().sum();
    let winners = recs.iter().filter(|r| r.is_winner()).count();
    let losers = recs.iter().filter(|r| r.is_loser()).count();

    let rois: Vec<f64> = recs.iter().filter_map(|r| r.roi).collect();
    let avg_roi = if rois.is_empty() {
        None
    } else {
        Some(rois.iter().sum::<f64>() / rois.len() as f64)
    };

    let (win_rate, avg_pnl) = if n == 0 {
        (0.0, 0.0)
    } else {
        (winners as f64 / n as f64 * 100.0, total_pnl / n as f64)
    };

    StrategyStat {
        strategy,
        trade_count: n,
        total_pnl,
        winners,
        losers,
        breakeven: n - winners - losers,
        win_rate,
        avg_pnl,
        avg_roi,
        roi_sample_count: rois.len(),
        max_pnl: pnls.iter().copied().reduce(f64::max).unwrap_or(0.0),
        min_pnl: pnls.iter().copied().reduce(f64::min).unwrap_or(0.0),
    }
}

/// Per-strategy statistics, ordered by descending total P&L.
///
/// Ties keep first-appearance order.
pub fn strategy_stats(records: &[TradeRecord]) -> Vec<StrategyStat> {
    stats_from_groups(group_by_strategy(records))
}

fn stats_from_groups(groups: Vec<(StrategyLabel, Vec<&TradeRecord>)>) -> Vec<StrategyStat> {
    let mut stats: Vec<StrategyStat> = groups
        .into_iter()
        .map(|(label, recs)| stat_for_group(label, &recs))
        .collect();
    stats.sort_by(|a, b| b.total_pnl.total_cmp(&a.total_pnl));
    stats
}

/// Strategy statistics restricted to records exiting in `month` (`YYYY-MM`).
pub fn strategy_stats_for_month(records: &[TradeRecord], month: &str) -> Vec<StrategyStat> {
    let in_month = records
        .iter()
        .filter(|r| r.exit_month().as_deref() == Some(month));
    stats_from_groups(group_by_strategy(in_month))
}

/// Totals for records exiting in `month` (`YYYY-MM`).
pub fn month_summary(records: &[TradeRecord], month: &str) -> MonthSummary {
    let recs: Vec<&TradeRecord> = records
        .iter()
        .filter(|r| r.exit_month().as_deref() == Some(month))
        .collect();
    let winners = recs.iter().filter(|r| r.is_winner()).count();
    MonthSummary {
        month: month.to_string(),
        total_pnl: recs.iter().map(|r| r.pnl_or_zero()).sum(),
        trade_count: recs.len(),
        winners,
        win_rate: if recs.is_empty() {
            0.0
        } else {
            winners as f64 / recs.len() as f64 * 100.0
        },
    }
}

/// Cumulative P&L per strategy over every month that has any dated trade.
///
/// A strategy with no trades in a month carries its previous total
/// forward. Records without a normalized exit date are excluded.
pub fn strategy_cumulative_by_month(records: &[TradeRecord]) -> StrategyCumulative {
    let dated: Vec<(String, &TradeRecord)> = records
        .iter()
        .filter_map(|r| r.exit_month().map(|m| (m, r)))
        .collect();

    let months: Vec<String> = dated
        .iter()
        .map(|(m, _)| m.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let month_index: HashMap<&str, usize> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (m.as_str(), i))
        .collect();

    let series = group_by_strategy(dated.iter().map(|(_, r)| *r))
        .into_iter()
        .map(|(strategy, recs)| {
            let mut per_month = vec![0.0; months.len()];
            for rec in recs {
                if let Some(&i) = rec.exit_month().as_deref().and_then(|m| month_index.get(m)) {
                    per_month[i] += rec.pnl_or_zero();
                }
            }
            let mut running = 0.0;
            let cumulative_pnl = per_month
                .into_iter()
                .map(|p| {
                    running += p;
                    running
                })
                .collect();
            StrategySeries {
                strategy,
                cumulative_pnl,
            }
        })
        .collect();

    StrategyCumulative { months, series }
}
