//! Time-bucketed views: pure functions over a record slice.
//!
//! Records whose exit date did not normalize to `YYYY-MM-DD` are left out
//! of every view in this module. Absent P&L counts as zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tradelog_core::domain::TradeRecord;

/// P&L and trade count for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// `YYYY-MM`
    pub month: String,
    pub pnl: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeMonthlyPoint {
    pub month: String,
    pub cumulative_pnl: f64,
}

/// P&L and trade count for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBucket {
    pub year: i32,
    pub pnl: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeYearlyPoint {
    pub year: i32,
    pub cumulative_pnl: f64,
}

/// Per-month performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: String,
    pub trade_count: usize,
    pub total_pnl: f64,
    /// Percent, 0–100.
    pub win_rate: f64,
    pub avg_pnl: f64,
}

/// Group records by a date-derived key, ascending.
fn bucket_by<K: Ord>(
    records: &[TradeRecord],
    key: impl Fn(&TradeRecord) -> Option<K>,
) -> BTreeMap<K, Vec<&TradeRecord>> {
    let mut map: BTreeMap<K, Vec<&TradeRecord>> = BTreeMap::new();
    for rec in records {
        if let Some(k) = key(rec) {
            map.entry(k).or_default().push(rec);
        }
    }
    map
}

fn total_pnl(records: &[&TradeRecord]) -> f64 {
    records.iter().map(|r| r.pnl_or_zero()).sum()
}

/// Monthly P&L buckets, ascending by month.
pub fn aggregate_monthly(records: &[TradeRecord]) -> Vec<MonthlyBucket> {
    bucket_by(records, TradeRecord::exit_month)
        .into_iter()
        .map(|(month, recs)| MonthlyBucket {
            month,
            pnl: total_pnl(&recs),
            trade_count: recs.len(),
        })
        .collect()
}

/// Running P&L total at the end of each month.
pub fn cumulative_monthly(records: &[TradeRecord]) -> Vec<CumulativeMonthlyPoint> {
    let mut running = 0.0;
    aggregate_monthly(records)
        .into_iter()
        .map(|b| {
            running += b.pnl;
            CumulativeMonthlyPoint {
                month: b.month,
                cumulative_pnl: running,
            }
        })
        .collect()
}

/// Yearly P&L buckets, ascending by year.
pub fn aggregate_yearly(records: &[TradeRecord]) -> Vec<YearlyBucket> {
    bucket_by(records, TradeRecord::exit_year)
        .into_iter()
        .map(|(year, recs)| YearlyBucket {
            year,
            pnl: total_pnl(&recs),
            trade_count: recs.len(),
        })
        .collect()
}

/// Running P&L total at the end of each year.
pub fn cumulative_yearly(records: &[TradeRecord]) -> Vec<CumulativeYearlyPoint> {
    let mut running = 0.0;
    aggregate_yearly(records)
        .into_iter()
        .map(|b| {
            running += b.pnl;
            CumulativeYearlyPoint {
                year: b.year,
                cumulative_pnl: running,
            }
        })
        .collect()
}

/// Per-month win rate and average P&L, newest month first.
pub fn monthly_stats(records: &[TradeRecord]) -> Vec<MonthlyStat> {
    bucket_by(records, TradeRecord::exit_month)
        .into_iter()
        .rev()
        .map(|(month, recs)| {
            let total = total_pnl(&recs);
            let winners = recs.iter().filter(|r| r.is_winner()).count();
            let n = recs.len() as f64;
            MonthlyStat {
                month,
                trade_count: recs.len(),
                total_pnl: total,
                win_rate: winners as f64 / n * 100.0,
                avg_pnl: total / n,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradelog_core::domain::FieldValue;
    use tradelog_core::ingest::{build_record, RecordParts};

    fn trade(exit: &str, pnl: Option<f64>) -> TradeRecord {
        build_record(RecordParts {
            exit_date: exit.into(),
            symbol: "SPY".into(),
            pnl: pnl.into(),
            max_risk: FieldValue::Present(100.0),
            ..Default::default()
        })
    }

    #[test]
    fn buckets_are_ascending_and_skip_bad_dates() {
        let recs = vec![
            trade("2024-03-02", Some(10.0)),
            trade("2024-01-05", Some(100.0)),
            trade("garbage", Some(999.0)),
            trade("", Some(5.0)),
            trade("2024-01-20", Some(-50.0)),
        ];
        let monthly = aggregate_monthly(&recs);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, "2024-01");
        assert_eq!(monthly[0].pnl, 50.0);
        assert_eq!(monthly[0].trade_count, 2);
        assert_eq!(monthly[1].month, "2024-03");
    }

    #[test]
    fn absent_pnl_counts_as_zero() {
        let recs = vec![trade("2024-01-05", None), trade("2024-01-06", Some(20.0))];
        let monthly = aggregate_monthly(&recs);
        assert_eq!(monthly[0].pnl, 20.0);
        assert_eq!(monthly[0].trade_count, 2);
    }

    #[test]
    fn cumulative_monthly_running_sum() {
        let recs = vec![
            trade("2024-01-05", Some(100.0)),
            trade("2024-02-05", Some(-30.0)),
            trade("2024-04-05", Some(5.0)),
        ];
        let cum = cumulative_monthly(&recs);
        let values: Vec<f64> = cum.iter().map(|p| p.cumulative_pnl).collect();
        assert_eq!(values, vec![100.0, 70.0, 75.0]);
        assert_eq!(cum[2].month, "2024-04");
    }

    #[test]
    fn yearly_views() {
        let recs = vec![
            trade("2023-12-30", Some(40.0)),
            trade("2024-01-02", Some(10.0)),
            trade("2024-06-02", Some(-20.0)),
        ];
        let yearly = aggregate_yearly(&recs);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[1].year, 2024);
        assert_eq!(yearly[1].pnl, -10.0);
        assert_eq!(yearly[1].trade_count, 2);

        let cum = cumulative_yearly(&recs);
        assert_eq!(cum[0].cumulative_pnl, 40.0);
        assert_eq!(cum[1].cumulative_pnl, 30.0);
    }

    #[test]
    fn monthly_stats_newest_first() {
        let recs = vec![
            trade("2024-01-05", Some(100.0)),
            trade("2024-01-20", Some(-50.0)),
            trade("2024-02-01", Some(30.0)),
        ];
        let stats = monthly_stats(&recs);
        assert_eq!(stats[0].month, "2024-02");
        assert_eq!(stats[1].month, "2024-01");
        assert_eq!(stats[1].win_rate, 50.0);
        assert_eq!(stats[1].avg_pnl, 25.0);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        assert!(aggregate_monthly(&[]).is_empty());
        assert!(cumulative_yearly(&[]).is_empty());
        assert!(monthly_stats(&[]).is_empty());
    }
}
