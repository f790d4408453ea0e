//! Rolling per-strategy win rate, indexed by trade rather than by calendar.

use crate::strategy::group_by_strategy;
use serde::{Deserialize, Serialize};
use tradelog_core::domain::{StrategyLabel, TradeRecord};

/// Trailing window used when the caller does not pick one.
pub const DEFAULT_ROLLING_WINDOW: usize = 10;

/// Win-rate percentages for one strategy, one entry per trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingWinRate {
    pub strategy: StrategyLabel,
    pub win_rates: Vec<f64>,
}

/// All strategies on a shared trade-index axis.
///
/// `labels[i]` is `"Trade {i+1}"`. A strategy with fewer trades than the
/// longest series is padded with `None`, never interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRolling {
    pub labels: Vec<String>,
    pub rows: Vec<(StrategyLabel, Vec<Option<f64>>)>,
}

/// Rolling win rate per strategy.
///
/// Each strategy's trades are stably sorted by exit date string; position
/// `i` reports the win percentage over the trailing `window` trades ending
/// at `i`, shrinking near the start. A window of 0 is treated as 1.
pub fn rolling_win_rate(records: &[TradeRecord], window: usize) -> Vec<RollingWinRate> {
    let window = window.max(1);

    group_by_strategy(records)
        .into_iter()
        .map(|(strategy, mut recs)| {
            recs.sort_by(|a, b| a.exit_date.cmp(&b.exit_date));
            let wins: Vec<bool> = recs.iter().map(|r| r.is_winner()).collect();

            let mut in_window = 0usize;
            let win_rates = (0..wins.len())
                .map(|i| {
                    if wins[i] {
                        in_window += 1;
                    }
                    if i >= window && wins[i - window] {
                        in_window -= 1;
                    }
                    let span = (i + 1).min(window);
                    in_window as f64 / span as f64 * 100.0
                })
                .collect();

            RollingWinRate {
                strategy,
                win_rates,
            }
        })
        .collect()
}

/// Align rolling series onto a shared `Trade 1..N` axis.
pub fn align_rolling(series: &[RollingWinRate]) -> AlignedRolling {
    let longest = series.iter().map(|s| s.win_rates.len()).max().unwrap_or(0);
    let labels = (1..=longest).map(|i| format!("Trade {i}")).collect();
    let rows = series
        .iter()
        .map(|s| {
            let mut padded: Vec<Option<f64>> = s.win_rates.iter().copied().map(Some).collect();
            padded.resize(longest, None);
            (s.strategy.clone(), padded)
        })
        .collect();
    AlignedRolling { labels, rows }
}
