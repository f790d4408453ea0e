//! AnalysisReport: every aggregation for one scope, bundled for export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tradelog_core::domain::TradeRecord;

use crate::data_loader::LoadedTrades;
use crate::issues::{summarize_issues, IssueSummary};
use crate::kpi::{compute_kpis, KpiSet};
use crate::monthly::{
    aggregate_monthly, aggregate_yearly, cumulative_monthly, cumulative_yearly, monthly_stats,
    CumulativeMonthlyPoint, CumulativeYearlyPoint, MonthlyBucket, MonthlyStat, YearlyBucket,
};
use crate::rolling::{rolling_win_rate, RollingWinRate};
use crate::scope::{filter_scope, Scope};
use crate::strategy::{strategy_cumulative_by_month, strategy_stats, StrategyCumulative, StrategyStat};

/// Current report schema version. Bump when the layout changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,

    // ── Provenance ──
    pub source_name: String,
    pub dataset_hash: String,
    pub header_fallback: bool,
    pub skipped_rows: usize,

    // ── Parameters ──
    pub scope: Scope,
    pub rolling_window: usize,
    /// Records inside the scope.
    pub record_count: usize,

    // ── Aggregations ──
    pub kpis: KpiSet,
    pub monthly: Vec<MonthlyBucket>,
    pub cumulative_monthly: Vec<CumulativeMonthlyPoint>,
    pub yearly: Vec<YearlyBucket>,
    pub cumulative_yearly: Vec<CumulativeYearlyPoint>,
    pub monthly_stats: Vec<MonthlyStat>,
    pub strategies: Vec<StrategyStat>,
    pub strategy_cumulative: StrategyCumulative,
    pub rolling: Vec<RollingWinRate>,
    pub issues: IssueSummary,
}

impl AnalysisReport {
    /// Compute every view over the records of `loaded` that fall in `scope`.
    pub fn build(loaded: &LoadedTrades, scope: Scope, rolling_window: usize) -> Self {
        let records = filter_scope(&loaded.ingestion.records, scope);
        Self::from_records(loaded, &records, scope, rolling_window)
    }

    fn from_records(
        loaded: &LoadedTrades,
        records: &[TradeRecord],
        scope: Scope,
        rolling_window: usize,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source_name: loaded.source_name.clone(),
            dataset_hash: loaded.dataset_hash.clone(),
            header_fallback: loaded.ingestion.header_fallback,
            skipped_rows: loaded.ingestion.skipped_rows,
            scope,
            rolling_window,
            record_count: records.len(),
            kpis: compute_kpis(records),
            monthly: aggregate_monthly(records),
            cumulative_monthly: cumulative_monthly(records),
            yearly: aggregate_yearly(records),
            cumulative_yearly: cumulative_yearly(records),
            monthly_stats: monthly_stats(records),
            strategies: strategy_stats(records),
            strategy_cumulative: strategy_cumulative_by_month(records),
            rolling: rolling_win_rate(records, rolling_window),
            issues: summarize_issues(records),
        }
    }
}
