//! Tradelog Runner: aggregation engine, scopes, source loading, reports.
//!
//! This crate builds on `tradelog-core` to provide:
//! - Monthly, yearly and cumulative P&L views
//! - Portfolio KPIs and per-strategy statistics
//! - Rolling per-strategy win rate on a trade-index axis
//! - All / year / month scope filtering
//! - Source fallback loading (remote sheet, then local CSV candidates)
//! - TOML run configuration
//! - JSON / CSV / Markdown export
//!
//! Every aggregation is a pure function over `&[TradeRecord]` and never
//! fails: empty input yields empty or zero-valued output.

pub mod config;
pub mod data_loader;
pub mod export;
pub mod issues;
pub mod kpi;
pub mod monthly;
pub mod report;
pub mod rolling;
pub mod scope;
pub mod strategy;

pub use config::{AnalysisConfig, ConfigError, RunConfig, SourceConfig};
pub use data_loader::{
    build_sources, load_from_config, load_trades, AttemptError, LoadError, LoadedTrades,
    SourceAttempt,
};
pub use issues::{issue_records, summarize_issues, IssueSummary};
pub use kpi::{compute_kpis, KpiSet};
pub use monthly::{
    aggregate_monthly, aggregate_yearly, cumulative_monthly, cumulative_yearly, monthly_stats,
    CumulativeMonthlyPoint, CumulativeYearlyPoint, MonthlyBucket, MonthlyStat, YearlyBucket,
};
pub use report::{AnalysisReport, SCHEMA_VERSION};
pub use rolling::{align_rolling, rolling_win_rate, AlignedRolling, RollingWinRate, DEFAULT_ROLLING_WINDOW};
pub use scope::{
    available_months, available_years, filter_scope, latest_month, latest_year, Scope,
    ScopeParseError,
};
pub use strategy::{
    month_summary, strategy_cumulative_by_month, strategy_stats, strategy_stats_for_month,
    MonthSummary, StrategyCumulative, StrategySeries, StrategyStat,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn report_is_send_sync() {
        assert_send::<AnalysisReport>();
        assert_sync::<AnalysisReport>();
    }

    #[test]
    fn aggregation_outputs_are_send_sync() {
        assert_send::<KpiSet>();
        assert_sync::<KpiSet>();
        assert_send::<StrategyStat>();
        assert_sync::<StrategyStat>();
        assert_send::<RollingWinRate>();
        assert_sync::<RollingWinRate>();
        assert_send::<MonthlyBucket>();
        assert_sync::<MonthlyBucket>();
    }

    #[test]
    fn loader_types_are_send_sync() {
        assert_send::<LoadedTrades>();
        assert_sync::<LoadedTrades>();
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
        assert_send::<Scope>();
        assert_sync::<Scope>();
    }
}
