//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for an analysis run:
//! - **JSON**: full round-trip serialization of `AnalysisReport` with schema versioning
//! - **CSV**: the canonical record tape for spreadsheets and external tools
//! - **Markdown**: a human-readable summary report
//!
//! Persisted reports carry a `schema_version` field. Newer versions are
//! rejected on load.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tradelog_core::domain::{FieldValue, TradeRecord};

use crate::report::{AnalysisReport, SCHEMA_VERSION};
use crate::rolling::align_rolling;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Cell text for a tagged field: the number, blank, or the rejected raw text.
fn field_text<T: Display>(field: &FieldValue<T>) -> String {
    match field {
        FieldValue::Present(v) => v.to_string(),
        FieldValue::Absent => String::new(),
        FieldValue::Invalid(raw) => raw.clone(),
    }
}

/// Export canonical records as CSV.
///
/// Columns: exit_date, open_date, symbol, side, strategy, quantity, pnl,
/// max_risk, roi, issues. Issues are joined with `"; "`.
pub fn export_records_csv(records: &[TradeRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "exit_date",
        "open_date",
        "symbol",
        "side",
        "strategy",
        "quantity",
        "pnl",
        "max_risk",
        "roi",
        "issues",
    ])?;

    for r in records {
        let issues: Vec<&str> = r.issues.iter().map(|i| i.as_str()).collect();
        wtr.write_record([
            r.exit_date.as_str(),
            r.open_date.as_str(),
            r.symbol.as_str(),
            r.side.as_str(),
            r.strategy.name(),
            field_text(&r.quantity).as_str(),
            field_text(&r.pnl).as_str(),
            field_text(&r.max_risk).as_str(),
            r.roi.map(|v| format!("{v:.4}")).unwrap_or_default().as_str(),
            issues.join("; ").as_str(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis run.
///
/// Creates a directory named `tradelog_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json`: the full `AnalysisReport`
/// - `records.csv`: canonical record tape
/// - `report.md`: Markdown summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(
    report: &AnalysisReport,
    records: &[TradeRecord],
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "tradelog_{}",
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("report.json"), &json)?;

    let records_csv = export_records_csv(records)?;
    std::fs::write(run_dir.join("records.csv"), &records_csv)?;

    std::fs::write(run_dir.join("report.md"), generate_report(report))?;

    Ok(run_dir)
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for one analysis run.
pub fn generate_report(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(4096);

    md.push_str("# Trade Log Report\n\n");

    // Metadata
    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Source | {} |\n", report.source_name));
    md.push_str(&format!("| Scope | {} |\n", report.scope));
    md.push_str(&format!("| Records | {} |\n", report.record_count));
    md.push_str(&format!("| Skipped Rows | {} |\n", report.skipped_rows));
    md.push_str(&format!("| Dataset Hash | {} |\n", report.dataset_hash));
    md.push_str(&format!(
        "| Generated | {} |\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if report.header_fallback {
        md.push_str("| Header | **first row assumed** |\n");
    }
    md.push('\n');

    // KPIs
    let k = &report.kpis;
    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Total P&L | {:.2} |\n", k.total_pnl));
    md.push_str(&format!("| Trades | {} |\n", k.trade_count));
    md.push_str(&format!(
        "| Winners / Losers / Breakeven | {} / {} / {} |\n",
        k.winners, k.losers, k.breakeven
    ));
    md.push_str(&format!("| Win Rate | {:.1}% |\n", k.win_rate * 100.0));
    md.push_str(&format!("| Total Max Risk | {:.2} |\n", k.total_max_risk));
    md.push_str(&format!("| ROI | {:.2}% |\n", k.roi * 100.0));
    md.push('\n');

    // Monthly
    if !report.monthly.is_empty() {
        md.push_str("## Monthly P&L\n\n");
        md.push_str("| Month | Trades | P&L | Cumulative |\n");
        md.push_str("| --- | ---: | ---: | ---: |\n");
        for (bucket, cum) in report.monthly.iter().zip(&report.cumulative_monthly) {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} |\n",
                bucket.month, bucket.trade_count, bucket.pnl, cum.cumulative_pnl
            ));
        }
        md.push('\n');
    }

    // Yearly
    if !report.yearly.is_empty() {
        md.push_str("## Yearly P&L\n\n");
        md.push_str("| Year | Trades | P&L | Cumulative |\n");
        md.push_str("| --- | ---: | ---: | ---: |\n");
        for (bucket, cum) in report.yearly.iter().zip(&report.cumulative_yearly) {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} |\n",
                bucket.year, bucket.trade_count, bucket.pnl, cum.cumulative_pnl
            ));
        }
        md.push('\n');
    }

    // Strategies
    if !report.strategies.is_empty() {
        md.push_str("## Strategies\n\n");
        md.push_str(
            "| Strategy | Trades | Total P&L | Win Rate | Avg P&L | Avg ROI | Best | Worst |\n",
        );
        md.push_str("| --- | ---: | ---: | ---: | ---: | ---: | ---: | ---: |\n");
        for s in &report.strategies {
            let avg_roi = match s.avg_roi {
                Some(roi) if s.roi_sample_count > 0 => {
                    format!("{roi:.2}% (n={})", s.roi_sample_count)
                }
                _ => "N/A".to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {:.2} | {:.1}% | {:.2} | {} | {:.2} | {:.2} |\n",
                s.strategy,
                s.trade_count,
                s.total_pnl,
                s.win_rate,
                s.avg_pnl,
                avg_roi,
                s.max_pnl,
                s.min_pnl
            ));
        }
        md.push('\n');
    }

    // Rolling win rate, latest point per strategy
    let aligned = align_rolling(&report.rolling);
    if !aligned.rows.is_empty() {
        md.push_str(&format!(
            "## Rolling Win Rate (window {})\n\n",
            report.rolling_window
        ));
        md.push_str("| Strategy | Trades | Latest |\n");
        md.push_str("| --- | ---: | ---: |\n");
        for (strategy, points) in &aligned.rows {
            let filled: Vec<f64> = points.iter().flatten().copied().collect();
            let latest = filled
                .last()
                .map(|v| format!("{v:.1}%"))
                .unwrap_or_else(|| "N/A".to_string());
            md.push_str(&format!("| {} | {} | {} |\n", strategy, filled.len(), latest));
        }
        md.push('\n');
    }

    // Data quality
    let issues = &report.issues;
    md.push_str("## Data Quality\n\n");
    if issues.flagged == 0 && issues.unparsed_exit_dates == 0 {
        md.push_str("No issues found.\n");
    } else {
        md.push_str(&format!(
            "- Records with issues: {} of {}\n",
            issues.flagged, issues.total_records
        ));
        md.push_str(&format!("- Missing PnL: {}\n", issues.missing_pnl));
        md.push_str(&format!("- Missing Max risk: {}\n", issues.missing_max_risk));
        md.push_str(&format!("- Non-numeric cells: {}\n", issues.invalid_numbers));
        md.push_str(&format!(
            "- Unparsed exit dates: {}\n",
            issues.unparsed_exit_dates
        ));
    }

    md
}
