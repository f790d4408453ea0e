//! Tradelog CLI: load an options trade log and print or export analytics.
//!
//! Commands:
//! - `summary`: KPIs, monthly P&L with running total, yearly P&L
//! - `strategies`: per-strategy table for the scope or one month
//! - `rolling`: rolling win rate per strategy on a trade-index axis
//! - `months`: per-month stats, newest first
//! - `issues`: data-quality summary and the flagged records
//! - `export`: write report.json, records.csv and report.md

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tradelog_core::TradeRecord;
use tradelog_runner::export::save_artifacts;
use tradelog_runner::issues::has_unparsed_exit_date;
use tradelog_runner::{
    align_rolling, aggregate_monthly, aggregate_yearly, compute_kpis, cumulative_monthly,
    cumulative_yearly, filter_scope, issue_records, load_from_config, month_summary,
    monthly_stats, rolling_win_rate, strategy_stats, strategy_stats_for_month, summarize_issues,
    AnalysisReport, LoadedTrades, RunConfig, Scope, StrategyStat,
};

/// Local export looked for when no source is configured anywhere.
const DEFAULT_LOCAL_PATH: &str = "docs/PremiumExtract Strategy.csv";

#[derive(Parser)]
#[command(
    name = "tradelog",
    version,
    about = "Tradelog CLI: options trade-log analytics"
)]
struct Cli {
    /// TOML run configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Spreadsheet id of a publicly shared trade-log sheet.
    #[arg(long, global = true, env = "TRADELOG_SHEET_ID")]
    sheet_id: Option<String>,

    /// Sheet tab id.
    #[arg(long, global = true, env = "TRADELOG_SHEET_GID")]
    gid: Option<String>,

    /// Local CSV export to try (repeatable, tried in order after the sheet).
    #[arg(long = "csv", global = true)]
    csv: Vec<PathBuf>,

    /// Time scope: all, YYYY, or YYYY-MM.
    #[arg(long, global = true, default_value = "all")]
    scope: Scope,

    /// Debug logging.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// KPIs, monthly P&L with running total, yearly P&L.
    Summary,
    /// Per-strategy statistics.
    Strategies {
        /// Restrict to one month (YYYY-MM) and print its summary.
        #[arg(long)]
        month: Option<String>,
    },
    /// Rolling win rate per strategy.
    Rolling {
        /// Trailing window in trades. Defaults to the config value.
        #[arg(long)]
        window: Option<usize>,
    },
    /// Per-month stats, newest first.
    Months,
    /// Data-quality summary and flagged records.
    Issues,
    /// Write the artifact bundle.
    Export {
        /// Directory to create the bundle in.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Trailing window for the rolling win rate.
        #[arg(long)]
        window: Option<usize>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = resolve_config(&cli)?;
    let loaded = load_from_config(&config.source)?;
    let records = filter_scope(&loaded.ingestion.records, cli.scope);
    debug!(scope = %cli.scope, records = records.len(), "scope applied");

    match cli.command {
        Commands::Summary => print_summary(&loaded, &records, cli.scope),
        Commands::Strategies { month } => print_strategies(&records, month.as_deref()),
        Commands::Rolling { window } => {
            print_rolling(&records, window.unwrap_or(config.analysis.rolling_window))
        }
        Commands::Months => print_months(&records),
        Commands::Issues => print_issues(&records),
        Commands::Export { output_dir, window } => {
            let window = window.unwrap_or(config.analysis.rolling_window);
            run_export(&loaded, &records, cli.scope, window, output_dir)
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// `RUST_LOG` when set, otherwise `tradelog=info` (`debug` with `-v`).
fn log_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log.filter(|d| !d.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {}: {directives}", EnvFilter::DEFAULT_ENV)),
        None => {
            let level = if verbose { "debug" } else { "info" };
            Ok(EnvFilter::new(format!("tradelog={level}")))
        }
    }
}

/// Config file, then environment and flags on top.
fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(id) = &cli.sheet_id {
        config.source.sheet_id = Some(id.clone());
    }
    if let Some(gid) = &cli.gid {
        config.source.gid = gid.clone();
    }
    if !cli.csv.is_empty() {
        config.source.local_paths = cli.csv.clone();
    }
    if !config.source.has_sources() {
        info!(path = DEFAULT_LOCAL_PATH, "no source configured, using default path");
        config.source.local_paths.push(PathBuf::from(DEFAULT_LOCAL_PATH));
    }

    config.validate()?;
    Ok(config)
}

// ── Output ───────────────────────────────────────────────────────────

fn print_summary(loaded: &LoadedTrades, records: &[TradeRecord], scope: Scope) -> Result<()> {
    let k = compute_kpis(records);
    println!("Source:   {}", loaded.source_name);
    println!("Dataset:  {}", loaded.dataset_hash);
    println!("Scope:    {scope}");
    if loaded.ingestion.header_fallback {
        println!("Header:   not recognised, first row assumed");
    }
    println!();
    println!("Total P&L:   {:>12.2}", k.total_pnl);
    println!("Trades:      {:>12}", k.trade_count);
    println!("Win rate:    {:>11.1}%", k.win_rate * 100.0);
    println!("ROI:         {:>11.2}%", k.roi * 100.0);
    println!(
        "W / L / BE:  {:>12}",
        format!("{} / {} / {}", k.winners, k.losers, k.breakeven)
    );

    let monthly = aggregate_monthly(records);
    if !monthly.is_empty() {
        println!();
        println!("{:<8} {:>6} {:>12} {:>12}", "Month", "Trades", "P&L", "Cumulative");
        for (b, c) in monthly.iter().zip(cumulative_monthly(records)) {
            println!(
                "{:<8} {:>6} {:>12.2} {:>12.2}",
                b.month, b.trade_count, b.pnl, c.cumulative_pnl
            );
        }
    }

    let yearly = aggregate_yearly(records);
    if !yearly.is_empty() {
        println!();
        println!("{:<8} {:>6} {:>12} {:>12}", "Year", "Trades", "P&L", "Cumulative");
        for (b, c) in yearly.iter().zip(cumulative_yearly(records)) {
            println!(
                "{:<8} {:>6} {:>12.2} {:>12.2}",
                b.year, b.trade_count, b.pnl, c.cumulative_pnl
            );
        }
    }
    Ok(())
}

fn print_strategy_table(stats: &[StrategyStat]) {
    println!(
        "{:<24} {:>6} {:>12} {:>8} {:>10} {:>14} {:>10} {:>10}",
        "Strategy", "Trades", "Total P&L", "Win %", "Avg P&L", "Avg ROI", "Best", "Worst"
    );
    for s in stats {
        let avg_roi = match s.avg_roi {
            Some(roi) => format!("{roi:.2}% (n={})", s.roi_sample_count),
            None => "N/A".to_string(),
        };
        println!(
            "{:<24} {:>6} {:>12.2} {:>7.1}% {:>10.2} {:>14} {:>10.2} {:>10.2}",
            s.strategy.name(),
            s.trade_count,
            s.total_pnl,
            s.win_rate,
            s.avg_pnl,
            avg_roi,
            s.max_pnl,
            s.min_pnl
        );
    }
}

fn print_strategies(records: &[TradeRecord], month: Option<&str>) -> Result<()> {
    match month {
        Some(month) => {
            let scope: Scope = month.parse()?;
            if !matches!(scope, Scope::Month { .. }) {
                bail!("--month expects YYYY-MM, got '{month}'");
            }
            let key = scope.to_string();
            let summary = month_summary(records, &key);
            println!(
                "{}: {} trades, P&L {:.2}, {} winners ({:.1}%)",
                summary.month,
                summary.trade_count,
                summary.total_pnl,
                summary.winners,
                summary.win_rate
            );
            println!();
            print_strategy_table(&strategy_stats_for_month(records, &key));
        }
        None => print_strategy_table(&strategy_stats(records)),
    }
    Ok(())
}

fn print_rolling(records: &[TradeRecord], window: usize) -> Result<()> {
    if window == 0 {
        bail!("--window must be at least 1");
    }
    let aligned = align_rolling(&rolling_win_rate(records, window));
    if aligned.rows.is_empty() {
        println!("No trades in scope.");
        return Ok(());
    }

    print!("{:<10}", "");
    for (strategy, _) in &aligned.rows {
        print!(" {:>16}", strategy.name());
    }
    println!();
    for (i, label) in aligned.labels.iter().enumerate() {
        print!("{label:<10}");
        for (_, points) in &aligned.rows {
            match points[i] {
                Some(v) => print!(" {:>15.1}%", v),
                None => print!(" {:>16}", "-"),
            }
        }
        println!();
    }
    Ok(())
}

fn print_months(records: &[TradeRecord]) -> Result<()> {
    println!(
        "{:<8} {:>6} {:>12} {:>8} {:>10}",
        "Month", "Trades", "P&L", "Win %", "Avg P&L"
    );
    for m in monthly_stats(records) {
        println!(
            "{:<8} {:>6} {:>12.2} {:>7.1}% {:>10.2}",
            m.month, m.trade_count, m.total_pnl, m.win_rate, m.avg_pnl
        );
    }
    Ok(())
}

fn print_issues(records: &[TradeRecord]) -> Result<()> {
    let s = summarize_issues(records);
    println!("Records:             {}", s.total_records);
    println!("With issues:         {}", s.flagged);
    println!("Missing PnL:         {}", s.missing_pnl);
    println!("Missing Max risk:    {}", s.missing_max_risk);
    println!("Non-numeric cells:   {}", s.invalid_numbers);
    println!("Unparsed exit dates: {}", s.unparsed_exit_dates);

    let flagged = issue_records(records);
    if !flagged.is_empty() {
        println!();
        for r in flagged {
            let issues: Vec<&str> = r.issues.iter().map(|i| i.as_str()).collect();
            println!(
                "{:<12} {:<8} {:<20} {}",
                r.exit_date,
                r.symbol,
                r.strategy.name(),
                issues.join("; ")
            );
        }
    }
    let undated: Vec<&TradeRecord> = records.iter().filter(|r| has_unparsed_exit_date(r)).collect();
    if !undated.is_empty() {
        println!();
        println!("Exit dates that did not parse:");
        for r in undated {
            println!("  {:<8} {:?}", r.symbol, r.exit_date);
        }
    }
    Ok(())
}

fn run_export(
    loaded: &LoadedTrades,
    records: &[TradeRecord],
    scope: Scope,
    window: usize,
    output_dir: PathBuf,
) -> Result<()> {
    if window == 0 {
        bail!("--window must be at least 1");
    }
    let report = AnalysisReport::build(loaded, scope, window);
    let run_dir = save_artifacts(&report, records, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}
