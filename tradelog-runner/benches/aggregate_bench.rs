//! Criterion benchmarks for the aggregation engine.
//!
//! Run with: `cargo bench -p tradelog-runner`
//!
//! Records are generated deterministically so runs are comparable:
//! - Monthly bucketing and cumulative views
//! - Strategy statistics
//! - Rolling win rate
//! - Full report build

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tradelog_core::domain::{FieldValue, TradeRecord};
use tradelog_core::ingest::{build_record, ingest_matrix, RecordParts};
use tradelog_runner::{
    aggregate_monthly, cumulative_monthly, rolling_win_rate, strategy_stats, AnalysisReport,
    LoadedTrades, Scope,
};

const STRATEGIES: [&str; 5] = ["Bull Put", "Bear Call", "Iron Condor", "Strangle", ""];

/// Deterministic synthetic records spread over three years.
fn generate_records(count: usize) -> Vec<TradeRecord> {
    (0..count)
        .map(|i| {
            let year = 2022 + (i % 3);
            let month = 1 + (i % 12);
            let day = 1 + (i % 28);
            let pnl = ((i * 37) % 500) as f64 - 220.0;
            build_record(RecordParts {
                exit_date: format!("{year}-{month:02}-{day:02}"),
                symbol: "SPY".to_string(),
                strategy: STRATEGIES[i % STRATEGIES.len()].to_string(),
                pnl: FieldValue::Present(pnl),
                max_risk: if i % 17 == 0 {
                    FieldValue::Absent
                } else {
                    FieldValue::Present(500.0)
                },
                ..Default::default()
            })
        })
        .collect()
}

fn bench_monthly(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly");
    for size in [100usize, 1_000, 10_000] {
        let records = generate_records(size);
        group.bench_with_input(BenchmarkId::new("aggregate", size), &records, |b, r| {
            b.iter(|| aggregate_monthly(black_box(r)))
        });
        group.bench_with_input(BenchmarkId::new("cumulative", size), &records, |b, r| {
            b.iter(|| cumulative_monthly(black_box(r)))
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_stats");
    for size in [100usize, 1_000, 10_000] {
        let records = generate_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, r| {
            b.iter(|| strategy_stats(black_box(r)))
        });
    }
    group.finish();
}

fn bench_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_win_rate");
    let records = generate_records(10_000);
    for window in [5usize, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &w| {
            b.iter(|| rolling_win_rate(black_box(&records), w))
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut rows: Vec<Vec<String>> = vec![["Exit Date", "Ticker", "P&L", "Max risk", "strategy"]
        .iter()
        .map(|s| s.to_string())
        .collect()];
    for r in generate_records(5_000) {
        rows.push(vec![
            r.exit_date.clone(),
            r.symbol.clone(),
            r.pnl_or_zero().to_string(),
            r.max_risk_or_zero().to_string(),
            r.strategy.name().to_string(),
        ]);
    }
    let loaded = LoadedTrades {
        source_name: "bench".to_string(),
        dataset_hash: String::new(),
        ingestion: ingest_matrix(&rows).expect("bench matrix has a header"),
    };
    c.bench_function("report_build/5000", |b| {
        b.iter(|| AnalysisReport::build(black_box(&loaded), Scope::All, 10))
    });
}

criterion_group!(
    benches,
    bench_monthly,
    bench_strategies,
    bench_rolling,
    bench_report
);
criterion_main!(benches);
