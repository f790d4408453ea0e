//! Criterion benchmarks for ingestion hot paths.
//!
//! Benchmarks:
//! 1. Full matrix ingestion (header search + normalization)
//! 2. Date normalization across the supported layouts
//! 3. CSV text parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tradelog_core::ingest::{ingest_matrix, normalize_date};
use tradelog_core::source::{parse_csv_text, RowMatrix};

// ── Helpers ──────────────────────────────────────────────────────────

const STRATEGIES: [&str; 4] = ["Bull Put", "Bear Call", "Iron Condor", ""];
const SYMBOLS: [&str; 5] = ["SPY", "QQQ", "IWM", "AAPL", "TSLA"];

fn make_matrix(n: usize) -> RowMatrix {
    let mut rng = StdRng::seed_from_u64(7);
    let mut rows: RowMatrix = vec![
        vec!["PremiumExtract Strategy".to_string()],
        vec![String::new()],
        [
            "Date placed", "Exit Date", "Ticker", "contracts", "P&L", "Max risk", "strategy type",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    ];
    for i in 0..n {
        let month = 1 + (i % 12) as u32;
        let day = 1 + (i % 27) as u32;
        let pnl = if rng.gen_bool(0.05) {
            String::new()
        } else {
            format!("{:.2}", rng.gen_range(-400.0..300.0))
        };
        rows.push(vec![
            format!("{month}/{day}/2023"),
            format!("2023-{month:02}-{:02}", day + 1),
            SYMBOLS[i % SYMBOLS.len()].to_string(),
            rng.gen_range(1..5).to_string(),
            pnl,
            format!("{:.0}", rng.gen_range(100.0..1500.0)),
            STRATEGIES[i % STRATEGIES.len()].to_string(),
        ]);
    }
    rows
}

fn to_csv(rows: &RowMatrix) -> String {
    rows.iter()
        .map(|r| r.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_matrix");
    for n in [100usize, 1_000, 10_000] {
        let matrix = make_matrix(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, m| {
            b.iter(|| ingest_matrix(black_box(m)))
        });
    }
    group.finish();
}

fn bench_dates(c: &mut Criterion) {
    let inputs = [
        "2023-08-15",
        "8/15/2023",
        "Aug 15, 2023",
        "15 August 2023",
        "2023-08-15T16:00:00Z",
        "not a date",
    ];
    c.bench_function("normalize_date", |b| {
        b.iter(|| {
            for s in &inputs {
                black_box(normalize_date(black_box(s)));
            }
        })
    });
}

fn bench_csv(c: &mut Criterion) {
    let text = to_csv(&make_matrix(5_000));
    c.bench_function("parse_csv_text/5000", |b| {
        b.iter(|| parse_csv_text(black_box(&text)))
    });
}

criterion_group!(benches, bench_ingest, bench_dates, bench_csv);
criterion_main!(benches);
