//! End-to-end ingestion: CSV text → row matrix → canonical trade records.

use tradelog_core::domain::{FieldValue, Issue, StrategyLabel};
use tradelog_core::ingest::{ingest_matrix, IngestError};
use tradelog_core::source::{parse_csv_text, CsvFileSource, RowSource};

const SHEET_EXPORT: &str = "\
PremiumExtract Strategy,,,,,,,
Track record since 2023,,,,,,,
,,,,,,,
Date placed,Exit Date,Ticker,contracts,P&L,Max risk,strategy type,Side
Aug 1 2023,Aug 18 2023,SPY,2,150,600,Bull Put,Sell
8/3/2023,8/25/2023,QQQ,1,-75,300,Bear Call,Sell
8/10/2023,9/1/2023,IWM,1,40,,Iron Condor,Sell
9/5/2023,,TSLA,3,n/a,900,,Sell
,,,,,,,
,,,,Total,115,,
";

#[test]
fn sheet_export_with_preamble() {
    let rows = parse_csv_text(SHEET_EXPORT).unwrap();
    let ing = ingest_matrix(&rows).unwrap();

    assert_eq!(ing.header_index, 2, "blank comma-only row is dropped before header search");
    assert!(!ing.header_fallback);
    assert_eq!(ing.records.len(), 4);
    assert_eq!(ing.skipped_rows, 1);

    let spy = &ing.records[0];
    assert_eq!(spy.open_date, "2023-08-01");
    assert_eq!(spy.exit_date, "2023-08-18");
    assert_eq!(spy.quantity, FieldValue::Present(2));
    assert!((spy.roi.unwrap() - 25.0).abs() < 1e-9);

    let iwm = &ing.records[2];
    assert_eq!(iwm.issues, vec![Issue::MissingMaxRisk]);
    assert_eq!(iwm.roi, None);
    assert_eq!(iwm.pnl.value(), Some(40.0));

    let tsla = &ing.records[3];
    assert_eq!(tsla.exit_date, "");
    assert_eq!(tsla.strategy, StrategyLabel::Unknown);
    assert_eq!(tsla.pnl, FieldValue::Invalid("n/a".into()));
    assert_eq!(tsla.issues, vec![Issue::MissingPnl]);
}

#[test]
fn records_preserve_input_order() {
    let rows = parse_csv_text(SHEET_EXPORT).unwrap();
    let ing = ingest_matrix(&rows).unwrap();
    let symbols: Vec<&str> = ing.records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["SPY", "QQQ", "IWM", "TSLA"]);
}

#[test]
fn issues_empty_iff_roi_defined() {
    let rows = parse_csv_text(SHEET_EXPORT).unwrap();
    let ing = ingest_matrix(&rows).unwrap();
    for rec in &ing.records {
        assert_eq!(rec.issues.is_empty(), rec.roi.is_some(), "{rec:?}");
    }
}

#[test]
fn lowercase_headers_and_alternate_spellings() {
    let text = "ticker,PnL,Max Risk,Strategy,date\nspy,25,100,Strangle,2024-02-02\n";
    let ing = ingest_matrix(&parse_csv_text(text).unwrap()).unwrap();
    assert_eq!(ing.header_index, 0);
    let rec = &ing.records[0];
    assert_eq!(rec.symbol, "spy");
    assert_eq!(rec.exit_date, "2024-02-02");
    assert_eq!(rec.strategy.name(), "Strangle");
    assert_eq!(rec.roi, Some(25.0));
}

#[test]
fn empty_file_is_a_structural_failure() {
    let rows = parse_csv_text("").unwrap();
    assert_eq!(ingest_matrix(&rows).unwrap_err(), IngestError::EmptyMatrix);
}

#[test]
fn csv_file_source_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    std::fs::write(&path, SHEET_EXPORT).unwrap();

    let rows = CsvFileSource::new(&path).fetch_rows().unwrap();
    let ing = ingest_matrix(&rows).unwrap();
    assert_eq!(ing.records.len(), 4);
    assert_eq!(ing.headers[1], "Exit Date");
}
