//! Time scopes: which slice of the trade log a view is computed over.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tradelog_core::domain::TradeRecord;

/// A time window over exit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    #[default]
    All,
    Year { year: i32 },
    Month { year: i32, month: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeParseError {
    #[error("invalid scope '{0}' (expected 'all', 'YYYY', or 'YYYY-MM')")]
    Malformed(String),

    #[error("month out of range in scope '{0}'")]
    MonthOutOfRange(String),
}

impl Scope {
    /// True if a record belongs to this scope. Undated records only belong to `All`.
    pub fn contains(&self, record: &TradeRecord) -> bool {
        match self {
            Scope::All => true,
            Scope::Year { year } => record.exit_year() == Some(*year),
            Scope::Month { year, month } => record
                .exit_day()
                .is_some_and(|d| d.year() == *year && d.month() == *month),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Year { year } => write!(f, "{year:04}"),
            Scope::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Scope::All);
        }
        let malformed = || ScopeParseError::Malformed(s.to_string());
        match s.split_once('-') {
            None => {
                if s.len() != 4 {
                    return Err(malformed());
                }
                let year = s.parse().map_err(|_| malformed())?;
                Ok(Scope::Year { year })
            }
            Some((y, m)) => {
                if y.len() != 4 || m.is_empty() || m.len() > 2 {
                    return Err(malformed());
                }
                let year = y.parse().map_err(|_| malformed())?;
                let month: u32 = m.parse().map_err(|_| malformed())?;
                if !(1..=12).contains(&month) {
                    return Err(ScopeParseError::MonthOutOfRange(s.to_string()));
                }
                Ok(Scope::Month { year, month })
            }
        }
    }
}

/// Records inside `scope`, in input order.
pub fn filter_scope(records: &[TradeRecord], scope: Scope) -> Vec<TradeRecord> {
    records
        .iter()
        .filter(|r| scope.contains(r))
        .cloned()
        .collect()
}

/// Years with at least one dated trade, ascending.
pub fn available_years(records: &[TradeRecord]) -> Vec<i32> {
    records
        .iter()
        .filter_map(TradeRecord::exit_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Months (`YYYY-MM`) with at least one dated trade, newest first.
pub fn available_months(records: &[TradeRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(TradeRecord::exit_month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

pub fn latest_year(records: &[TradeRecord]) -> Option<Scope> {
    available_years(records)
        .last()
        .map(|&year| Scope::Year { year })
}

pub fn latest_month(records: &[TradeRecord]) -> Option<Scope> {
    records
        .iter()
        .filter_map(TradeRecord::exit_day)
        .max()
        .map(|d| Scope::Month {
            year: d.year(),
            month: d.month(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradelog_core::domain::FieldValue;
    use tradelog_core::ingest::{build_record, RecordParts};

    fn trade(exit: &str) -> TradeRecord {
        build_record(RecordParts {
            exit_date: exit.into(),
            symbol: "SPY".into(),
            pnl: FieldValue::Present(1.0),
            max_risk: FieldValue::Present(10.0),
            ..Default::default()
        })
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("all".parse::<Scope>().unwrap(), Scope::All);
        assert_eq!("ALL".parse::<Scope>().unwrap(), Scope::All);
        assert_eq!("2024".parse::<Scope>().unwrap(), Scope::Year { year: 2024 });
        assert_eq!(
            "2024-03".parse::<Scope>().unwrap(),
            Scope::Month {
                year: 2024,
                month: 3
            }
        );
        assert_eq!(Scope::Month { year: 2024, month: 3 }.to_string(), "2024-03");
        assert_eq!(Scope::Year { year: 2023 }.to_string(), "2023");
        assert_eq!(Scope::All.to_string(), "all");
    }

    #[test]
    fn parse_rejects_junk() {
        assert!(matches!(
            "24".parse::<Scope>(),
            Err(ScopeParseError::Malformed(_))
        ));
        assert!(matches!(
            "2024-13".parse::<Scope>(),
            Err(ScopeParseError::MonthOutOfRange(_))
        ));
        assert!("2024-03-01".parse::<Scope>().is_err());
        assert!("last month".parse::<Scope>().is_err());
    }

    #[test]
    fn undated_records_only_in_all() {
        let recs = vec![trade("2024-03-02"), trade("2023-12-31"), trade("n/a"), trade("")];
        assert_eq!(filter_scope(&recs, Scope::All).len(), 4);
        assert_eq!(filter_scope(&recs, Scope::Year { year: 2024 }).len(), 1);
        let march = filter_scope(&recs, Scope::Month { year: 2024, month: 3 });
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].exit_date, "2024-03-02");
        assert!(filter_scope(&recs, Scope::Month { year: 2024, month: 4 }).is_empty());
    }

    #[test]
    fn available_periods() {
        let recs = vec![
            trade("2024-03-02"),
            trade("2023-12-31"),
            trade("2024-01-15"),
            trade("2024-03-20"),
            trade("junk"),
        ];
        assert_eq!(available_years(&recs), vec![2023, 2024]);
        assert_eq!(available_months(&recs), vec!["2024-03", "2024-01", "2023-12"]);
        assert_eq!(latest_year(&recs), Some(Scope::Year { year: 2024 }));
        assert_eq!(
            latest_month(&recs),
            Some(Scope::Month {
                year: 2024,
                month: 3
            })
        );
        assert_eq!(latest_month(&[]), None);
    }
}
