//! Header Locator: finds the column-header row in a raw row matrix.
//!
//! Spreadsheet exports often carry title and notes rows above the real
//! header, so the first qualifying row wins and later matches in free text
//! are ignored.

use std::collections::HashSet;

/// Where the header row was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLocation {
    Found(usize),
    NotFound,
}

impl HeaderLocation {
    pub fn index(&self) -> Option<usize> {
        match self {
            HeaderLocation::Found(i) => Some(*i),
            HeaderLocation::NotFound => None,
        }
    }
}

const DATE_PLACED: &str = "date placed";
const TICKER: &str = "ticker";
const PNL_SPELLINGS: [&str; 2] = ["p&l", "pnl"];

/// Does this row look like the header row?
///
/// Cells are trimmed and lower-cased. A row qualifies on "date placed", or
/// on "ticker" together with a P&L column.
pub fn is_header_row<S: AsRef<str>>(row: &[S]) -> bool {
    let cells: HashSet<String> = row
        .iter()
        .map(|cell| cell.as_ref().trim().to_lowercase())
        .collect();

    if cells.contains(DATE_PLACED) {
        return true;
    }
    cells.contains(TICKER) && PNL_SPELLINGS.iter().any(|p| cells.contains(*p))
}

/// Scan top to bottom and return the first header-like row.
pub fn locate_header_row<S: AsRef<str>>(rows: &[Vec<S>]) -> HeaderLocation {
    rows.iter()
        .position(|row| is_header_row(row))
        .map_or(HeaderLocation::NotFound, HeaderLocation::Found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn skips_narrative_rows() {
        let rows = matrix(&[
            &["Strategy Notes"],
            &["Ticker", "P&L", "Strategy"],
            &["AAPL", "10", "Bull Put"],
        ]);
        assert_eq!(locate_header_row(&rows), HeaderLocation::Found(1));
    }

    #[test]
    fn date_placed_alone_qualifies() {
        let rows = matrix(&[&["PremiumExtract"], &[""], &[" Date Placed ", "Symbol"]]);
        assert_eq!(locate_header_row(&rows), HeaderLocation::Found(2));
    }

    #[test]
    fn ticker_without_pnl_does_not_qualify() {
        let rows = matrix(&[&["Ticker", "Notes"], &["Ticker", "PnL"]]);
        assert_eq!(locate_header_row(&rows), HeaderLocation::Found(1));
    }

    #[test]
    fn first_match_wins() {
        let rows = matrix(&[
            &["ticker", "p&l"],
            &["AAPL", "5"],
            &["Date placed", "Ticker", "P&L"],
        ]);
        assert_eq!(locate_header_row(&rows), HeaderLocation::Found(0));
    }

    #[test]
    fn tokens_must_be_whole_cells() {
        let rows = matrix(&[&["see ticker and p&l columns below"], &["x", "y"]]);
        assert_eq!(locate_header_row(&rows), HeaderLocation::NotFound);
    }

    #[test]
    fn empty_matrix_is_not_found() {
        let rows: Vec<Vec<String>> = vec![];
        assert_eq!(locate_header_row(&rows), HeaderLocation::NotFound);
        assert_eq!(HeaderLocation::NotFound.index(), None);
    }
}
