//! Column Resolver: maps header labels to column indices and resolves
//! canonical fields through their known label variants.
//!
//! Labels are matched exactly (after trimming). Exports disagree about
//! capitalization, so each variant is listed explicitly instead of
//! folding case.

use std::collections::BTreeMap;

/// A canonical field of the trade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    ExitDate,
    OpenDate,
    Symbol,
    Quantity,
    Pnl,
    MaxRisk,
    Strategy,
    Side,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::ExitDate,
        CanonicalField::OpenDate,
        CanonicalField::Symbol,
        CanonicalField::Quantity,
        CanonicalField::Pnl,
        CanonicalField::MaxRisk,
        CanonicalField::Strategy,
        CanonicalField::Side,
    ];

    /// Header labels for this field, in lookup order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::ExitDate => &["Exit Date", "exit date", "date", "Date"],
            CanonicalField::OpenDate => &["Date placed", "date placed"],
            CanonicalField::Symbol => &["Ticker", "ticker"],
            CanonicalField::Quantity => &["contracts"],
            CanonicalField::Pnl => &["P&L", "PnL"],
            CanonicalField::MaxRisk => &["Max risk", "Max Risk"],
            CanonicalField::Strategy => &["strategy type", "Strategy", "strategy"],
            CanonicalField::Side => &["Side", "side"],
        }
    }
}

/// Header label → column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: BTreeMap<String, usize>,
}

impl ColumnMap {
    /// Build the map from a header row. Later duplicate labels overwrite
    /// earlier ones.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut indices = BTreeMap::new();
        for (i, label) in header.iter().enumerate() {
            indices.insert(label.as_ref().trim().to_string(), i);
        }
        Self { indices }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(|k| k.as_str())
    }

    /// Cell under `label` in `row`. Missing columns and short rows yield "".
    pub fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], label: &str) -> &'a str {
        self.index_of(label)
            .and_then(|i| row.get(i))
            .map_or("", |c| c.as_ref())
    }

    /// Resolve a canonical field: the first alias with a non-empty cell wins.
    pub fn resolve<'a, S: AsRef<str>>(&self, row: &'a [S], field: CanonicalField) -> &'a str {
        field
            .aliases()
            .iter()
            .map(|label| self.cell(row, label))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Every header label with its cell from `row`.
    pub fn raw_fields<S: AsRef<str>>(&self, row: &[S]) -> BTreeMap<String, String> {
        self.indices
            .keys()
            .map(|label| (label.clone(), self.cell(row, label).to_string()))
            .collect()
    }

    /// Canonical fields that no alias in this header can supply.
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| !f.aliases().iter().any(|a| self.contains(a)))
            .collect()
    }
}
