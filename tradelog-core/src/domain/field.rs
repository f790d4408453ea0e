//! FieldValue: tagged result of coercing one spreadsheet cell.
//!
//! Exports mix blank cells ("no data") with garbage text ("bad data").
//! Both degrade the same way downstream, but the tag keeps them apart so
//! callers can decide how to report each.

use serde::{Deserialize, Serialize};

/// Outcome of coercing a raw cell into a typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue<T> {
    /// The cell parsed cleanly.
    Present(T),
    /// The cell was blank or its column was missing.
    #[default]
    Absent,
    /// The cell held text that does not parse; the original text is kept.
    Invalid(String),
}

impl<T: Copy> FieldValue<T> {
    /// The parsed value, if any.
    pub fn value(&self) -> Option<T> {
        match self {
            FieldValue::Present(v) => Some(*v),
            FieldValue::Absent | FieldValue::Invalid(_) => None,
        }
    }
}

impl<T> FieldValue<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValue::Invalid(_))
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldValue::Present(v),
            None => FieldValue::Absent,
        }
    }
}

/// Coerce a cell into an `f64`.
///
/// Blank → `Absent`. Text that fails to parse, or parses to NaN or an
/// infinity, → `Invalid`.
pub fn parse_number(raw: &str) -> FieldValue<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValue::Absent;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => FieldValue::Present(v),
        _ => FieldValue::Invalid(raw.to_string()),
    }
}

/// Coerce a cell into a contract count.
///
/// Accepts integral numeric text ("3", "3.0"); fractional, non-finite or
/// out-of-range values are `Invalid`.
pub fn parse_quantity(raw: &str) -> FieldValue<i64> {
    const RANGE: std::ops::Range<f64> = (i64::MIN as f64)..(i64::MAX as f64);
    match parse_number(raw) {
        FieldValue::Present(v) if v.fract() == 0.0 && RANGE.contains(&v) => {
            FieldValue::Present(v as i64)
        }
        FieldValue::Present(_) => FieldValue::Invalid(raw.to_string()),
        FieldValue::Absent => FieldValue::Absent,
        FieldValue::Invalid(text) => FieldValue::Invalid(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_are_absent() {
        assert_eq!(parse_number(""), FieldValue::Absent);
        assert_eq!(parse_number("   "), FieldValue::Absent);
        assert_eq!(parse_quantity(""), FieldValue::Absent);
    }

    #[test]
    fn numeric_text_is_present() {
        assert_eq!(parse_number("125.5"), FieldValue::Present(125.5));
        assert_eq!(parse_number(" -40 "), FieldValue::Present(-40.0));
        assert_eq!(parse_number("0"), FieldValue::Present(0.0));
    }

    #[test]
    fn garbage_is_invalid_not_zero() {
        assert_eq!(parse_number("$100"), FieldValue::Invalid("$100".into()));
        assert_eq!(parse_number("1,250"), FieldValue::Invalid("1,250".into()));
        assert_eq!(parse_number("NaN"), FieldValue::Invalid("NaN".into()));
        assert_eq!(parse_number("n/a").value(), None);
        assert_eq!(parse_number("inf"), FieldValue::Invalid("inf".into()));
        assert!(parse_number("1e999").is_invalid());
    }

    #[test]
    fn quantity_requires_integral_value() {
        assert_eq!(parse_quantity("3"), FieldValue::Present(3));
        assert_eq!(parse_quantity("2.0"), FieldValue::Present(2));
        assert_eq!(parse_quantity("1.5"), FieldValue::Invalid("1.5".into()));
        assert_eq!(parse_quantity("two"), FieldValue::Invalid("two".into()));
    }

    #[test]
    fn quantity_out_of_range_is_invalid() {
        assert_eq!(parse_quantity("1e30"), FieldValue::Invalid("1e30".into()));
        assert_eq!(parse_quantity("-1e30"), FieldValue::Invalid("-1e30".into()));
        assert_eq!(parse_quantity("-12"), FieldValue::Present(-12));
    }

    #[test]
    fn default_is_absent() {
        assert_eq!(FieldValue::<f64>::default(), FieldValue::Absent);
    }

    #[test]
    fn value_only_yields_present() {
        assert_eq!(FieldValue::Present(2.5).value(), Some(2.5));
        assert_eq!(FieldValue::<f64>::Absent.value(), None);
        assert!(FieldValue::<f64>::Invalid("x".into()).is_invalid());
        assert!(!FieldValue::<f64>::Absent.is_present());
    }
}
