//! Domain types for trade-log analytics

pub mod field;
pub mod issue;
pub mod strategy;
pub mod trade;

pub use field::{parse_number, parse_quantity, FieldValue};
pub use issue::Issue;
pub use strategy::StrategyLabel;
pub use trade::{TradeRecord, DATE_FORMAT};
