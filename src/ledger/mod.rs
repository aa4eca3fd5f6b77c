//! Ledger domain models: records, the ordered ledger, and summary shapes.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;
pub mod summary;

pub use ledger::Ledger;
pub use record::{Record, RecordId, RecordKey, RecordKind, DATE_FORMAT, DELIMITER};
pub use summary::{DailySummary, MonthlySummary, Summary, Totals, YearMonth};
