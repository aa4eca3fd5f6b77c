use crate::ledger::{Ledger, Record};

/// Free-text filtering over the ledger.
pub struct QueryService;

impl QueryService {
    /// Records whose description, date or stored type token (`in`/`out`)
    /// contains `term`, ignoring case.
    ///
    /// A blank term matches every record. Ledger order is preserved.
    pub fn search<'a>(ledger: &'a Ledger, term: &str) -> Vec<&'a Record> {
        let needle = term.trim().to_lowercase();
        ledger
            .iter()
            .filter(|record| Self::matches(record, &needle))
            .collect()
    }

    fn matches(record: &Record, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        record.description().to_lowercase().contains(needle)
            || record.date_string().contains(needle)
            || record.kind().token().contains(needle)
    }
}
