use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::clock::Clock;
use crate::core::reveal::{reveal_dir, RevealOutcome};
use crate::core::services::{QueryService, SummaryService, TransactionService};
use crate::errors::Result;
use crate::ledger::{Ledger, Record, RecordId, RecordKey, Summary};
use crate::storage::{LoadReport, SkippedLine, StorageBackend};

/// Owns the ledger for the process lifetime and keeps the file in step with it.
///
/// Every successful mutation is followed by a full rewrite of the ledger file. If
/// that rewrite fails the mutation is undone in memory before the error is
/// returned, so the in-memory ledger never runs ahead of what is on disk.
pub struct LedgerStore {
    ledger: Ledger,
    skipped: Vec<SkippedLine>,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl LedgerStore {
    /// Reads the persisted ledger; a missing file yields an empty ledger.
    pub fn load(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Result<Self> {
        let LoadReport {
            ledger,
            skipped,
            path,
            existed,
        } = storage.load()?;
        for line in &skipped {
            warn!(
                path = %path.display(),
                line = line.line_number,
                reason = %line.reason,
                "skipping malformed ledger line"
            );
        }
        info!(
            path = %path.display(),
            records = ledger.len(),
            skipped = skipped.len(),
            existed,
            "ledger loaded"
        );
        Ok(Self {
            ledger,
            skipped,
            storage,
            clock,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn records(&self) -> &[Record] {
        self.ledger.records()
    }

    /// Lines that could not be decoded at load time.
    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Validates input, appends a record dated today, and flushes.
    pub fn add(&mut self, description: &str, kind_token: &str, amount_text: &str) -> Result<Record> {
        let record =
            TransactionService::prepare(description, kind_token, amount_text, self.clock.today())?;
        TransactionService::add(&mut self.ledger, record.clone());
        if let Err(err) = self.flush() {
            self.ledger.pop();
            return Err(err);
        }
        info!(
            date = %record.date_string(),
            kind = record.kind().token(),
            amount = %record.amount(),
            "transaction added"
        );
        Ok(record)
    }

    /// Removes the first record shown as `date`, `description`, `rendered_amount`.
    pub fn delete(&mut self, date: &str, description: &str, rendered_amount: &str) -> Result<bool> {
        self.remove(&RecordKey::new(date, description, rendered_amount))
    }

    /// Removes the first record matching `key`; the file is only rewritten when
    /// something was removed.
    pub fn remove(&mut self, key: &RecordKey) -> Result<bool> {
        let Some((index, removed)) = TransactionService::remove(&mut self.ledger, key) else {
            info!(date = %key.date, "no matching transaction to delete");
            return Ok(false);
        };
        self.commit_removal(index, removed).map(|_| true)
    }

    pub fn remove_by_id(&mut self, id: RecordId) -> Result<Option<Record>> {
        let Some((index, removed)) = TransactionService::remove_by_id(&mut self.ledger, id) else {
            return Ok(None);
        };
        self.commit_removal(index, removed).map(Some)
    }

    fn commit_removal(&mut self, index: usize, removed: Record) -> Result<Record> {
        if let Err(err) = self.flush() {
            self.ledger.reinsert(index, removed);
            return Err(err);
        }
        info!(date = %removed.date_string(), "transaction deleted");
        Ok(removed)
    }

    pub fn search(&self, term: &str) -> Vec<&Record> {
        QueryService::search(&self.ledger, term)
    }

    pub fn summary(&self) -> Summary {
        SummaryService::summarize(&self.ledger)
    }

    /// Rewrites the whole ledger file from memory.
    pub fn flush(&self) -> Result<()> {
        self.storage.save(&self.ledger)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.storage.ledger_path()
    }

    pub fn reveal_storage_location(&self, opener: Option<&str>) -> RevealOutcome {
        reveal_dir(self.storage.location(), opener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::errors::LedgerError;
    use crate::storage::TextStorage;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn store_in(temp: &TempDir) -> LedgerStore {
        let storage = TextStorage::new(temp.path().join("records")).unwrap();
        LedgerStore::load(Box::new(storage), Box::new(FixedClock(today()))).unwrap()
    }

    #[test]
    fn add_persists_immediately() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        let record = store.add("Flowers", "out", "350").expect("add succeeds");
        assert_eq!(record.date(), today());

        let raw = fs::read_to_string(store.ledger_path()).unwrap();
        assert_eq!(raw, "2025-02-14|Flowers|out|350\n");
    }

    #[test]
    fn validation_failure_leaves_no_file() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        let err = store.add("", "in", "10").unwrap_err();
        assert!(err.is_validation());
        assert!(store.records().is_empty());
        assert!(!store.ledger_path().exists());
    }

    #[test]
    fn flush_failure_rolls_back_add() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        // a directory in place of the staging file makes the write fail
        let mut tmp = store.ledger_path().into_os_string();
        tmp.push(".tmp");
        fs::create_dir_all(&tmp).unwrap();

        let err = store.add("Bonus", "in", "500").unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)), "{err:?}");
        assert!(store.records().is_empty());
    }

    #[test]
    fn remove_by_id_targets_one_of_two_identical_rows() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        store.add("Snacks", "out", "20").unwrap();
        let second = store.add("Snacks", "out", "20").unwrap();

        let removed = store.remove_by_id(second.id()).unwrap().expect("removed");
        assert_eq!(removed.id(), second.id());
        assert_eq!(store.records().len(), 1);
        assert_ne!(store.records()[0].id(), second.id());
        assert!(store.remove_by_id(second.id()).unwrap().is_none());
    }
}
