#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tcash::{
    core::{FixedClock, LedgerStore},
    storage::TextStorage,
};
use tempfile::TempDir;

pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid test date")
}

pub fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).expect("valid test decimal")
}

pub fn records_dir(temp: &TempDir) -> PathBuf {
    temp.path().join("transaction_records")
}

pub fn ledger_file(temp: &TempDir) -> PathBuf {
    records_dir(temp).join("transactions.txt")
}

/// Opens a store in `temp` whose clock is pinned to `today`.
pub fn open_store(temp: &TempDir, today: &str) -> LedgerStore {
    let storage = TextStorage::new(records_dir(temp)).expect("create text storage");
    LedgerStore::load(Box::new(storage), Box::new(FixedClock(date(today)))).expect("load ledger")
}

/// Creates an isolated store backed by a fresh temporary directory.
pub fn setup_store(today: &str) -> (LedgerStore, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let store = open_store(&temp, today);
    (store, temp)
}
