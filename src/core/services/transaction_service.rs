//! Validation and mutation helpers for ledger records.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};
use crate::ledger::{Ledger, Record, RecordId, RecordKey, RecordKind};

/// Turns raw user input into records and applies them to a ledger.
pub struct TransactionService;

impl TransactionService {
    /// Parses user-entered amount text; rejects blanks, non-numbers, and values
    /// outside `(0, Record::max_amount()]`.
    pub fn parse_amount(text: &str) -> Result<Decimal> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidAmount("amount is required".into()));
        }
        let amount = Decimal::from_str(trimmed)
            .map_err(|_| LedgerError::InvalidAmount(format!("`{trimmed}` is not a number")))?;
        Record::check_amount(amount)?;
        Ok(amount)
    }

    /// Validates the three user inputs in order (amount, description, type) and
    /// builds a record dated `today`.
    pub fn prepare(
        description: &str,
        kind_token: &str,
        amount_text: &str,
        today: NaiveDate,
    ) -> Result<Record> {
        let amount = Self::parse_amount(amount_text)?;
        if description.trim().is_empty() {
            return Err(LedgerError::MissingDescription);
        }
        let kind = RecordKind::from_str(kind_token)?;
        Record::new(today, description, kind, amount)
    }

    pub fn add(ledger: &mut Ledger, record: Record) -> RecordId {
        let id = record.id();
        ledger.push(record);
        id
    }

    /// Removes the first record matching `key`, returning it with its former position.
    pub fn remove(ledger: &mut Ledger, key: &RecordKey) -> Option<(usize, Record)> {
        ledger.remove_matching(key)
    }

    pub fn remove_by_id(ledger: &mut Ledger, id: RecordId) -> Option<(usize, Record)> {
        ledger.remove_by_id(id)
    }
}
