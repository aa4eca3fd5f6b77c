use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Field separator used by the persisted line format.
pub const DELIMITER: char = '|';

/// Date layout used for persistence, display and searching.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const RESERVED_CHARS: [char; 3] = [DELIMITER, '\n', '\r'];

/// Whole-unit ceiling for a single amount. Ledger sums stay far below `Decimal::MAX`.
const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// In-memory handle for a record. Not persisted; reassigned on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Token written to the ledger file.
    pub fn token(self) -> &'static str {
        match self {
            RecordKind::Income => "in",
            RecordKind::Expense => "out",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }

    /// Strict parse of the persisted token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "in" => Some(RecordKind::Income),
            "out" => Some(RecordKind::Expense),
            _ => None,
        }
    }

    /// Applies the sign of this kind to a magnitude.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            RecordKind::Income => amount,
            RecordKind::Expense => -amount,
        }
    }
}

impl FromStr for RecordKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in" | "income" => Ok(RecordKind::Income),
            "out" | "expense" => Ok(RecordKind::Expense),
            _ => Err(LedgerError::InvalidKind(value.trim().to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dated income or expense entry.
#[derive(Debug, Clone)]
pub struct Record {
    id: RecordId,
    date: NaiveDate,
    description: String,
    kind: RecordKind,
    amount: Decimal,
}

impl Record {
    /// Builds a record, enforcing the positive-amount and description invariants.
    ///
    /// The amount is checked before the description. The description is stored
    /// trimmed and may not contain the field delimiter or a line break, so every
    /// record that can be built can also be written and read back unchanged.
    pub fn new(
        date: NaiveDate,
        description: &str,
        kind: RecordKind,
        amount: Decimal,
    ) -> Result<Self> {
        Self::check_amount(amount)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::MissingDescription);
        }
        if let Some(reserved) = description.chars().find(|ch| RESERVED_CHARS.contains(ch)) {
            return Err(LedgerError::ReservedCharacter(reserved));
        }
        Ok(Self {
            id: RecordId::new(),
            date,
            description: description.to_string(),
            kind,
            amount,
        })
    }

    /// Rejects amounts that are not positive or exceed the per-record ceiling.
    pub fn check_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "{amount} is not greater than zero"
            )));
        }
        let ceiling = Self::max_amount();
        if amount > ceiling {
            return Err(LedgerError::InvalidAmount(format!(
                "{amount} is above the limit of {ceiling}"
            )));
        }
        Ok(())
    }

    pub fn max_amount() -> Decimal {
        Decimal::new(MAX_AMOUNT_UNITS, 0)
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount with income positive and expense negative.
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    /// Two-decimal rendering with an explicit sign, e.g. `+1000.00` or `-250.50`.
    pub fn signed_display(&self) -> String {
        let sign = match self.kind {
            RecordKind::Income => '+',
            RecordKind::Expense => '-',
        };
        format!("{sign}{:.2}", self.amount.round_dp(2))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.description == other.description
            && self.kind == other.kind
            && self.amount == other.amount
    }
}

impl Eq for Record {}

/// Content-based selector used when the caller only knows what a row displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub date: String,
    pub description: String,
    pub rendered_amount: String,
}

impl RecordKey {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        rendered_amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            rendered_amount: rendered_amount.into(),
        }
    }

    pub fn for_record(record: &Record) -> Self {
        Self::new(
            record.date_string(),
            record.description(),
            record.signed_display(),
        )
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.date_string() == self.date.trim()
            && record.description() == self.description.trim()
            && record.signed_display() == self.rendered_amount.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in [Decimal::ZERO, Decimal::new(-5, 0)] {
            let err = Record::new(date(), "Lunch", RecordKind::Expense, amount)
                .expect_err("amount must be positive");
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "{err:?}");
        }
    }

    #[test]
    fn rejects_amounts_above_the_ceiling() {
        let ceiling = Record::max_amount();
        assert!(Record::new(date(), "Lottery", RecordKind::Income, ceiling).is_ok());
        for amount in [ceiling + Decimal::new(1, 2), Decimal::MAX] {
            let err = Record::new(date(), "Lottery", RecordKind::Income, amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "{err:?}");
        }
    }

    #[test]
    fn amount_is_checked_before_description() {
        let err = Record::new(date(), "  ", RecordKind::Income, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn trims_and_requires_description() {
        let record =
            Record::new(date(), "  Salary \t", RecordKind::Income, Decimal::new(1000, 0)).unwrap();
        assert_eq!(record.description(), "Salary");

        let err = Record::new(date(), " \t ", RecordKind::Income, Decimal::ONE).unwrap_err();
        assert!(matches!(err, LedgerError::MissingDescription));
    }

    #[test]
    fn rejects_delimiter_in_description() {
        let err = Record::new(date(), "rent|march", RecordKind::Expense, Decimal::ONE).unwrap_err();
        assert!(matches!(err, LedgerError::ReservedCharacter('|')));
    }

    #[test]
    fn signed_display_uses_two_decimals() {
        let income = Record::new(date(), "Pay", RecordKind::Income, Decimal::new(1000, 0)).unwrap();
        let expense =
            Record::new(date(), "Food", RecordKind::Expense, Decimal::new(2505, 1)).unwrap();
        assert_eq!(income.signed_display(), "+1000.00");
        assert_eq!(expense.signed_display(), "-250.50");
        assert_eq!(expense.signed_amount(), Decimal::new(-2505, 1));
    }

    #[test]
    fn equality_ignores_the_in_memory_id() {
        let a = Record::new(date(), "Pay", RecordKind::Income, Decimal::new(10, 0)).unwrap();
        let b = Record::new(date(), "Pay", RecordKind::Income, Decimal::new(1000, 2)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn kind_parsing_is_lenient_for_users_and_strict_for_files() {
        assert_eq!("IN".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!("expense".parse::<RecordKind>().unwrap(), RecordKind::Expense);
        assert!("transfer".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::from_token("out"), Some(RecordKind::Expense));
        assert_eq!(RecordKind::from_token("OUT"), None);
    }

    #[test]
    fn key_matches_on_rendered_signed_amount() {
        let record =
            Record::new(date(), "Groceries", RecordKind::Expense, Decimal::new(4210, 2)).unwrap();
        assert!(RecordKey::new("2024-03-09", "Groceries", "-42.10").matches(&record));
        assert!(!RecordKey::new("2024-03-09", "Groceries", "+42.10").matches(&record));
        assert!(!RecordKey::new("2024-03-10", "Groceries", "-42.10").matches(&record));
        assert!(RecordKey::for_record(&record).matches(&record));
    }
}
