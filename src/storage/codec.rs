//! Line-oriented text format: `date|description|kind|amount`, one record per line.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::{Record, RecordKind, DATE_FORMAT, DELIMITER};

const FIELD_COUNT: usize = 4;

/// Why a persisted line was left out of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FieldCount(usize),
    InvalidDate,
    InvalidKind,
    InvalidAmount,
    InvalidRecord(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount(found) => {
                write!(f, "expected {FIELD_COUNT} fields, found {found}")
            }
            SkipReason::InvalidDate => f.write_str("date is not YYYY-MM-DD"),
            SkipReason::InvalidKind => f.write_str("type is not `in` or `out`"),
            SkipReason::InvalidAmount => f.write_str("amount is not a decimal number"),
            SkipReason::InvalidRecord(message) => f.write_str(message),
        }
    }
}

/// A malformed line that was skipped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses every well-formed line, collecting the rest as [`SkippedLine`]s.
pub fn decode(raw: &str) -> DecodeReport {
    let mut report = DecodeReport::default();
    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match decode_line(trimmed) {
            Ok(record) => report.records.push(record),
            Err(reason) => report.skipped.push(SkippedLine {
                line_number: index + 1,
                content: line.to_string(),
                reason,
            }),
        }
    }
    report
}

fn decode_line(line: &str) -> Result<Record, SkipReason> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [date, description, kind, amount] = fields.as_slice() else {
        return Err(SkipReason::FieldCount(fields.len()));
    };
    let amount = Decimal::from_str(amount.trim()).map_err(|_| SkipReason::InvalidAmount)?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| SkipReason::InvalidDate)?;
    let kind = RecordKind::from_token(kind).ok_or(SkipReason::InvalidKind)?;
    Record::new(date, description, kind, amount)
        .map_err(|err| SkipReason::InvalidRecord(err.to_string()))
}

/// Renders one line per record, each newline-terminated.
pub fn encode<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_record(record));
        out.push('\n');
    }
    out
}

pub fn encode_record(record: &Record) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        record.date_string(),
        record.description(),
        record.kind().token(),
        record.amount(),
        d = DELIMITER
    )
}
