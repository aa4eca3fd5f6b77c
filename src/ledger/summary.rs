use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;

/// Calendar month bucket key; orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Display label with the calendar month name, e.g. `January 2024`.
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map(|month| month.name())
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub net: Decimal,
}

pub type DailySummary = BTreeMap<NaiveDate, Decimal>;
pub type MonthlySummary = BTreeMap<YearMonth, Decimal>;

/// Everything the analytics view needs in one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub totals: Totals,
    pub daily: DailySummary,
    pub monthly: MonthlySummary,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}
