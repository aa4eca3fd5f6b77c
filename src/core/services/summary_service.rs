use rust_decimal::Decimal;

use crate::ledger::{
    DailySummary, Ledger, MonthlySummary, RecordKind, Summary, Totals, YearMonth,
};

/// Aggregations over the whole ledger.
pub struct SummaryService;

impl SummaryService {
    pub fn totals(ledger: &Ledger) -> Totals {
        let mut totals = Totals::default();
        for record in ledger {
            match record.kind() {
                RecordKind::Income => totals.income_total += record.amount(),
                RecordKind::Expense => totals.expense_total += record.amount(),
            }
        }
        totals.net = totals.income_total - totals.expense_total;
        totals
    }

    /// Signed sum per exact date, ascending.
    pub fn daily_summary(ledger: &Ledger) -> DailySummary {
        let mut daily = DailySummary::new();
        for record in ledger {
            *daily.entry(record.date()).or_insert(Decimal::ZERO) += record.signed_amount();
        }
        daily
    }

    /// Signed sum per calendar month, ascending.
    pub fn monthly_summary(ledger: &Ledger) -> MonthlySummary {
        let mut monthly = MonthlySummary::new();
        for record in ledger {
            *monthly
                .entry(YearMonth::of(record.date()))
                .or_insert(Decimal::ZERO) += record.signed_amount();
        }
        monthly
    }

    pub fn summarize(ledger: &Ledger) -> Summary {
        Summary {
            totals: Self::totals(ledger),
            daily: Self::daily_summary(ledger),
            monthly: Self::monthly_summary(ledger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Record;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), kind: RecordKind, cents: i64) -> Record {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Record::new(date, "entry", kind, Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let summary = SummaryService::summarize(&Ledger::new());
        assert_eq!(summary.totals, Totals::default());
        assert!(summary.daily.is_empty());
        assert!(summary.monthly.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn same_day_income_and_expense_net_out() {
        let ledger = Ledger::from_records(vec![
            record((2024, 4, 2), RecordKind::Income, 100000),
            record((2024, 4, 2), RecordKind::Expense, 25050),
        ]);
        let totals = SummaryService::totals(&ledger);
        assert_eq!(totals.income_total, Decimal::new(100000, 2));
        assert_eq!(totals.expense_total, Decimal::new(25050, 2));
        assert_eq!(totals.net, Decimal::new(74950, 2));

        let daily = SummaryService::daily_summary(&ledger);
        assert_eq!(daily.len(), 1);
        assert_eq!(
            daily[&NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()],
            Decimal::new(74950, 2)
        );
    }

    #[test]
    fn buckets_are_sparse_and_sorted_regardless_of_entry_order() {
        let ledger = Ledger::from_records(vec![
            record((2024, 3, 15), RecordKind::Expense, 500),
            record((2023, 12, 31), RecordKind::Income, 1000),
            record((2024, 3, 1), RecordKind::Income, 200),
        ]);
        let daily: Vec<_> = SummaryService::daily_summary(&ledger)
            .into_iter()
            .map(|(date, sum)| (date.to_string(), sum.to_string()))
            .collect();
        assert_eq!(
            daily,
            [
                ("2023-12-31".to_string(), "10.00".to_string()),
                ("2024-03-01".to_string(), "2.00".to_string()),
                ("2024-03-15".to_string(), "-5.00".to_string()),
            ]
        );

        let monthly: Vec<_> = SummaryService::monthly_summary(&ledger)
            .into_iter()
            .map(|(month, sum)| (month.to_string(), sum))
            .collect();
        assert_eq!(
            monthly,
            [
                ("2023-12".to_string(), Decimal::new(1000, 2)),
                ("2024-03".to_string(), Decimal::new(-300, 2)),
            ]
        );
    }

    #[test]
    fn buckets_reconcile_to_net() {
        let ledger = Ledger::from_records(vec![
            record((2024, 1, 1), RecordKind::Income, 1),
            record((2024, 1, 2), RecordKind::Expense, 33),
            record((2024, 2, 9), RecordKind::Income, 999_999),
            record((2025, 7, 4), RecordKind::Expense, 12_345),
        ]);
        let summary = SummaryService::summarize(&ledger);
        let daily_sum: Decimal = summary.daily.values().copied().sum();
        let monthly_sum: Decimal = summary.monthly.values().copied().sum();
        assert_eq!(daily_sum, summary.totals.net);
        assert_eq!(monthly_sum, summary.totals.net);
        assert_eq!(
            summary.totals.net,
            summary.totals.income_total - summary.totals.expense_total
        );
    }
}
