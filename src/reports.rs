//! Read-only aggregations over the transaction history.
//!
//! Everything here is a pure function of its inputs: no mutation, no
//! clock access, identical output for identical input. Amount sums stay
//! in integer minor units; only the final percentage steps round through
//! `f64`, since percentages are ratios rather than currency.

use chrono::{Duration, NaiveDate};

use crate::domain::{Budget, Month, Transaction, TransactionKind};
use crate::store::Store;

/// Total expense per category, descending by amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount_minor: i64,
}

/// Spend measured against a budget's monthly limit. `remaining_minor`
/// goes negative on overspend; display clamping is the caller's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetUsage {
    pub spent_minor: i64,
    pub remaining_minor: i64,
    pub percentage: i64,
}

/// Income and expense totals for one month of a trend series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyFlow {
    pub month: Month,
    pub income_minor: i64,
    pub expense_minor: i64,
}

/// Expense total for one 7-day window of a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub expense_minor: i64,
}

/// Transactions of one calendar day, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub transactions: Vec<&'a Transaction>,
}

pub fn monthly_income(transactions: &[Transaction], month: Month) -> i64 {
    sum_kind(transactions, TransactionKind::Income, month)
}

pub fn monthly_expense(transactions: &[Transaction], month: Month) -> i64 {
    sum_kind(transactions, TransactionKind::Expense, month)
}

fn sum_kind(transactions: &[Transaction], kind: TransactionKind, month: Month) -> i64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind && month.contains(t.date))
        .map(|t| t.amount_minor)
        .sum()
}

/// Expense totals grouped by category for the month, descending by
/// amount with ties broken by name for a stable order.
pub fn category_breakdown(transactions: &[Transaction], month: Month) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && month.contains(t.date))
    {
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(entry) => entry.amount_minor += txn.amount_minor,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                amount_minor: txn.amount_minor,
            }),
        }
    }
    totals.sort_by(|a, b| {
        b.amount_minor
            .cmp(&a.amount_minor)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

/// Expense total for one category in one month.
pub fn budget_spent(transactions: &[Transaction], category: &str, month: Month) -> i64 {
    transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionKind::Expense && t.category == category && month.contains(t.date)
        })
        .map(|t| t.amount_minor)
        .sum()
}

pub fn budget_usage(transactions: &[Transaction], budget: &Budget) -> BudgetUsage {
    let spent = budget_spent(transactions, &budget.category, budget.month);
    let limit = budget.monthly_limit_minor;
    let percentage = if limit == 0 {
        0
    } else {
        (spent as f64 / limit as f64 * 100.0).round() as i64
    };
    BudgetUsage {
        spent_minor: spent,
        remaining_minor: limit - spent,
        percentage,
    }
}

/// Income/expense totals for the trailing `n_months` ending at `end`,
/// oldest first.
pub fn monthly_trend(transactions: &[Transaction], end: Month, n_months: usize) -> Vec<MonthlyFlow> {
    let mut months = Vec::with_capacity(n_months);
    let mut cursor = end;
    for _ in 0..n_months {
        months.push(cursor);
        cursor = cursor.pred();
    }
    months.reverse();
    months
        .into_iter()
        .map(|month| MonthlyFlow {
            month,
            income_minor: monthly_income(transactions, month),
            expense_minor: monthly_expense(transactions, month),
        })
        .collect()
}

/// Expense totals over consecutive 7-day windows counted from the 1st of
/// the month (not calendar weeks); the final window is truncated to the
/// month's last day.
pub fn weekly_breakdown(transactions: &[Transaction], month: Month) -> Vec<WeeklyWindow> {
    let last = month.last_day();
    let mut windows = Vec::new();
    let mut start = month.first_day();
    while start <= last {
        let end = (start + Duration::days(6)).min(last);
        let expense = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.date >= start && t.date <= end)
            .map(|t| t.amount_minor)
            .sum();
        windows.push(WeeklyWindow {
            start,
            end,
            expense_minor: expense,
        });
        start = end + Duration::days(1);
    }
    windows
}

/// Sum of all wallet balances plus all standalone asset values.
pub fn total_assets(store: &Store) -> i64 {
    let wallets: i64 = store.wallets().iter().map(|w| w.balance_minor).sum();
    let assets: i64 = store.assets().iter().map(|a| a.value_minor).sum();
    wallets + assets
}

/// Percentage of income left after expenses, rounded to a whole percent;
/// zero income yields zero.
pub fn savings_rate(income_minor: i64, expense_minor: i64) -> i64 {
    if income_minor == 0 {
        return 0;
    }
    ((income_minor - expense_minor) as f64 / income_minor as f64 * 100.0).round() as i64
}

/// Buckets transactions per calendar day, days descending, each bucket
/// descending by recording time.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DayGroup<'_>> {
    let mut groups: Vec<DayGroup<'_>> = Vec::new();
    for txn in transactions {
        match groups.iter_mut().find(|g| g.date == txn.date) {
            Some(group) => group.transactions.push(txn),
            None => groups.push(DayGroup {
                date: txn.date,
                transactions: vec![txn],
            }),
        }
    }
    for group in &mut groups {
        group.transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn txn(kind: TransactionKind, amount: i64, category: &str, d: NaiveDate) -> Transaction {
        Transaction::new(kind, amount, category, Uuid::new_v4(), d)
    }

    fn may_2024_sample() -> Vec<Transaction> {
        vec![
            txn(TransactionKind::Income, 10_000_000, "salary", date(2024, 5, 1)),
            txn(TransactionKind::Expense, 2_000_000, "food", date(2024, 5, 8)),
            txn(TransactionKind::Expense, 1_000_000, "transport", date(2024, 5, 20)),
            txn(TransactionKind::Expense, 999, "food", date(2024, 6, 1)),
            txn(TransactionKind::Income, 42, "salary", date(2024, 4, 30)),
        ]
    }

    #[test]
    fn monthly_sums_respect_month_bounds() {
        let txns = may_2024_sample();
        assert_eq!(monthly_income(&txns, month(2024, 5)), 10_000_000);
        assert_eq!(monthly_expense(&txns, month(2024, 5)), 3_000_000);
        assert_eq!(monthly_expense(&txns, month(2024, 4)), 0);
    }

    #[test]
    fn breakdown_sorts_descending() {
        let breakdown = category_breakdown(&may_2024_sample(), month(2024, 5));
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "food");
        assert_eq!(breakdown[0].amount_minor, 2_000_000);
        assert_eq!(breakdown[1].category, "transport");
        assert_eq!(breakdown[1].amount_minor, 1_000_000);
    }

    #[test]
    fn breakdown_breaks_ties_by_name() {
        let txns = vec![
            txn(TransactionKind::Expense, 100, "zeta", date(2024, 5, 1)),
            txn(TransactionKind::Expense, 100, "alpha", date(2024, 5, 2)),
        ];
        let breakdown = category_breakdown(&txns, month(2024, 5));
        assert_eq!(breakdown[0].category, "alpha");
        assert_eq!(breakdown[1].category, "zeta");
    }

    #[test]
    fn budget_usage_reports_overspend_as_negative_remaining() {
        let txns = may_2024_sample();
        let budget = Budget::new("food", 1_500_000, month(2024, 5));
        let usage = budget_usage(&txns, &budget);
        assert_eq!(usage.spent_minor, 2_000_000);
        assert_eq!(usage.remaining_minor, -500_000);
        assert_eq!(usage.percentage, 133);
    }

    #[test]
    fn trend_covers_trailing_months_in_order() {
        let txns = may_2024_sample();
        let trend = monthly_trend(&txns, month(2024, 5), 3);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].month, month(2024, 3));
        assert_eq!(trend[1].month, month(2024, 4));
        assert_eq!(trend[1].income_minor, 42);
        assert_eq!(trend[2].month, month(2024, 5));
        assert_eq!(trend[2].expense_minor, 3_000_000);
    }

    #[test]
    fn trend_crosses_year_boundary() {
        let trend = monthly_trend(&[], month(2024, 1), 2);
        assert_eq!(trend[0].month, month(2023, 12));
        assert_eq!(trend[1].month, month(2024, 1));
    }

    #[test]
    fn weekly_windows_start_from_the_first_and_truncate() {
        let txns = vec![
            txn(TransactionKind::Expense, 70, "food", date(2024, 5, 1)),
            txn(TransactionKind::Expense, 700, "food", date(2024, 5, 7)),
            txn(TransactionKind::Expense, 7_000, "food", date(2024, 5, 8)),
            txn(TransactionKind::Expense, 70_000, "food", date(2024, 5, 31)),
        ];
        let windows = weekly_breakdown(&txns, month(2024, 5));
        assert_eq!(windows.len(), 5);
        assert_eq!(windows[0].start, date(2024, 5, 1));
        assert_eq!(windows[0].end, date(2024, 5, 7));
        assert_eq!(windows[0].expense_minor, 770);
        assert_eq!(windows[1].expense_minor, 7_000);
        assert_eq!(windows[4].start, date(2024, 5, 29));
        assert_eq!(windows[4].end, date(2024, 5, 31));
        assert_eq!(windows[4].expense_minor, 70_000);
    }

    #[test]
    fn savings_rate_handles_zero_income() {
        assert_eq!(savings_rate(0, 5_000), 0);
        assert_eq!(savings_rate(10_000_000, 3_000_000), 70);
        assert_eq!(savings_rate(1_000, 1_500), -50);
    }

    #[test]
    fn group_by_date_orders_days_and_entries_descending() {
        let mut first = txn(TransactionKind::Expense, 1, "food", date(2024, 5, 2));
        let mut second = txn(TransactionKind::Expense, 2, "food", date(2024, 5, 2));
        let other_day = txn(TransactionKind::Income, 3, "salary", date(2024, 5, 9));
        first.created_at = chrono::DateTime::from_timestamp(1_000, 0).unwrap();
        second.created_at = chrono::DateTime::from_timestamp(2_000, 0).unwrap();

        let txns = [first.clone(), second.clone(), other_day.clone()];
        let groups = group_by_date(&txns);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date(2024, 5, 9));
        assert_eq!(groups[1].date, date(2024, 5, 2));
        assert_eq!(groups[1].transactions[0].id, second.id);
        assert_eq!(groups[1].transactions[1].id, first.id);
    }

    #[test]
    fn aggregations_are_pure() {
        let txns = may_2024_sample();
        assert_eq!(
            category_breakdown(&txns, month(2024, 5)),
            category_breakdown(&txns, month(2024, 5))
        );
        assert_eq!(
            monthly_trend(&txns, month(2024, 5), 6),
            monthly_trend(&txns, month(2024, 5), 6)
        );
    }
}
