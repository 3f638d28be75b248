//! Pure aggregations over a slice of transactions.
//!
//! Sums are exact `Decimal` additions. Nothing here rounds; rounding to cents
//! happens only when a value is formatted for display.

mod reconcile;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{MonthKey, Transaction, TransactionType};

pub(crate) use reconcile::{reconcile, BudgetLine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PeriodSummary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotals {
    pub(crate) month: MonthKey,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DailyTotal {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
}

/// Everything shown for one month: totals, budget comparison, daily spend, breakdowns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyReport {
    pub(crate) month: MonthKey,
    pub(crate) transaction_count: usize,
    pub(crate) summary: PeriodSummary,
    pub(crate) budget_comparison: Vec<BudgetLine>,
    pub(crate) daily_spending: Vec<DailyTotal>,
    pub(crate) income_breakdown: BTreeMap<String, Decimal>,
    pub(crate) expense_breakdown: BTreeMap<String, Decimal>,
}

/// Overview of an arbitrary date range.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dashboard {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) transaction_count: usize,
    pub(crate) summary: PeriodSummary,
    pub(crate) monthly_trend: Vec<MonthlyTotals>,
    pub(crate) expense_breakdown: BTreeMap<String, Decimal>,
}

pub(crate) fn period_summary(transactions: &[Transaction]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    for txn in transactions {
        if txn.is_income() {
            summary.income += txn.amount;
        } else {
            summary.expenses += txn.amount;
        }
    }
    summary.balance = summary.income - summary.expenses;
    summary
}

/// Income and expense per month, oldest month first.
pub(crate) fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut by_month: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
    for txn in transactions {
        let entry = by_month.entry(txn.month()).or_default();
        match txn.kind {
            TransactionType::Income => entry.0 += txn.amount,
            TransactionType::Expense => entry.1 += txn.amount,
        }
    }

    by_month
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

/// Totals per category for one type. Categories with no transactions are absent.
pub(crate) fn category_breakdown(
    transactions: &[Transaction],
    kind: TransactionType,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        *totals.entry(txn.category.clone()).or_default() += txn.amount;
    }
    totals
}

/// Expense total per calendar day, earliest first.
pub(crate) fn daily_spending(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *by_day.entry(txn.date).or_default() += txn.amount;
    }
    by_day
        .into_iter()
        .map(|(date, amount)| DailyTotal { date, amount })
        .collect()
}
