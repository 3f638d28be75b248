#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn ledger() -> Ledger {
    Ledger::new(Database::open_in_memory().unwrap(), CategoryTable::default())
}

fn validation_error(err: &anyhow::Error) -> &ValidationError {
    err.downcast_ref::<ValidationError>().unwrap()
}

fn seed_january(ledger: &Ledger) {
    ledger
        .add_transaction(TransactionType::Income, "Salary", dec!(3000), date("2024-01-15"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(200), date("2024-01-20"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Expense, "Housing", dec!(1000), date("2024-01-05"), "")
        .unwrap();
}

// ── add / list / delete ───────────────────────────────────────

#[test]
fn test_add_is_immediately_listed() {
    let ledger = ledger();
    let id = ledger
        .add_transaction(
            TransactionType::Expense,
            "Food",
            dec!(12.34),
            date("2024-01-15"),
            "  lunch ",
        )
        .unwrap();

    let all = ledger.list_transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(id));
    assert_eq!(all[0].description, "lunch");

    let second = ledger
        .add_transaction(TransactionType::Income, "Gifts", dec!(5), date("2024-01-16"), "")
        .unwrap();
    assert_ne!(id, second);
}

#[test]
fn test_add_canonicalizes_category() {
    let ledger = ledger();
    ledger
        .add_transaction(TransactionType::Expense, "food", dec!(1), date("2024-01-01"), "")
        .unwrap();
    let all = ledger.list_transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(all[0].category, "Food");
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let ledger = ledger();
    for amount in [Decimal::ZERO, dec!(-5)] {
        let err = ledger
            .add_transaction(TransactionType::Expense, "Food", amount, date("2024-01-01"), "")
            .unwrap_err();
        assert_eq!(validation_error(&err), &ValidationError::NonPositiveAmount(amount));
    }
    assert_eq!(ledger.transaction_count().unwrap(), 0);
}

#[test]
fn test_add_rejects_category_of_other_type() {
    let ledger = ledger();
    let err = ledger
        .add_transaction(TransactionType::Income, "Food", dec!(10), date("2024-01-01"), "")
        .unwrap_err();
    assert_eq!(
        validation_error(&err),
        &ValidationError::UnknownCategory {
            kind: TransactionType::Income,
            category: "Food".into(),
        }
    );
    assert_eq!(err.to_string(), "'Food' is not a valid Income category");
    assert_eq!(ledger.transaction_count().unwrap(), 0);
}

#[test]
fn test_add_rejects_amount_above_ceiling() {
    let ledger = ledger();
    let huge = Decimal::MAX;
    let err = ledger
        .add_transaction(TransactionType::Expense, "Food", huge, date("2024-01-01"), "")
        .unwrap_err();
    assert_eq!(validation_error(&err), &ValidationError::AmountTooLarge(huge));
    assert_eq!(ledger.transaction_count().unwrap(), 0);
}

#[test]
fn test_add_rejects_sub_cent_amount() {
    let ledger = ledger();
    let err = ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(0.001), date("2024-01-01"), "")
        .unwrap_err();
    assert_eq!(validation_error(&err), &ValidationError::SubCentAmount(dec!(0.001)));

    // Trailing zeros are not extra precision.
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(1.500), date("2024-01-01"), "")
        .unwrap();
}

#[test]
fn test_report_at_amount_ceiling_does_not_overflow() {
    let ledger = ledger();
    let max = Decimal::from(MAX_AMOUNT);
    for _ in 0..3 {
        ledger
            .add_transaction(TransactionType::Expense, "Food", max, date("2024-01-10"), "")
            .unwrap();
    }
    ledger.set_budget("Food", dec!(0.01), month("2024-01")).unwrap();

    let report = ledger.get_report(month("2024-01")).unwrap();
    assert_eq!(report.summary.expenses, max * dec!(3));
    assert_eq!(report.budget_comparison[0].actual, max * dec!(3));
    assert!(report.budget_comparison[0].used_percent.is_some());
}

#[test]
fn test_delete_removes_transaction() {
    let ledger = ledger();
    let id = ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(1), date("2024-01-01"), "")
        .unwrap();
    ledger.delete_transaction(id).unwrap();
    assert!(ledger
        .list_transactions(&TransactionFilter::new())
        .unwrap()
        .is_empty());
}

#[test]
fn test_delete_nonexistent_is_silent() {
    let ledger = ledger();
    seed_january(&ledger);
    let before = ledger.list_transactions(&TransactionFilter::new()).unwrap();

    ledger.delete_transaction(424242).unwrap();

    let after = ledger.list_transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_list_category_filter_ignores_case() {
    let ledger = ledger();
    let id = ledger
        .add_transaction(TransactionType::Expense, "food", dec!(5), date("2024-01-01"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Income, "other", dec!(7), date("2024-01-02"), "")
        .unwrap();

    let food = ledger
        .list_transactions(&TransactionFilter::new().category("food"))
        .unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].id, Some(id));

    let other = ledger
        .list_transactions(&TransactionFilter::new().category("OTHER"))
        .unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].category, "Other");
}

#[test]
fn test_list_unknown_category_matches_nothing() {
    let ledger = ledger();
    seed_january(&ledger);
    let hits = ledger
        .list_transactions(&TransactionFilter::new().category("Groceries"))
        .unwrap();
    assert!(hits.is_empty());
}

// ── budgets ───────────────────────────────────────────────────

#[test]
fn test_set_budget_twice_keeps_latest() {
    let ledger = ledger();
    ledger.set_budget("Food", dec!(500), month("2024-01")).unwrap();
    ledger.set_budget("Food", dec!(650), month("2024-01")).unwrap();

    let budgets = ledger.get_budgets(month("2024-01")).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets["Food"], dec!(650));
}

#[test]
fn test_get_budgets_empty_month() {
    let ledger = ledger();
    ledger.set_budget("Food", dec!(500), month("2024-01")).unwrap();
    assert!(ledger.get_budgets(month("2024-02")).unwrap().is_empty());
}

#[test]
fn test_set_budget_rejects_income_category() {
    let ledger = ledger();
    let err = ledger
        .set_budget("Salary", dec!(500), month("2024-01"))
        .unwrap_err();
    assert!(matches!(
        validation_error(&err),
        ValidationError::UnknownCategory { .. }
    ));
}

#[test]
fn test_set_budget_rejects_non_positive() {
    let ledger = ledger();
    let err = ledger
        .set_budget("Food", Decimal::ZERO, month("2024-01"))
        .unwrap_err();
    assert_eq!(
        validation_error(&err),
        &ValidationError::NonPositiveBudget(Decimal::ZERO)
    );
    assert!(ledger.get_budgets(month("2024-01")).unwrap().is_empty());
}

#[test]
fn test_set_budget_rejects_amount_above_ceiling() {
    let ledger = ledger();
    let amount = Decimal::from(MAX_AMOUNT) + dec!(0.01);
    let err = ledger
        .set_budget("Food", amount, month("2024-01"))
        .unwrap_err();
    assert_eq!(validation_error(&err), &ValidationError::AmountTooLarge(amount));
}

// ── reports ───────────────────────────────────────────────────

#[test]
fn test_january_report_scenario() {
    let ledger = ledger();
    seed_january(&ledger);
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(40), date("2024-02-01"), "")
        .unwrap();
    ledger.set_budget("Food", dec!(500), month("2024-01")).unwrap();
    ledger.set_budget("Transport", dec!(100), month("2024-01")).unwrap();

    let report = ledger.get_report(month("2024-01")).unwrap();
    assert_eq!(report.transaction_count, 3);
    assert_eq!(report.summary.income, dec!(3000));
    assert_eq!(report.summary.expenses, dec!(1200));
    assert_eq!(report.summary.balance, dec!(1800));

    assert_eq!(report.expense_breakdown.len(), 2);
    assert_eq!(report.expense_breakdown["Food"], dec!(200));
    assert_eq!(report.expense_breakdown["Housing"], dec!(1000));
    assert_eq!(report.income_breakdown["Salary"], dec!(3000));

    // Housing has spending but no budget, so it is not compared.
    let lines = &report.budget_comparison;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].category, "Food");
    assert_eq!(lines[0].actual, dec!(200));
    assert_eq!(lines[0].remaining, dec!(300));
    assert_eq!(lines[0].used_percent, Some(dec!(40)));
    assert_eq!(lines[1].category, "Transport");
    assert_eq!(lines[1].actual, Decimal::ZERO);
    assert_eq!(lines[1].used_percent, Some(Decimal::ZERO));

    let days: Vec<NaiveDate> = report.daily_spending.iter().map(|d| d.date).collect();
    assert_eq!(days, vec![date("2024-01-05"), date("2024-01-20")]);
}

#[test]
fn test_report_includes_month_edges() {
    let ledger = ledger();
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(1), date("2024-02-01"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(2), date("2024-02-29"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(4), date("2024-03-01"), "")
        .unwrap();

    let report = ledger.get_report(month("2024-02")).unwrap();
    assert_eq!(report.summary.expenses, dec!(3));
}

#[test]
fn test_report_for_empty_month() {
    let ledger = ledger();
    let report = ledger.get_report(month("2030-01")).unwrap();
    assert_eq!(report.transaction_count, 0);
    assert_eq!(report.summary, report::PeriodSummary::default());
    assert!(report.budget_comparison.is_empty());
    assert!(report.daily_spending.is_empty());
}

#[test]
fn test_dashboard_over_range() {
    let ledger = ledger();
    seed_january(&ledger);
    ledger
        .add_transaction(TransactionType::Expense, "Transport", dec!(30), date("2024-02-03"), "")
        .unwrap();
    ledger
        .add_transaction(TransactionType::Expense, "Food", dec!(99), date("2024-03-01"), "")
        .unwrap();

    let dash = ledger
        .dashboard(date("2024-01-10"), date("2024-02-29"))
        .unwrap();
    assert_eq!(dash.transaction_count, 3);
    assert_eq!(dash.summary.income, dec!(3000));
    assert_eq!(dash.summary.expenses, dec!(230));
    assert_eq!(dash.monthly_trend.len(), 2);
    assert_eq!(dash.monthly_trend[0].month, month("2024-01"));
    assert_eq!(dash.monthly_trend[1].expense, dec!(30));
    assert!(!dash.expense_breakdown.contains_key("Housing"));
}
