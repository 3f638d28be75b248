use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Budget vs actual spending for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetLine {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) actual: Decimal,
    pub(crate) remaining: Decimal,
    /// `None` when the budget is zero but money was spent. Saturates at
    /// `Decimal::MAX` when the ratio does not fit.
    pub(crate) used_percent: Option<Decimal>,
}

/// Compare each budgeted category with what was actually spent.
///
/// Only categories that have a budget are reported; spending in unbudgeted
/// categories is left out. A budgeted category with no spending counts as 0.
/// Lines come out in category order.
pub(crate) fn reconcile(
    budgets: &BTreeMap<String, Decimal>,
    actual_by_category: &BTreeMap<String, Decimal>,
) -> Vec<BudgetLine> {
    budgets
        .iter()
        .map(|(category, &budget)| {
            let actual = actual_by_category
                .get(category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            BudgetLine {
                category: category.clone(),
                budget,
                actual,
                remaining: budget - actual,
                used_percent: used_percent(budget, actual),
            }
        })
        .collect()
}

fn used_percent(budget: Decimal, actual: Decimal) -> Option<Decimal> {
    if budget.is_zero() {
        return actual.is_zero().then_some(Decimal::ZERO);
    }
    let percent = actual
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX);
    Some(percent)
}
