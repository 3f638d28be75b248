use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::db::Database;
use crate::error::ValidationError;
use crate::models::{Budget, CategoryTable, MonthKey, Transaction, TransactionType};
use crate::query::TransactionFilter;
use crate::report::{self, Dashboard, MonthlyReport};

/// Largest amount accepted for a transaction or budget, in whole currency units.
pub(crate) const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Validated access to the transaction and budget stores.
pub(crate) struct Ledger {
    db: Database,
    categories: CategoryTable,
}

impl Ledger {
    pub(crate) fn new(db: Database, categories: CategoryTable) -> Self {
        Self { db, categories }
    }

    pub(crate) fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Record a transaction and return its id.
    ///
    /// The category is matched case-insensitively against the allowed set for
    /// `kind` and stored with its canonical spelling.
    pub(crate) fn add_transaction(
        &self,
        kind: TransactionType,
        category: &str,
        amount: Decimal,
        date: NaiveDate,
        description: &str,
    ) -> Result<i64> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount).into());
        }
        check_amount_bounds(amount)?;
        let category = self.resolve_category(kind, category)?;

        let txn = Transaction::new(
            kind,
            category.to_string(),
            amount,
            date,
            description.trim().to_string(),
        );
        let id = self.db.insert_transaction(&txn)?;
        tracing::info!(id, %kind, category, %amount, %date, "transaction added");
        Ok(id)
    }

    /// Delete by id. An unknown id is not an error.
    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        if self.db.delete_transaction(id)? {
            tracing::info!(id, "transaction deleted");
        } else {
            tracing::debug!(id, "delete ignored, no such transaction");
        }
        Ok(())
    }

    /// List matching transactions, newest first.
    ///
    /// A category filter matches case-insensitively, like `add_transaction`.
    /// A name outside the category table is queried verbatim.
    pub(crate) fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut filter = filter.clone();
        if let Some(name) = filter.category.take() {
            let category = match self.categories.canonical(&name) {
                Some(canonical) => canonical.to_string(),
                None => {
                    tracing::warn!(
                        category = name.as_str(),
                        "filtering on a category outside the configured table"
                    );
                    name
                }
            };
            filter.category = Some(category);
        }
        let txns = self.db.get_transactions(&filter)?;
        tracing::debug!(?filter, count = txns.len(), "transactions listed");
        Ok(txns)
    }

    pub(crate) fn transaction_count(&self) -> Result<i64> {
        self.db.get_transaction_count()
    }

    /// Set the spending ceiling for an expense category in `month`, replacing any previous value.
    pub(crate) fn set_budget(&self, category: &str, amount: Decimal, month: MonthKey) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveBudget(amount).into());
        }
        check_amount_bounds(amount)?;
        let category = self.resolve_category(TransactionType::Expense, category)?;

        self.db
            .upsert_budget(&Budget::new(category.to_string(), month, amount))?;
        tracing::info!(category, %month, %amount, "budget set");
        Ok(())
    }

    pub(crate) fn get_budgets(&self, month: MonthKey) -> Result<BTreeMap<String, Decimal>> {
        Ok(self
            .db
            .get_budgets(month)?
            .into_iter()
            .map(|b| (b.category, b.amount))
            .collect())
    }

    pub(crate) fn get_report(&self, month: MonthKey) -> Result<MonthlyReport> {
        let txns = self.list_transactions(&TransactionFilter::for_month(month))?;
        let budgets = self.get_budgets(month)?;
        let expense_breakdown = report::category_breakdown(&txns, TransactionType::Expense);

        Ok(MonthlyReport {
            month,
            transaction_count: txns.len(),
            summary: report::period_summary(&txns),
            budget_comparison: report::reconcile(&budgets, &expense_breakdown),
            daily_spending: report::daily_spending(&txns),
            income_breakdown: report::category_breakdown(&txns, TransactionType::Income),
            expense_breakdown,
        })
    }

    pub(crate) fn dashboard(&self, start: NaiveDate, end: NaiveDate) -> Result<Dashboard> {
        let txns = self.list_transactions(&TransactionFilter::between(start, end))?;
        Ok(Dashboard {
            start,
            end,
            transaction_count: txns.len(),
            summary: report::period_summary(&txns),
            monthly_trend: report::monthly_trend(&txns),
            expense_breakdown: report::category_breakdown(&txns, TransactionType::Expense),
        })
    }

    fn resolve_category(&self, kind: TransactionType, category: &str) -> Result<&str> {
        self.categories.resolve(kind, category).ok_or_else(|| {
            ValidationError::UnknownCategory {
                kind,
                category: category.to_string(),
            }
            .into()
        })
    }
}

/// Amounts are whole cents no larger than `MAX_AMOUNT`, which keeps every
/// aggregate sum far below `Decimal::MAX`.
fn check_amount_bounds(amount: Decimal) -> Result<(), ValidationError> {
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::SubCentAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
