use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionType;

/// Input rejected before it reaches the store. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than 0 (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Budget amount must be greater than 0 (got {0})")]
    NonPositiveBudget(Decimal),
    #[error("Amount {0} exceeds the maximum of {max}", max = crate::ledger::MAX_AMOUNT)]
    AmountTooLarge(Decimal),
    #[error("Amount {0} has more than two decimal places")]
    SubCentAmount(Decimal),
    #[error("'{category}' is not a valid {kind} category")]
    UnknownCategory {
        kind: TransactionType,
        category: String,
    },
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Invalid transaction type '{0}', expected Income or Expense")]
    InvalidType(String),
}
