use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::MonthKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        category: String,
        amount: Decimal,
        date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id: None,
            kind,
            category,
            amount,
            date,
            description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Month the transaction falls in. Always derived from `date`.
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}
