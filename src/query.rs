use chrono::NaiveDate;

use crate::models::{MonthKey, Transaction, TransactionType};

/// Selector value that disables the category or type filter.
pub(crate) const ALL: &str = "All";

/// Predicates for listing transactions. Every bound is inclusive and every
/// unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TransactionFilter {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
    pub(crate) category: Option<String>,
    pub(crate) kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new().since(start).until(end)
    }

    /// Whole calendar month, first through last day.
    pub(crate) fn for_month(month: MonthKey) -> Self {
        Self::between(month.first_day(), month.last_day())
    }

    pub(crate) fn since(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub(crate) fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// `"All"` (any case) clears the filter.
    pub(crate) fn category(mut self, category: &str) -> Self {
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub(crate) fn kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    /// Build the WHERE clause and its positional parameters.
    pub(crate) fn to_sql(&self) -> (String, Vec<Box<dyn rusqlite::types::ToSql>>) {
        let mut sql = String::from(" WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(start) = self.start {
            sql.push_str(&format!(" AND t.date >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(start));
        }
        if let Some(end) = self.end {
            sql.push_str(&format!(" AND t.date <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(end));
        }
        if let Some(category) = &self.category {
            sql.push_str(&format!(" AND t.category = ?{}", param_values.len() + 1));
            param_values.push(Box::new(category.clone()));
        }
        if let Some(kind) = self.kind {
            sql.push_str(&format!(" AND t.type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(kind.as_str()));
        }

        (sql, param_values)
    }

    /// Same predicate as [`to_sql`](Self::to_sql), applied in memory.
    #[cfg(test)]
    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        self.start.map_or(true, |s| txn.date >= s)
            && self.end.map_or(true, |e| txn.date <= e)
            && self.category.as_deref().map_or(true, |c| txn.category == c)
            && self.kind.map_or(true, |k| txn.kind == k)
    }
}
