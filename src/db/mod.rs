mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::models::*;
use crate::query::TransactionFilter;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .context("Failed to read schema version")?;

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying schema migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO transactions (type, category, amount, date, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.kind.as_str(),
                    txn.category,
                    txn.amount.to_string(),
                    txn.date,
                    txn.description,
                ],
            )
            .context("Failed to insert transaction")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns whether a row was removed.
    pub(crate) fn delete_transaction(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete transaction {id}"))?;
        Ok(removed > 0)
    }

    /// Matching transactions, newest date first. Same-day rows come out newest insert first.
    pub(crate) fn get_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let (where_clause, param_values) = filter.to_sql();
        let sql = format!(
            "SELECT t.id, t.type, t.category, t.amount, t.date, t.description
             FROM transactions t{where_clause}
             ORDER BY t.date DESC, t.id DESC"
        );

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), row_to_transaction)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read transactions")
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Insert or overwrite the budget for (category, month) in one statement.
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO budgets (category, amount, month)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(category, month) DO UPDATE SET amount = excluded.amount",
                params![
                    budget.category,
                    budget.amount.to_string(),
                    budget.month.to_string(),
                ],
            )
            .with_context(|| {
                format!(
                    "Failed to save budget for {} in {}",
                    budget.category, budget.month
                )
            })?;
        Ok(())
    }

    pub(crate) fn get_budgets(&self, month: MonthKey) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, amount, month FROM budgets WHERE month = ?1 ORDER BY category",
        )?;
        let rows = stmt.query_map(params![month.to_string()], |row| {
            let month_str: String = row.get(2)?;
            Ok(Budget {
                category: row.get(0)?,
                amount: decimal_column(row, 1)?,
                month: MonthKey::from_str(&month_str).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                })?,
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read budgets for {month}"))
    }

    #[cfg(test)]
    pub(crate) fn get_budget_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let type_str: String = row.get(1)?;
    let kind = TransactionType::parse(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            Box::new(ValidationError::InvalidType(type_str.clone())),
        )
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        kind,
        category: row.get(2)?,
        amount: decimal_column(row, 3)?,
        date: row.get(4)?,
        description: row.get(5)?,
    })
}

/// Amounts are stored as TEXT so they round-trip exactly.
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
