use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 6] = ["id", "date", "type", "category", "amount", "description"];

/// Write transactions as CSV with a header row. Returns the number of data rows.
pub(crate) fn write_transactions<W: Write>(writer: W, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in txns {
        let id = txn.id.map(|id| id.to_string()).unwrap_or_default();
        let date = txn.date.format("%Y-%m-%d").to_string();
        let amount = txn.amount.to_string();
        wtr.write_record([
            id.as_str(),
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            amount.as_str(),
            txn.description.as_str(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}

pub(crate) fn export_to_csv(path: &Path, txns: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_transactions(file, txns)?;
    tracing::info!(path = %path.display(), count, "transactions exported");
    Ok(count)
}
