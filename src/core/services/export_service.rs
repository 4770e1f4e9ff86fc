//! Flat CSV rendering of the ledger.
//!
//! Descriptions are wrapped in double quotes but embedded quotes and commas
//! are written as-is; consumers that need strict CSV must sanitise first.

use chrono::SecondsFormat;

use crate::{
    errors::{LedgerError, Result},
    ledger::Transaction,
};

pub const CSV_HEADER: &str = "id,type,amount,category,date,description,created";

pub struct ExportService;

impl ExportService {
    /// Renders every transaction in ledger order. Fails with
    /// [`LedgerError::EmptyLedger`] when there is nothing to export.
    pub fn to_csv(transactions: &[Transaction]) -> Result<String> {
        if transactions.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        let mut rows = Vec::with_capacity(transactions.len() + 1);
        rows.push(CSV_HEADER.to_string());
        rows.extend(transactions.iter().map(csv_row));
        Ok(rows.join("\n"))
    }
}

fn csv_row(txn: &Transaction) -> String {
    [
        txn.id.clone(),
        txn.kind.to_string(),
        txn.amount.to_string(),
        txn.category.clone(),
        txn.date.format("%Y-%m-%d").to_string(),
        format!("\"{}\"", txn.description_or_empty()),
        txn.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ]
    .join(",")
}
