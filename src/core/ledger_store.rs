use std::sync::Arc;

use crate::{
    core::time::Clock,
    errors::{LedgerError, Result},
    ledger::{transaction::generate_id, NewTransaction, Transaction, TransactionPatch},
    storage::LedgerPersistence,
};

/// Owns the canonical transaction list and mirrors it into persistence.
///
/// Every mutation is staged on a copy, persisted, and only then committed, so
/// a failed validation or write leaves memory and storage in agreement.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    persistence: LedgerPersistence,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Loads whatever the persistence layer holds and takes ownership of it.
    pub fn open(persistence: LedgerPersistence, clock: Arc<dyn Clock>) -> Result<Self> {
        let transactions = persistence.load()?;
        tracing::info!(count = transactions.len(), "ledger opened");
        Ok(Self {
            transactions,
            persistence,
            clock,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn add(&mut self, input: NewTransaction) -> Result<Transaction> {
        let txn = input.into_transaction(self.clock.now())?;
        let mut next = self.transactions.clone();
        next.push(txn.clone());
        self.commit(next)?;
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction added");
        Ok(txn)
    }

    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> Result<Transaction> {
        let mut next = self.transactions.clone();
        let txn = next
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        patch.apply(txn);
        let updated = txn.clone();
        self.commit(next)?;
        tracing::info!(id, "transaction updated");
        Ok(updated)
    }

    /// Removes the transaction if present. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let mut next = self.transactions.clone();
        next.retain(|txn| txn.id != id);
        let removed = next.len() != self.transactions.len();
        self.commit(next)?;
        if removed {
            tracing::info!(id, "transaction removed");
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        tracing::info!("ledger cleared");
        Ok(())
    }

    /// Appends a batch, keeping each item's fields but assigning fresh ids.
    pub fn bulk_append(&mut self, batch: Vec<Transaction>) -> Result<usize> {
        let mut next = self.transactions.clone();
        let count = batch.len();
        for mut txn in batch {
            txn.id = generate_id();
            txn.validate()?;
            next.push(txn);
        }
        self.commit(next)?;
        tracing::info!(count, "transactions appended");
        Ok(count)
    }

    /// Rewrites the stored copy from memory.
    pub fn persist(&self) -> Result<()> {
        self.persistence.save(&self.transactions)
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        self.persistence.save(&next)?;
        self.transactions = next;
        Ok(())
    }
}
