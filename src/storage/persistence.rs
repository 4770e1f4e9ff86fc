//! Reads and writes the whole transaction collection as one JSON blob.

use std::collections::HashSet;

use super::KeyValueStore;
use crate::{
    errors::{LedgerError, Result},
    ledger::Transaction,
};

/// Storage key used when no other is configured.
pub const DEFAULT_STORAGE_KEY: &str = "pf_tracker_tx_v1";

/// Persistence adapter between the ledger and a [`KeyValueStore`].
pub struct LedgerPersistence {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl LedgerPersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Loads the stored ledger. Missing data yields an empty ledger; so does a
    /// blob that is not a transaction list, after a warning. Individual
    /// records that break ledger rules are dropped and the rest kept.
    pub fn load(&self) -> Result<Vec<Transaction>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match decode_ledger(&raw) {
            Ok(transactions) => {
                tracing::debug!(key = %self.key, count = transactions.len(), "ledger loaded");
                Ok(transactions)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding stored ledger");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the stored blob with the full ledger.
    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = transactions.len(), "ledger persisted");
        Ok(())
    }
}

fn decode_ledger(raw: &str) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(raw)
        .map_err(|err| LedgerError::StorageCorruption(err.to_string()))?;
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(transactions.len());
    for txn in transactions {
        if let Err(err) = txn.validate() {
            tracing::warn!(id = %txn.id, error = %err, "skipping invalid stored record");
            continue;
        }
        if !seen.insert(txn.id.clone()) {
            tracing::warn!(id = %txn.id, "skipping stored record with duplicate id");
            continue;
        }
        kept.push(txn);
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ledger::TransactionKind, storage::MemoryStore};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn persistence() -> (LedgerPersistence, MemoryStore) {
        let store = MemoryStore::new();
        (LedgerPersistence::new(Box::new(store.clone())), store)
    }

    fn sample() -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            450.0,
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
        )
        .with_description("Lunch")
    }

    #[test]
    fn absent_blob_loads_empty() {
        let (persistence, _) = persistence();
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (persistence, store) = persistence();
        let txn = sample();
        persistence.save(std::slice::from_ref(&txn)).unwrap();
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_some());
        assert_eq!(persistence.load().unwrap(), vec![txn]);
    }

    #[test]
    fn corrupt_blobs_load_empty() {
        let (persistence, store) = persistence();
        for raw in [
            "not json",
            "{\"id\":\"a\"}",
            "[{\"id\":\"a\",\"type\":\"gift\"}]",
        ] {
            store.set(DEFAULT_STORAGE_KEY, raw).unwrap();
            assert!(persistence.load().unwrap().is_empty(), "{raw} should load empty");
        }
    }

    #[test]
    fn invalid_records_are_dropped_and_the_rest_kept() {
        let (persistence, store) = persistence();
        let good = sample();
        let raw = format!(
            "[{},{}]",
            serde_json::to_string(&good).unwrap(),
            r#"{"id":"bad","type":"income","amount":-1,"category":"X",
               "date":"2024-01-01","created":"2024-01-01T00:00:00Z"}"#
        );
        store.set(DEFAULT_STORAGE_KEY, &raw).unwrap();
        assert_eq!(persistence.load().unwrap(), vec![good]);
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let (persistence, store) = persistence();
        let first = sample();
        let mut second = sample().with_description("Dinner");
        second.id = first.id.clone();
        let json = serde_json::to_string(&vec![first.clone(), second]).unwrap();
        store.set(DEFAULT_STORAGE_KEY, &json).unwrap();
        assert_eq!(persistence.load().unwrap(), vec![first]);
    }

    #[test]
    fn custom_key_is_used() {
        let store = MemoryStore::new();
        let persistence = LedgerPersistence::with_key(Box::new(store.clone()), "other");
        persistence.save(&[]).unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }
}
