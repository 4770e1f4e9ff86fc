//! Command surface handed to the presentation layer.

use std::sync::Arc;

use crate::{
    config::Config,
    core::{
        ledger_store::LedgerStore,
        sample::sample_batch,
        services::{ExportService, LedgerView, MonthlySeries, QueryService, SeriesService, ViewFilter},
        time::{Clock, SystemClock},
    },
    errors::Result,
    ledger::{NewTransaction, Transaction, TransactionPatch},
    storage::{JsonFileStore, KeyValueStore, LedgerPersistence},
};

/// One open ledger plus the settings and clock its commands run against.
pub struct LedgerSession {
    store: LedgerStore,
    clock: Arc<dyn Clock>,
    months_back: usize,
}

impl LedgerSession {
    pub fn open(
        store: Box<dyn KeyValueStore>,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let persistence = LedgerPersistence::with_key(store, config.storage_key.clone());
        let store = LedgerStore::open(persistence, Arc::clone(&clock))?;
        Ok(Self {
            store,
            clock,
            months_back: config.effective_months_back(),
        })
    }

    /// Opens a file-backed session in the configured data directory.
    pub fn open_default(config: &Config) -> Result<Self> {
        let store = JsonFileStore::new(config.resolve_data_dir())?;
        Self::open(Box::new(store), config, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> Result<Transaction> {
        self.store.add(input)
    }

    pub fn update_transaction(&mut self, id: &str, patch: &TransactionPatch) -> Result<Transaction> {
        self.store.update(id, patch)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        self.store.remove(id).map(|_| ())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()
    }

    /// Appends the demo batch dated around today.
    pub fn load_sample_data(&mut self) -> Result<usize> {
        let batch = sample_batch(self.clock.today(), self.clock.now());
        self.store.bulk_append(batch)
    }

    pub fn get_view(&self, filter: &ViewFilter) -> LedgerView {
        QueryService::query(self.store.transactions(), filter)
    }

    pub fn get_monthly_series(&self) -> MonthlySeries {
        SeriesService::monthly_series(self.store.transactions(), self.clock.today(), self.months_back)
    }

    pub fn export_csv(&self) -> Result<String> {
        ExportService::to_csv(self.store.transactions())
    }

    /// Ends the session after a final write of the ledger.
    pub fn close(self) -> Result<()> {
        self.store.persist()?;
        tracing::info!(count = self.store.len(), "ledger closed");
        Ok(())
    }
}
