use std::collections::HashMap;
use std::sync::Arc;

use stockbook_core::LedgerError;
use stockbook_ledger::{replay, replay_key, StockKey};

use crate::ledger_store::LedgerStore;

/// Derived stock views: live aggregation over the ledger.
///
/// Every figure returned here is a fresh fold over the store's entries, so
/// it is consistent with a full replay at the instant of the read. Callers
/// that need the read to stay authoritative through a subsequent append
/// (the validator's check-then-append) must run inside the per-key
/// serialization boundary; dashboard-style readers may observe a value that
/// is stale by the time they render it, which is acceptable.
#[derive(Debug)]
pub struct StockAggregator<S> {
    store: Arc<S>,
}

impl<S> Clone for StockAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> StockAggregator<S>
where
    S: LedgerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current on-hand quantity for one key; 0 when no entries exist.
    pub fn current_quantity(&self, key: StockKey) -> Result<i64, LedgerError> {
        let entries = self.store.entries_for(key)?;
        Ok(replay_key(&entries, key))
    }

    /// Quantities for every key the ledger has seen.
    pub fn snapshot_all(&self) -> Result<HashMap<StockKey, i64>, LedgerError> {
        let entries = self.store.all_entries()?;
        Ok(replay(&entries))
    }

    /// Keys at or below `threshold`, sorted for deterministic output.
    pub fn low_stock(&self, threshold: i64) -> Result<Vec<(StockKey, i64)>, LedgerError> {
        let mut hits: Vec<(StockKey, i64)> = self
            .snapshot_all()?
            .into_iter()
            .filter(|(_, quantity)| *quantity <= threshold)
            .collect();
        hits.sort_by_key(|(key, _)| *key);
        Ok(hits)
    }
}
