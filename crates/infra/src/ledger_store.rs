use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockbook_core::{EntryId, LedgerError};
use stockbook_ledger::{LedgerEntry, StockKey};

use crate::catalog_store::Catalog;

/// Durable, append-only log of stock movements.
///
/// `append` is the only mutation. Once an entry is appended it is visible
/// to all subsequent reads forever; there is no update and no delete.
/// Implementations must reject entries whose product or warehouse reference
/// is unknown with [`LedgerError::Reference`], and surface durability
/// failures as [`LedgerError::Storage`] (in which case the caller must not
/// assume the entry was persisted).
pub trait LedgerStore: Send + Sync {
    /// Append one immutable entry and return its id.
    fn append(&self, entry: LedgerEntry) -> Result<EntryId, LedgerError>;

    /// All entries for one (product, warehouse) key, oldest first.
    fn entries_for(&self, key: StockKey) -> Result<Vec<LedgerEntry>, LedgerError>;

    /// The full ledger in append order (oldest first). Presentation reads
    /// newest-first by convention; callers reverse as needed.
    fn all_entries(&self) -> Result<Vec<LedgerEntry>, LedgerError>;

    /// Number of committed entries.
    fn len(&self) -> Result<usize, LedgerError>;

    fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn append(&self, entry: LedgerEntry) -> Result<EntryId, LedgerError> {
        (**self).append(entry)
    }

    fn entries_for(&self, key: StockKey) -> Result<Vec<LedgerEntry>, LedgerError> {
        (**self).entries_for(key)
    }

    fn all_entries(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        (**self).all_entries()
    }

    fn len(&self) -> Result<usize, LedgerError> {
        (**self).len()
    }
}

#[derive(Debug, Default)]
struct Log {
    entries: Vec<LedgerEntry>,
    by_key: HashMap<StockKey, Vec<usize>>,
}

/// In-memory append-only ledger.
///
/// Holds the write lock only for the push itself; reference checks run
/// against the catalog first so a rejected entry never takes the lock.
pub struct InMemoryLedgerStore {
    refs: Arc<dyn Catalog>,
    log: RwLock<Log>,
}

impl InMemoryLedgerStore {
    pub fn new(refs: Arc<dyn Catalog>) -> Self {
        Self {
            refs,
            log: RwLock::new(Log::default()),
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn append(&self, entry: LedgerEntry) -> Result<EntryId, LedgerError> {
        if self.refs.product_by_id(entry.product_id)?.is_none() {
            return Err(LedgerError::reference(format!(
                "ledger entry references unknown product id {}",
                entry.product_id
            )));
        }
        if self.refs.warehouse_by_id(entry.warehouse_id)?.is_none() {
            return Err(LedgerError::reference(format!(
                "ledger entry references unknown warehouse id {}",
                entry.warehouse_id
            )));
        }

        let mut log = self
            .log
            .write()
            .map_err(|_| LedgerError::storage("ledger lock poisoned"))?;

        let entry_id = entry.entry_id;
        let index = log.entries.len();
        log.by_key.entry(entry.key()).or_default().push(index);
        tracing::debug!(
            entry_id = %entry_id,
            reason = %entry.reason,
            change_amount = entry.change_amount,
            "ledger entry appended"
        );
        log.entries.push(entry);

        Ok(entry_id)
    }

    fn entries_for(&self, key: StockKey) -> Result<Vec<LedgerEntry>, LedgerError> {
        let log = self
            .log
            .read()
            .map_err(|_| LedgerError::storage("ledger lock poisoned"))?;
        Ok(log
            .by_key
            .get(&key)
            .map(|indices| indices.iter().map(|i| log.entries[*i].clone()).collect())
            .unwrap_or_default())
    }

    fn all_entries(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        let log = self
            .log
            .read()
            .map_err(|_| LedgerError::storage("ledger lock poisoned"))?;
        Ok(log.entries.clone())
    }

    fn len(&self) -> Result<usize, LedgerError> {
        let log = self
            .log
            .read()
            .map_err(|_| LedgerError::storage("ledger lock poisoned"))?;
        Ok(log.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::InMemoryCatalog;
    use chrono::Utc;
    use stockbook_catalog::{Attributes, Product, Sku, Warehouse, WarehouseCode};
    use stockbook_core::{ProductId, WarehouseId};
    use stockbook_ledger::TransactionKind;

    fn seeded() -> (Arc<InMemoryCatalog>, InMemoryLedgerStore, StockKey) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product = Product::register(
            ProductId::new(),
            Sku::parse("PHN-001").unwrap(),
            "Phone",
            Attributes::new(),
        )
        .unwrap();
        let warehouse =
            Warehouse::register(WarehouseId::new(), WarehouseCode::parse("MDC").unwrap());
        let key = StockKey::new(product.id(), warehouse.id());
        catalog.add_product(product).unwrap();
        catalog.add_warehouse(warehouse).unwrap();
        let store = InMemoryLedgerStore::new(catalog.clone());
        (catalog, store, key)
    }

    fn entry(key: StockKey, kind: TransactionKind, qty: i64) -> LedgerEntry {
        LedgerEntry::record(key.product_id, key.warehouse_id, kind, qty, Utc::now()).unwrap()
    }

    #[test]
    fn append_then_read_back_in_order() {
        let (_catalog, store, key) = seeded();
        let first = entry(key, TransactionKind::Shipment, 10);
        let second = entry(key, TransactionKind::Sale, 3);
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let read = store.entries_for(key).unwrap();
        assert_eq!(read, vec![first, second]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn unknown_product_reference_is_fatal() {
        let (_catalog, store, key) = seeded();
        let bogus = LedgerEntry::record(
            ProductId::new(),
            key.warehouse_id,
            TransactionKind::Shipment,
            1,
            Utc::now(),
        )
        .unwrap();
        let err = store.append(bogus).unwrap_err();
        assert!(matches!(err, LedgerError::Reference(_)));
        // Nothing was committed.
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn unknown_warehouse_reference_is_fatal() {
        let (_catalog, store, key) = seeded();
        let bogus = LedgerEntry::record(
            key.product_id,
            WarehouseId::new(),
            TransactionKind::Return,
            1,
            Utc::now(),
        )
        .unwrap();
        assert!(matches!(
            store.append(bogus),
            Err(LedgerError::Reference(_))
        ));
    }

    #[test]
    fn entries_for_ignores_other_keys() {
        let (catalog, store, key) = seeded();
        let other_warehouse =
            Warehouse::register(WarehouseId::new(), WarehouseCode::parse("EAST").unwrap());
        let other = StockKey::new(key.product_id, other_warehouse.id());
        catalog.add_warehouse(other_warehouse).unwrap();

        store.append(entry(key, TransactionKind::Shipment, 5)).unwrap();
        store.append(entry(other, TransactionKind::Shipment, 8)).unwrap();

        assert_eq!(store.entries_for(key).unwrap().len(), 1);
        assert_eq!(store.entries_for(other).unwrap().len(), 1);
        assert_eq!(store.all_entries().unwrap().len(), 2);
    }

    #[test]
    fn appended_entries_are_never_mutated() {
        let (_catalog, store, key) = seeded();
        let first = entry(key, TransactionKind::Shipment, 5);
        store.append(first.clone()).unwrap();
        let before = store.all_entries().unwrap();

        store.append(entry(key, TransactionKind::Sale, 2)).unwrap();
        let after = store.all_entries().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0], first);
    }
}
