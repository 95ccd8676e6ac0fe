use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use stockbook_catalog::{Attributes, Product, Sku, Warehouse, WarehouseCode};
use stockbook_core::{LedgerError, ProductId, WarehouseId};
use stockbook_infra::{Catalog, InMemoryCatalog, InMemoryLedgerStore, KeyLockRegistry, LedgerStore, StockAggregator};
use stockbook_ledger::{LedgerEntry, StockKey, TransactionKind};

use crate::dto::{InventorySummary, LowStockRow, StockRow};

/// The transaction validator and the whole external surface of the core.
///
/// Submissions are whole-or-nothing: every failure is raised before the
/// single `append`, so a rejected transaction leaves no trace. The sale
/// ceiling check and the append run inside the per-key serialized section,
/// which is what makes two concurrent sales of the last unit resolve to
/// exactly one success.
pub struct InventoryService<C, S> {
    catalog: Arc<C>,
    store: Arc<S>,
    stock: StockAggregator<S>,
    guard: Arc<KeyLockRegistry>,
}

impl<C, S> Clone for InventoryService<C, S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
            stock: self.stock.clone(),
            guard: Arc::clone(&self.guard),
        }
    }
}

/// Default in-process wiring.
pub type InMemoryInventoryService = InventoryService<InMemoryCatalog, InMemoryLedgerStore>;

impl InventoryService<InMemoryCatalog, InMemoryLedgerStore> {
    pub fn in_memory() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let store = Arc::new(InMemoryLedgerStore::new(
            Arc::clone(&catalog) as Arc<dyn Catalog>
        ));
        Self::new(catalog, store)
    }
}

impl<C, S> InventoryService<C, S>
where
    C: Catalog,
    S: LedgerStore,
{
    pub fn new(catalog: Arc<C>, store: Arc<S>) -> Self {
        let stock = StockAggregator::new(Arc::clone(&store));
        Self {
            catalog,
            store,
            stock,
            guard: Arc::new(KeyLockRegistry::new()),
        }
    }

    /// Register a new product under a unique SKU.
    pub fn register_product(
        &self,
        sku: &str,
        name: &str,
        attributes: Attributes,
    ) -> Result<Product, LedgerError> {
        let sku = Sku::parse(sku)?;
        let product = Product::register(ProductId::new(), sku, name, attributes)?;
        self.catalog.add_product(product.clone())?;
        tracing::info!(sku = %product.sku(), name = %product.name(), "product registered");
        Ok(product)
    }

    /// Register a stocking location under a unique code.
    pub fn register_warehouse(&self, code: &str) -> Result<Warehouse, LedgerError> {
        let code = WarehouseCode::parse(code)?;
        let warehouse = Warehouse::register(WarehouseId::new(), code);
        self.catalog.add_warehouse(warehouse.clone())?;
        tracing::info!(code = %warehouse.code(), "warehouse registered");
        Ok(warehouse)
    }

    /// Validate and commit one stock movement.
    ///
    /// `quantity` is a positive magnitude; the sign is derived from `kind`.
    /// Sales must be covered by current stock for the key, verified and
    /// appended without any interleaving writer on that key.
    pub fn submit_transaction(
        &self,
        kind: TransactionKind,
        sku: &str,
        warehouse_code: &str,
        quantity: i64,
    ) -> Result<LedgerEntry, LedgerError> {
        if quantity <= 0 {
            return Err(LedgerError::validation(format!(
                "quantity must be positive, got {quantity}"
            )));
        }

        let sku = Sku::parse(sku)?;
        let code = WarehouseCode::parse(warehouse_code)?;
        let product = self
            .catalog
            .product_by_sku(&sku)?
            .ok_or_else(|| LedgerError::not_found(format!("SKU {sku} is not registered")))?;
        let warehouse = self.catalog.warehouse_by_code(&code)?.ok_or_else(|| {
            LedgerError::not_found(format!("warehouse code {code} is not registered"))
        })?;

        let key = StockKey::new(product.id(), warehouse.id());
        let outcome = self.guard.run_serialized(key, || {
            if kind.removes_stock() {
                let available = self.stock.current_quantity(key)?;
                if available < quantity {
                    return Err(LedgerError::InsufficientStock {
                        available,
                        requested: quantity,
                    });
                }
            }
            let entry =
                LedgerEntry::record(product.id(), warehouse.id(), kind, quantity, Utc::now())?;
            self.store.append(entry.clone())?;
            Ok(entry)
        });

        match &outcome {
            Ok(entry) => tracing::info!(
                sku = %sku,
                warehouse = %code,
                kind = %kind,
                change_amount = entry.change_amount,
                "transaction committed"
            ),
            Err(LedgerError::InsufficientStock {
                available,
                requested,
            }) => tracing::warn!(
                sku = %sku,
                warehouse = %code,
                available,
                requested,
                "sale rejected, would oversell"
            ),
            Err(err) => tracing::warn!(sku = %sku, warehouse = %code, %err, "transaction failed"),
        }
        outcome
    }

    /// Full current-stock snapshot, ordered by SKU then warehouse code.
    pub fn current_stock(&self) -> Result<Vec<StockRow>, LedgerError> {
        let mut rows = Vec::new();
        for (key, quantity) in self.stock.snapshot_all()? {
            let (product, warehouse) = self.resolve_key(key)?;
            rows.push(StockRow {
                sku: product.sku().clone(),
                name: product.name().to_string(),
                warehouse: warehouse.code().clone(),
                quantity,
            });
        }
        rows.sort_by(|a, b| (&a.sku, &a.warehouse).cmp(&(&b.sku, &b.warehouse)));
        Ok(rows)
    }

    /// Audit trail, newest first, optionally capped at `limit` entries.
    pub fn ledger_history(&self, limit: Option<usize>) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut entries = self.store.all_entries()?;
        entries.reverse();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    /// Keys whose quantity is at or below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> Result<Vec<LowStockRow>, LedgerError> {
        let mut rows = Vec::new();
        for (key, quantity) in self.stock.low_stock(threshold)? {
            let (product, warehouse) = self.resolve_key(key)?;
            rows.push(LowStockRow {
                sku: product.sku().clone(),
                warehouse: warehouse.code().clone(),
                quantity,
            });
        }
        rows.sort_by(|a, b| (&a.sku, &a.warehouse).cmp(&(&b.sku, &b.warehouse)));
        Ok(rows)
    }

    /// Dashboard headline numbers, derived purely from the snapshot.
    pub fn summary(&self, low_stock_threshold: i64) -> Result<InventorySummary, LedgerError> {
        let snapshot = self.stock.snapshot_all()?;
        let distinct_products: HashSet<_> =
            snapshot.keys().map(|key| key.product_id).collect();
        Ok(InventorySummary {
            distinct_products: distinct_products.len(),
            units_on_hand: snapshot.values().sum(),
            low_stock_items: snapshot
                .values()
                .filter(|quantity| **quantity <= low_stock_threshold)
                .count(),
        })
    }

    fn resolve_key(&self, key: StockKey) -> Result<(Product, Warehouse), LedgerError> {
        // Dangling ids cannot happen while deletion stays unsupported; treat
        // them as a fatal integrity failure, not a lookup miss.
        let product = self.catalog.product_by_id(key.product_id)?.ok_or_else(|| {
            LedgerError::reference(format!(
                "ledger references product id {} missing from the catalog",
                key.product_id
            ))
        })?;
        let warehouse = self
            .catalog
            .warehouse_by_id(key.warehouse_id)?
            .ok_or_else(|| {
                LedgerError::reference(format!(
                    "ledger references warehouse id {} missing from the catalog",
                    key.warehouse_id
                ))
            })?;
        Ok((product, warehouse))
    }
}
