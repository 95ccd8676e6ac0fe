use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockbook_catalog::{Product, Sku, Warehouse, WarehouseCode};
use stockbook_core::{LedgerError, ProductId, WarehouseId};

/// Reference-data registry: products and warehouses.
///
/// Registration is the only mutation, and nothing is ever deleted; every
/// id handed out stays resolvable for the lifetime of the system. Lookups
/// by external key (SKU, code) and by internal id are both supported.
pub trait Catalog: Send + Sync {
    /// Register a product; fails with [`LedgerError::Duplicate`] if the SKU
    /// is already taken.
    fn add_product(&self, product: Product) -> Result<(), LedgerError>;

    /// Register a warehouse; fails with [`LedgerError::Duplicate`] if the
    /// code is already taken.
    fn add_warehouse(&self, warehouse: Warehouse) -> Result<(), LedgerError>;

    fn product_by_sku(&self, sku: &Sku) -> Result<Option<Product>, LedgerError>;
    fn warehouse_by_code(&self, code: &WarehouseCode) -> Result<Option<Warehouse>, LedgerError>;

    fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, LedgerError>;
    fn warehouse_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, LedgerError>;

    fn product_count(&self) -> Result<usize, LedgerError>;
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn add_product(&self, product: Product) -> Result<(), LedgerError> {
        (**self).add_product(product)
    }

    fn add_warehouse(&self, warehouse: Warehouse) -> Result<(), LedgerError> {
        (**self).add_warehouse(warehouse)
    }

    fn product_by_sku(&self, sku: &Sku) -> Result<Option<Product>, LedgerError> {
        (**self).product_by_sku(sku)
    }

    fn warehouse_by_code(&self, code: &WarehouseCode) -> Result<Option<Warehouse>, LedgerError> {
        (**self).warehouse_by_code(code)
    }

    fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, LedgerError> {
        (**self).product_by_id(id)
    }

    fn warehouse_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, LedgerError> {
        (**self).warehouse_by_id(id)
    }

    fn product_count(&self) -> Result<usize, LedgerError> {
        (**self).product_count()
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    products_by_sku: HashMap<Sku, Product>,
    products_by_id: HashMap<ProductId, Sku>,
    warehouses_by_code: HashMap<WarehouseCode, Warehouse>,
    warehouses_by_id: HashMap<WarehouseId, WarehouseCode>,
}

/// In-memory catalog. The lock is taken per call and released on every
/// path; there is no ambient session to leak across operations.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(which: &str) -> LedgerError {
    LedgerError::storage(format!("{which} lock poisoned"))
}

impl Catalog for InMemoryCatalog {
    fn add_product(&self, product: Product) -> Result<(), LedgerError> {
        let mut state = self.state.write().map_err(|_| poisoned("catalog"))?;
        if state.products_by_sku.contains_key(product.sku()) {
            return Err(LedgerError::duplicate(format!(
                "SKU {} is already registered",
                product.sku()
            )));
        }
        state.products_by_id.insert(product.id(), product.sku().clone());
        state.products_by_sku.insert(product.sku().clone(), product);
        Ok(())
    }

    fn add_warehouse(&self, warehouse: Warehouse) -> Result<(), LedgerError> {
        let mut state = self.state.write().map_err(|_| poisoned("catalog"))?;
        if state.warehouses_by_code.contains_key(warehouse.code()) {
            return Err(LedgerError::duplicate(format!(
                "warehouse code {} is already registered",
                warehouse.code()
            )));
        }
        state
            .warehouses_by_id
            .insert(warehouse.id(), warehouse.code().clone());
        state
            .warehouses_by_code
            .insert(warehouse.code().clone(), warehouse);
        Ok(())
    }

    fn product_by_sku(&self, sku: &Sku) -> Result<Option<Product>, LedgerError> {
        let state = self.state.read().map_err(|_| poisoned("catalog"))?;
        Ok(state.products_by_sku.get(sku).cloned())
    }

    fn warehouse_by_code(&self, code: &WarehouseCode) -> Result<Option<Warehouse>, LedgerError> {
        let state = self.state.read().map_err(|_| poisoned("catalog"))?;
        Ok(state.warehouses_by_code.get(code).cloned())
    }

    fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, LedgerError> {
        let state = self.state.read().map_err(|_| poisoned("catalog"))?;
        Ok(state
            .products_by_id
            .get(&id)
            .and_then(|sku| state.products_by_sku.get(sku))
            .cloned())
    }

    fn warehouse_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, LedgerError> {
        let state = self.state.read().map_err(|_| poisoned("catalog"))?;
        Ok(state
            .warehouses_by_id
            .get(&id)
            .and_then(|code| state.warehouses_by_code.get(code))
            .cloned())
    }

    fn product_count(&self) -> Result<usize, LedgerError> {
        let state = self.state.read().map_err(|_| poisoned("catalog"))?;
        Ok(state.products_by_sku.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_catalog::Attributes;

    fn product(sku: &str) -> Product {
        Product::register(
            ProductId::new(),
            Sku::parse(sku).unwrap(),
            "Widget",
            Attributes::new(),
        )
        .unwrap()
    }

    #[test]
    fn duplicate_sku_is_rejected_and_count_stays() {
        let catalog = InMemoryCatalog::new();
        catalog.add_product(product("PHN-001")).unwrap();

        let err = catalog.add_product(product("PHN-001")).unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(_)));
        assert_eq!(catalog.product_count().unwrap(), 1);
    }

    #[test]
    fn lookup_by_sku_and_id_agree() {
        let catalog = InMemoryCatalog::new();
        let p = product("PHN-001");
        let id = p.id();
        catalog.add_product(p).unwrap();

        let by_sku = catalog
            .product_by_sku(&Sku::parse("phn-001").unwrap())
            .unwrap()
            .unwrap();
        let by_id = catalog.product_by_id(id).unwrap().unwrap();
        assert_eq!(by_sku, by_id);
    }

    #[test]
    fn unknown_references_resolve_to_none() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog
            .product_by_sku(&Sku::parse("NOPE-1").unwrap())
            .unwrap()
            .is_none());
        assert!(catalog.warehouse_by_id(WarehouseId::new()).unwrap().is_none());
    }

    #[test]
    fn duplicate_warehouse_code_is_rejected() {
        let catalog = InMemoryCatalog::new();
        let code = WarehouseCode::parse("MDC").unwrap();
        catalog
            .add_warehouse(Warehouse::register(WarehouseId::new(), code.clone()))
            .unwrap();
        let err = catalog
            .add_warehouse(Warehouse::register(WarehouseId::new(), code))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(_)));
    }
}
