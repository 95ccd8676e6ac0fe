use serde::Serialize;

use stockbook_catalog::{Sku, WarehouseCode};

/// One line of the current-stock snapshot (dashboard table row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRow {
    pub sku: Sku,
    pub name: String,
    pub warehouse: WarehouseCode,
    pub quantity: i64,
}

/// One low-stock alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockRow {
    pub sku: Sku,
    pub warehouse: WarehouseCode,
    pub quantity: i64,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    /// Products with at least one ledger entry.
    pub distinct_products: usize,
    /// Sum of all on-hand quantities.
    pub units_on_hand: i64,
    /// Keys at or below the requested threshold.
    pub low_stock_items: usize,
}
