//! `stockbook-catalog` — reference data: products and warehouses.
//!
//! Entities here are created once and referenced by ledger entries forever;
//! nothing in the catalog is ever deleted.

pub mod product;
pub mod warehouse;

pub use product::{Attributes, Product, Sku};
pub use warehouse::{Warehouse, WarehouseCode};
