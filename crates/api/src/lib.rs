//! `stockbook-api` — the boundary the presentation layer talks to.
//!
//! Dashboards, forms and exports are external collaborators; everything they
//! may do to stock state goes through [`InventoryService`]. The service owns
//! the validate-then-append rule: references must resolve, quantities must be
//! positive, and a sale is only committed if current stock covers it, checked
//! and appended inside a per-key serialized section.

pub mod dto;
pub mod service;


pub use dto::{InventorySummary, LowStockRow, StockRow};
pub use service::{InMemoryInventoryService, InventoryService};
