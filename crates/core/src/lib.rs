//! `stockbook-core` — shared foundation for the stock ledger.
//!
//! Identifiers and the error taxonomy only; no storage or business rules.

pub mod error;
pub mod id;

pub use error::{LedgerError, LedgerResult};
pub use id::{EntryId, ProductId, WarehouseId};
