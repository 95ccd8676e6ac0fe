//! `stockbook-ledger` — the append-only stock movement domain.
//!
//! A [`LedgerEntry`] is an immutable fact; current stock is never stored on
//! its own, it is the running sum of change amounts per [`StockKey`] and can
//! always be recomputed by replaying history from empty (see [`stock`]).

pub mod entry;
pub mod stock;

pub use entry::{LedgerEntry, StockKey, TransactionKind};
pub use stock::{replay, replay_key};
