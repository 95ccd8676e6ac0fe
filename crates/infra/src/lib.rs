//! `stockbook-infra` — storage and concurrency for the stock ledger.
//!
//! Durable relations live behind the [`Catalog`] and [`LedgerStore`] traits;
//! this crate ships the in-memory implementations. Derived stock views come
//! from [`StockAggregator`], and the per-key serialization boundary that makes
//! check-then-append safe is [`KeyLockRegistry`].

pub mod aggregator;
pub mod catalog_store;
pub mod guard;
pub mod ledger_store;

pub use aggregator::StockAggregator;
pub use catalog_store::{Catalog, InMemoryCatalog};
pub use guard::KeyLockRegistry;
pub use ledger_store::{InMemoryLedgerStore, LedgerStore};
