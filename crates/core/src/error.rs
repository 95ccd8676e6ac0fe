//! Error taxonomy for the ledger core.

use thiserror::Error;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Every failure the core can surface to a caller.
///
/// Business-rule failures (`NotFound`, `Duplicate`, `InsufficientStock`) are
/// detected before any mutation; nothing partial is ever committed. Only
/// `Storage` and `Timeout` are sensible candidates for a caller-side retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed input (empty SKU, non-positive quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced SKU or warehouse code is not registered.
    #[error("not found: {0}")]
    NotFound(String),

    /// Registration of an already-existing SKU or warehouse code.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// A sale would drive stock below zero. Routine outcome, not a fault.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// The durability layer failed; the caller must not assume the entry
    /// was persisted.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A ledger entry points at a product or warehouse that does not exist.
    /// Structurally impossible (nothing is ever deleted); fatal if observed.
    #[error("reference integrity violated: {0}")]
    Reference(String),

    /// A serialized section could not be entered within the bounded window.
    #[error("timed out: {0}")]
    Timeout(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Whether the whole submission may be retried safely by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Timeout(_))
    }
}
