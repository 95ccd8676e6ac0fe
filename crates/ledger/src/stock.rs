//! Pure replay: current stock as a function of ledger history.
//!
//! These functions are the ground truth the aggregator must agree with at
//! every instant. They take entries in append order and fold the signed
//! amounts; absence of entries means quantity 0.

use std::collections::HashMap;

use crate::entry::{LedgerEntry, StockKey};

/// Recompute every (product, warehouse) quantity from scratch.
pub fn replay<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> HashMap<StockKey, i64> {
    let mut totals = HashMap::new();
    for entry in entries {
        *totals.entry(entry.key()).or_insert(0) += entry.change_amount;
    }
    totals
}

/// Recompute the quantity for a single key.
pub fn replay_key<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>, key: StockKey) -> i64 {
    entries
        .into_iter()
        .filter(|e| e.key() == key)
        .map(|e| e.change_amount)
        .sum()
}
