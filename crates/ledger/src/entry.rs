use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{EntryId, LedgerError, ProductId, WarehouseId};

/// Why stock changed. Determines the sign of the recorded amount.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Inbound goods from a supplier. Adds stock.
    Shipment,
    /// Outbound sale. Removes stock; the only kind with a ceiling.
    Sale,
    /// Customer return. Adds stock (canonical rule; the only undo mechanism
    /// for a committed sale is a compensating return entry).
    Return,
    /// Manual correction, e.g. after a physical count. Adds stock.
    Adjustment,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Shipment => "shipment",
            TransactionKind::Sale => "sale",
            TransactionKind::Return => "return",
            TransactionKind::Adjustment => "adjustment",
        }
    }

    /// Whether entries of this kind subtract from stock.
    pub fn removes_stock(self) -> bool {
        matches!(self, TransactionKind::Sale)
    }

    /// Signed ledger amount for a positive quantity magnitude.
    pub fn signed_change(self, quantity: i64) -> i64 {
        if self.removes_stock() { -quantity } else { quantity }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shipment" => Ok(TransactionKind::Shipment),
            "sale" => Ok(TransactionKind::Sale),
            "return" => Ok(TransactionKind::Return),
            "adjustment" => Ok(TransactionKind::Adjustment),
            other => Err(LedgerError::validation(format!(
                "unknown transaction kind '{other}' (expected shipment, sale, return or adjustment)"
            ))),
        }
    }
}

/// Aggregation key: one stock figure exists per (product, warehouse) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockKey {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
}

impl StockKey {
    pub fn new(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self {
            product_id,
            warehouse_id,
        }
    }
}

/// One immutable stock movement. Once appended it is never updated or
/// deleted; the full audit trail is permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: EntryId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,

    /// Signed movement: positive for shipment/return/adjustment, negative
    /// for sale.
    pub change_amount: i64,

    pub reason: TransactionKind,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Build an entry from a positive quantity magnitude, computing the sign
    /// from the kind. Does not touch any store; the validator decides whether
    /// the entry may actually be appended.
    pub fn record(
        product_id: ProductId,
        warehouse_id: WarehouseId,
        kind: TransactionKind,
        quantity: i64,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        if quantity <= 0 {
            return Err(LedgerError::validation(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        Ok(Self {
            entry_id: EntryId::new(),
            product_id,
            warehouse_id,
            change_amount: kind.signed_change(quantity),
            reason: kind,
            recorded_at,
        })
    }

    pub fn key(&self) -> StockKey {
        StockKey::new(self.product_id, self.warehouse_id)
    }

    /// The positive magnitude the caller originally submitted.
    pub fn quantity(&self) -> i64 {
        self.change_amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_amounts_are_negative() {
        assert_eq!(TransactionKind::Sale.signed_change(4), -4);
    }

    #[test]
    fn non_sale_amounts_are_positive() {
        assert_eq!(TransactionKind::Shipment.signed_change(4), 4);
        assert_eq!(TransactionKind::Return.signed_change(4), 4);
        assert_eq!(TransactionKind::Adjustment.signed_change(4), 4);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "Return".parse::<TransactionKind>().unwrap(),
            TransactionKind::Return
        );
        assert!("restock".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn record_rejects_non_positive_quantity() {
        let err = LedgerEntry::record(
            ProductId::new(),
            WarehouseId::new(),
            TransactionKind::Shipment,
            0,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn record_carries_the_signed_amount() {
        let entry = LedgerEntry::record(
            ProductId::new(),
            WarehouseId::new(),
            TransactionKind::Sale,
            3,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(entry.change_amount, -3);
        assert_eq!(entry.quantity(), 3);
        assert_eq!(entry.reason, TransactionKind::Sale);
    }
}
