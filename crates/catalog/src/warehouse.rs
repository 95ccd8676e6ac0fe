use serde::{Deserialize, Serialize};

use stockbook_core::{LedgerError, WarehouseId};

/// Warehouse code: the external identifier of a stocking location
/// (e.g. `MDC`). Normalized like a SKU.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseCode(String);

impl WarehouseCode {
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(LedgerError::validation("warehouse code cannot be empty"));
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(LedgerError::validation(format!(
                "warehouse code contains invalid character {bad:?}"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WarehouseCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static reference data: a stocking location referenced by ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    code: WarehouseCode,
}

impl Warehouse {
    pub fn register(id: WarehouseId, code: WarehouseCode) -> Self {
        Self { id, code }
    }

    pub fn id(&self) -> WarehouseId {
        self.id
    }

    pub fn code(&self) -> &WarehouseCode {
        &self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalized() {
        let code = WarehouseCode::parse(" mdc ").unwrap();
        assert_eq!(code.as_str(), "MDC");
    }

    #[test]
    fn code_rejects_empty() {
        assert!(matches!(
            WarehouseCode::parse(""),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn code_rejects_whitespace_inside() {
        assert!(WarehouseCode::parse("M DC").is_err());
    }
}
