use serde::{Deserialize, Serialize};

use stockbook_core::{LedgerError, ProductId};

/// Open-ended product attributes (e.g. a color tag), stored as a JSON map.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Stock-Keeping Unit: the immutable business key of a product.
///
/// Normalized on parse: trimmed and uppercased, so `phn-001` and `PHN-001`
/// name the same product. Restricted to `A-Z`, `0-9`, `.`, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(LedgerError::validation("SKU cannot be empty"));
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(LedgerError::validation(format!(
                "SKU contains invalid character {bad:?}"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered product. Identity is the SKU; the internal id is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: Sku,
    name: String,
    attributes: Attributes,
}

impl Product {
    /// Build a product record, validating the display name.
    ///
    /// SKU uniqueness is a catalog-level concern (the registry holding all
    /// products enforces it); a single product cannot know about its peers.
    pub fn register(
        id: ProductId,
        sku: Sku,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            sku,
            name,
            attributes,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_is_normalized_to_uppercase() {
        let sku = Sku::parse("  phn-001 ").unwrap();
        assert_eq!(sku.as_str(), "PHN-001");
    }

    #[test]
    fn equal_after_normalization() {
        assert_eq!(Sku::parse("phn-001").unwrap(), Sku::parse("PHN-001").unwrap());
    }

    #[test]
    fn sku_rejects_empty() {
        let err = Sku::parse("   ").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn sku_rejects_invalid_characters() {
        let err = Sku::parse("PHN 001").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn register_rejects_blank_name() {
        let err = Product::register(
            ProductId::new(),
            Sku::parse("PHN-001").unwrap(),
            "   ",
            Attributes::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn register_keeps_attributes() {
        let mut attrs = Attributes::new();
        attrs.insert("color".to_string(), serde_json::json!("#00f"));
        let product = Product::register(
            ProductId::new(),
            Sku::parse("PHN-001").unwrap(),
            "Phone",
            attrs,
        )
        .unwrap();
        assert_eq!(product.attributes()["color"], "#00f");
        assert_eq!(product.name(), "Phone");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Parsing is idempotent: re-parsing a normalized SKU changes nothing.
            #[test]
            fn sku_parse_is_idempotent(raw in "[a-zA-Z0-9._-]{1,24}") {
                let once = Sku::parse(&raw).unwrap();
                let twice = Sku::parse(once.as_str()).unwrap();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
