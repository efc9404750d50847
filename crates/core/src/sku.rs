//! Strongly-typed product identifier.

use serde::{Deserialize, Serialize};

/// Stock keeping unit: the unique, immutable identifier of a product.
///
/// SKUs are opaque strings compared case-sensitively with no normalization
/// beyond surrounding-whitespace trimming at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Build a SKU from a raw string. Returns `None` for blank input.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let sku = Sku::new("  BOOK0001 ").unwrap();
        assert_eq!(sku.as_str(), "BOOK0001");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(Sku::new("   ").is_none());
        assert!(Sku::new("").is_none());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(Sku::new("toys").unwrap(), Sku::new("TOYS").unwrap());
    }

    #[test]
    fn serializes_transparently() {
        let sku = Sku::new("JEW9999").unwrap();
        assert_eq!(serde_json::to_string(&sku).unwrap(), "\"JEW9999\"");
    }
}
