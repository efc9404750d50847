//! Product model: location ledger and transaction log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_core::Sku;

/// Transaction identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Category of a manual stock adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentReason {
    Damage,
    Shrinkage,
    Cycle,
    Other,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Shrinkage => "shrinkage",
            Self::Cycle => "cycle",
            Self::Other => "other",
        }
    }
}

/// One immutable entry of a product's movement history.
///
/// Entries are created only by the adjustment operation and are never edited
/// or deleted afterwards. `quantity` is the signed delta that was applied:
/// positive for replenishment, negative for depletion, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Internal handle; the interchange shape stays `{date, quantity,
    /// reason?, note?}`, so the id never goes on the wire.
    #[serde(skip)]
    pub id: TransactionId,
    /// Calendar date the event was recorded, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    pub quantity: i64,
    /// Present only for manual adjustments; transfers append no entry at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<AdjustmentReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        quantity: i64,
        reason: Option<AdjustmentReason>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            quantity,
            reason,
            note,
        }
    }
}

/// One physical storage location holding some quantity of a product.
///
/// Codes are compared case-sensitively with no normalization. A location is
/// never persisted at quantity 0: reaching exactly 0 removes the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLocation {
    pub(crate) code: String,
    pub(crate) quantity: u64,
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub(crate) is_primary: bool,
}

impl StockLocation {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Whether this is the product's designated pick-face location.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

/// Physical dimensions, descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub weight: f64,
}

/// A product with its location ledger and append-only transaction log.
///
/// `locations` keeps insertion order; the order carries no meaning except
/// that the first row is the legacy display fallback for "primary" when no
/// explicit flag is set. `transactions` is newest first.
///
/// Only the mutation engine writes to the ledger and the log; every other
/// component reads them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    sku: Sku,
    name: String,
    unit: String,
    #[serde(default)]
    cost: f64,
    #[serde(default)]
    dimensions: Dimensions,
    #[serde(default)]
    locations: Vec<StockLocation>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Product {
    pub fn new(sku: Sku, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            sku,
            name: name.into(),
            unit: unit.into(),
            cost: 0.0,
            dimensions: Dimensions::default(),
            locations: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Set descriptive attributes (builder style, for catalog seeding).
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Seed a location row. Zero quantities are skipped so a seeded product
    /// never starts with a row the engine would have removed.
    pub fn with_location(mut self, code: impl Into<String>, quantity: u64) -> Self {
        if quantity > 0 {
            self.locations.push(StockLocation {
                code: code.into(),
                quantity,
                is_primary: false,
            });
        }
        self
    }

    /// Seed a historical transaction (appended oldest-last, matching the
    /// newest-first ordering of the log).
    pub fn with_history(mut self, date: NaiveDate, quantity: i64) -> Self {
        self.transactions
            .push(Transaction::new(date, quantity, None, None));
        self
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn locations(&self) -> &[StockLocation] {
        &self.locations
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Total on-hand quantity across all locations; 0 when none exist.
    pub fn total_quantity(&self) -> u64 {
        self.locations.iter().map(|l| l.quantity).sum()
    }

    /// The location explicitly flagged primary, if any.
    pub fn explicit_primary(&self) -> Option<&StockLocation> {
        self.locations.iter().find(|l| l.is_primary)
    }

    /// Display fallback: the flagged primary, else the first location in
    /// insertion order. Never used to drive a mutation.
    pub fn primary_or_first(&self) -> Option<&StockLocation> {
        self.explicit_primary().or_else(|| self.locations.first())
    }

    pub fn location(&self, code: &str) -> Option<&StockLocation> {
        self.locations.iter().find(|l| l.code == code)
    }

    pub fn has_location(&self, code: &str) -> bool {
        self.location(code).is_some()
    }

    pub(crate) fn location_mut(&mut self, code: &str) -> Option<&mut StockLocation> {
        self.locations.iter_mut().find(|l| l.code == code)
    }

    /// Find-or-create a location row (created rows start at quantity 0).
    pub(crate) fn ensure_location(&mut self, code: &str) -> &mut StockLocation {
        if let Some(idx) = self.locations.iter().position(|l| l.code == code) {
            &mut self.locations[idx]
        } else {
            self.locations.push(StockLocation {
                code: code.to_string(),
                quantity: 0,
                is_primary: false,
            });
            // just pushed, cannot be empty
            let last = self.locations.len() - 1;
            &mut self.locations[last]
        }
    }

    pub(crate) fn remove_location(&mut self, code: &str) {
        self.locations.retain(|l| l.code != code);
    }

    pub(crate) fn clear_primary_flags(&mut self) {
        for l in &mut self.locations {
            l.is_primary = false;
        }
    }

    pub(crate) fn prepend_transaction(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn total_quantity_sums_locations_and_defaults_to_zero() {
        let empty = Product::new(sku("BOOK0001"), "Intro to Algorithms", "Book");
        assert_eq!(empty.total_quantity(), 0);

        let p = Product::new(sku("BOOK0001"), "Intro to Algorithms", "Book")
            .with_location("BOOK-01", 100)
            .with_location("BOOK-02", 50);
        assert_eq!(p.total_quantity(), 150);
    }

    #[test]
    fn with_location_skips_zero_rows() {
        let p = Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box").with_location("TOY-01", 0);
        assert!(p.locations().is_empty());
    }

    #[test]
    fn primary_or_first_falls_back_to_insertion_order() {
        let p = Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box")
            .with_location("TOY-01", 150)
            .with_location("TOY-03", 100);
        assert!(p.explicit_primary().is_none());
        assert_eq!(p.primary_or_first().map(|l| l.code()), Some("TOY-01"));
    }

    #[test]
    fn primary_or_first_prefers_the_flagged_location() {
        let mut p = Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box")
            .with_location("TOY-01", 150)
            .with_location("TOY-03", 100);
        if let Some(l) = p.location_mut("TOY-03") {
            l.is_primary = true;
        }
        assert_eq!(p.primary_or_first().map(|l| l.code()), Some("TOY-03"));
    }

    #[test]
    fn location_codes_match_case_sensitively() {
        let p = Product::new(sku("CLOTH555"), "Summer T-Shirt", "Piece")
            .with_location("CLOT-01", 400);
        assert!(p.has_location("CLOT-01"));
        assert!(!p.has_location("clot-01"));
    }

    #[test]
    fn transaction_serializes_to_the_interchange_shape() {
        let txn = Transaction::new(date("2025-08-10"), -30, Some(AdjustmentReason::Damage), None);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2025-08-10");
        assert_eq!(json["quantity"], -30);
        assert_eq!(json["reason"], "damage");

        // Exactly the interchange fields: absent note omitted, internal id
        // never on the wire.
        let fields: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(fields, ["date", "quantity", "reason"]);
    }

    #[test]
    fn location_serializes_camel_case_and_omits_unset_primary() {
        let p = Product::new(sku("JEW9999"), "Multi-location Pack", "Pack")
            .with_location("EB-001-A", 500);
        let json = serde_json::to_value(p.locations()).unwrap();
        assert_eq!(json[0]["code"], "EB-001-A");
        assert_eq!(json[0]["quantity"], 500);
        assert!(json[0].get("isPrimary").is_none());
    }
}
