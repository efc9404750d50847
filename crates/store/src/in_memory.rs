//! In-memory product storage.

use std::collections::HashMap;
use std::sync::RwLock;

use stockroom_core::Sku;
use stockroom_inventory::Product;

use crate::catalog;
use crate::repository::{InventoryRepository, RepositoryError};

/// In-memory keyed product store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    products: RwLock<HashMap<Sku, Product>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the sample catalog.
    pub fn with_catalog() -> Self {
        let store = Self::new();
        {
            let mut products = store
                .products
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for product in catalog::sample_products() {
                products.insert(product.sku().clone(), product);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InventoryRepository for InMemoryInventory {
    fn get_by_sku(&self, sku: &Sku) -> Result<Product, RepositoryError> {
        let products = self
            .products
            .read()
            .map_err(|_| RepositoryError::backend("lock poisoned"))?;
        products
            .get(sku)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(sku))
    }

    fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| RepositoryError::backend("lock poisoned"))?;
        products.insert(product.sku().clone(), product);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    #[test]
    fn save_then_get_round_trips() {
        let store = InMemoryInventory::new();
        let product = Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box")
            .with_location("TOY-01", 150);
        store.save(product.clone()).unwrap();
        assert_eq!(store.get_by_sku(&sku("TOY1234")).unwrap(), product);
    }

    #[test]
    fn save_replaces_the_previous_record() {
        let store = InMemoryInventory::new();
        store
            .save(Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box"))
            .unwrap();
        store
            .save(
                Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box").with_location("TOY-03", 10),
            )
            .unwrap();
        assert_eq!(store.len(), 1);
        let stored = store.get_by_sku(&sku("TOY1234")).unwrap();
        assert_eq!(stored.total_quantity(), 10);
    }

    #[test]
    fn missing_sku_is_not_found() {
        let store = InMemoryInventory::new();
        let err = store.get_by_sku(&sku("NOPE")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn catalog_store_holds_the_sample_products() {
        let store = InMemoryInventory::with_catalog();
        assert_eq!(store.len(), 4);
        let book = store.get_by_sku(&sku("BOOK0001")).unwrap();
        assert_eq!(book.total_quantity(), 150);
    }
}
