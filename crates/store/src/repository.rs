//! Repository abstraction over product storage.

use std::sync::Arc;

use thiserror::Error;

use stockroom_core::Sku;
use stockroom_inventory::Product;

/// Storage operation error.
///
/// These are **infrastructure** failures (missing record, backend fault) as
/// opposed to domain validation failures, which are `StockError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No product is stored under the given SKU.
    #[error("no product stored for sku '{sku}'")]
    NotFound { sku: String },

    /// The backing store failed (lock poisoning, connection loss, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn not_found(sku: &Sku) -> Self {
        Self::NotFound {
            sku: sku.to_string(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Keyed product storage with replace-on-write updates.
///
/// Implementations hand back an owned copy of the stored product and accept
/// a full replacement on `save`. They make no atomicity promise across a
/// `get_by_sku`/`save` pair — that boundary belongs to `StockService`, which
/// serializes read-modify-write cycles per product. Implementations must only
/// guarantee that each single call is internally consistent.
pub trait InventoryRepository: Send + Sync {
    /// Fetch the product stored under `sku`.
    fn get_by_sku(&self, sku: &Sku) -> Result<Product, RepositoryError>;

    /// Store `product` under its SKU, replacing any previous record.
    fn save(&self, product: Product) -> Result<(), RepositoryError>;
}

impl<S> InventoryRepository for Arc<S>
where
    S: InventoryRepository + ?Sized,
{
    fn get_by_sku(&self, sku: &Sku) -> Result<Product, RepositoryError> {
        (**self).get_by_sku(sku)
    }

    fn save(&self, product: Product) -> Result<(), RepositoryError> {
        (**self).save(product)
    }
}
