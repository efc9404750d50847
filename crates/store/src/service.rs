//! Application-level orchestration of the stock mutation engine.
//!
//! `StockService` sits between callers (UI, API layer) and the domain: it
//! resolves the product through the injected repository, runs the pure engine
//! on the loaded value, and saves only on success. Each SKU is guarded by its
//! own mutex, so once an operation starts its read-modify-write cycle no
//! other operation on the same product can interleave; operations on
//! different products proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info};

use stockroom_core::{Sku, StockError};
use stockroom_inventory::{
    AdjustOutcome, AdjustRequest, Product, TransferOutcome, TransferRequest, adjust,
    set_primary_location, transfer,
};

use crate::repository::{InventoryRepository, RepositoryError};

/// Failure of a service call: either a deterministic domain rejection or an
/// infrastructure fault from the backing store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            // A SKU the repository cannot resolve is the domain's
            // ProductNotFound, not an infrastructure fault.
            RepositoryError::NotFound { .. } => Self::Stock(StockError::ProductNotFound),
            other => Self::Repository(other),
        }
    }
}

impl ServiceError {
    /// Stable wire identifier for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Stock(err) => err.code(),
            Self::Repository(_) => "STORAGE_FAILURE",
        }
    }
}

/// Result type of service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The per-product serializable boundary around the mutation engine.
///
/// Generic over the repository so tests run against `InMemoryInventory` and
/// a real backend can be injected without touching domain code.
#[derive(Debug)]
pub struct StockService<R> {
    repository: R,
    locks: Mutex<HashMap<Sku, Arc<Mutex<()>>>>,
}

impl<R> StockService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn product_lock(&self, sku: &Sku) -> ServiceResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| ServiceError::Repository(RepositoryError::backend("lock poisoned")))?;
        Ok(Arc::clone(locks.entry(sku.clone()).or_default()))
    }
}

impl<R: InventoryRepository> StockService<R> {
    /// Read-only snapshot of a product, for display.
    pub fn product(&self, sku: &Sku) -> ServiceResult<Product> {
        Ok(self.repository.get_by_sku(sku)?)
    }

    /// Run one engine operation under the product's exclusive lock.
    ///
    /// The mutation is applied to a loaded copy and saved back only when the
    /// engine succeeds, so a rejected request never reaches the store.
    fn with_product<T>(
        &self,
        sku: &Sku,
        op: impl FnOnce(&mut Product) -> Result<T, StockError>,
    ) -> ServiceResult<T> {
        let lock = self.product_lock(sku)?;
        let _guard = lock
            .lock()
            .map_err(|_| ServiceError::Repository(RepositoryError::backend("lock poisoned")))?;

        let mut product = self.repository.get_by_sku(sku)?;
        let outcome = op(&mut product)?;
        self.repository.save(product)?;
        Ok(outcome)
    }

    /// Move quantity between locations of one product. No transaction entry
    /// is recorded; total quantity is conserved.
    pub fn transfer(
        &self,
        sku: &Sku,
        request: &TransferRequest,
    ) -> ServiceResult<TransferOutcome> {
        let result = self.with_product(sku, |product| transfer(product, request));
        match &result {
            Ok(outcome) => info!(
                sku = %sku,
                moved = outcome.moved_total,
                destination = %outcome.destination_code,
                emptied = outcome.emptied_source_codes.len(),
                "stock transferred"
            ),
            Err(err) => debug!(sku = %sku, code = err.code(), "transfer rejected"),
        }
        result
    }

    /// Apply a signed delta to one location, stamping today's date on the
    /// resulting transaction.
    pub fn adjust(&self, sku: &Sku, request: &AdjustRequest) -> ServiceResult<AdjustOutcome> {
        let recorded_on = chrono::Utc::now().date_naive();
        let result = self.with_product(sku, |product| adjust(product, request, recorded_on));
        match &result {
            Ok(outcome) => info!(
                sku = %sku,
                target = %outcome.target_code,
                delta = request.delta,
                reason = request.reason.as_str(),
                "stock adjusted"
            ),
            Err(err) => debug!(sku = %sku, code = err.code(), "adjustment rejected"),
        }
        result
    }

    /// Designate one existing location as the product's pick face.
    pub fn set_primary_location(&self, sku: &Sku, code: &str) -> ServiceResult<()> {
        let result = self.with_product(sku, |product| set_primary_location(product, code));
        match &result {
            Ok(()) => info!(sku = %sku, location = code, "primary location set"),
            Err(err) => debug!(sku = %sku, code = err.code(), "primary designation rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryInventory;
    use stockroom_inventory::{AdjustmentReason, Destination, SourceDraw};

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn service() -> StockService<InMemoryInventory> {
        StockService::new(InMemoryInventory::with_catalog())
    }

    #[test]
    fn unknown_sku_maps_to_product_not_found() {
        let svc = service();
        let err = svc.set_primary_location(&sku("NOPE"), "A").unwrap_err();
        assert_eq!(err, ServiceError::Stock(StockError::ProductNotFound));
        assert_eq!(err.code(), "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn transfer_persists_through_the_repository() {
        let svc = service();
        let book = sku("BOOK0001");
        let outcome = svc
            .transfer(
                &book,
                &TransferRequest {
                    sources: vec![SourceDraw {
                        code: "BOOK-02".to_string(),
                        quantity: 50,
                    }],
                    destination: Destination::Existing {
                        code: "BOOK-01".to_string(),
                    },
                    set_primary: true,
                },
            )
            .unwrap();

        assert_eq!(outcome.destination_new_quantity, 150);
        assert_eq!(outcome.emptied_source_codes, vec!["BOOK-02".to_string()]);

        let stored = svc.product(&book).unwrap();
        assert_eq!(stored.total_quantity(), 150);
        assert!(!stored.has_location("BOOK-02"));
        assert_eq!(stored.explicit_primary().map(|l| l.code()), Some("BOOK-01"));
    }

    #[test]
    fn rejected_adjustment_never_reaches_the_store() {
        let svc = service();
        let book = sku("BOOK0001");
        let before = svc.product(&book).unwrap();

        let err = svc
            .adjust(
                &book,
                &AdjustRequest {
                    target: Destination::Existing {
                        code: "BOOK-02".to_string(),
                    },
                    delta: -99999,
                    reason: AdjustmentReason::Shrinkage,
                    note: None,
                },
            )
            .unwrap_err();

        assert_eq!(err.code(), "INSUFFICIENT_QUANTITY");
        assert_eq!(svc.product(&book).unwrap(), before);
    }

    #[test]
    fn adjustment_stamps_todays_date() {
        let svc = service();
        let outcome = svc
            .adjust(
                &sku("TOY1234"),
                &AdjustRequest {
                    target: Destination::Existing {
                        code: "TOY-01".to_string(),
                    },
                    delta: 25,
                    reason: AdjustmentReason::Cycle,
                    note: Some("cycle count".to_string()),
                },
            )
            .unwrap();
        assert_eq!(outcome.transaction.date, chrono::Utc::now().date_naive());
        assert_eq!(outcome.new_quantity, 175);
    }
}
