//! Storage and orchestration for the stock mutation engine.
//!
//! The domain crates are pure; this crate supplies what they deliberately
//! leave out: the repository abstraction over product storage, an in-memory
//! implementation (tests/dev), the seed catalog, and `StockService` — the
//! application boundary that gives every operation serializable
//! read-modify-write atomicity per product.

pub mod catalog;
pub mod in_memory;
pub mod repository;
pub mod service;

pub use in_memory::InMemoryInventory;
pub use repository::{InventoryRepository, RepositoryError};
pub use service::{ServiceError, ServiceResult, StockService};
