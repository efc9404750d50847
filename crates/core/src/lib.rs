//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the `Sku` identifier and the typed error taxonomy shared by the mutation
//! engine and its callers.

pub mod error;
pub mod sku;

pub use error::{StockError, StockResult};
pub use sku::Sku;
