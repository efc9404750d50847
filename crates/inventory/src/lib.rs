//! Inventory domain module.
//!
//! This crate contains the business rules for multi-location stock,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage): the product model with its location ledger and transaction log,
//! and the mutation engine that moves quantity between locations.

pub mod engine;
pub mod product;

pub use engine::{
    AdjustOutcome, AdjustRequest, Destination, SourceDraw, TransferOutcome, TransferRequest,
    adjust, set_primary_location, transfer,
};
pub use product::{
    AdjustmentReason, Dimensions, Product, StockLocation, Transaction, TransactionId,
};
