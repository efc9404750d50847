//! Stock mutation engine.
//!
//! Three operations over one product's ledger: `transfer` reshuffles quantity
//! between locations, `adjust` applies a signed delta and appends one
//! transaction, `set_primary_location` re-designates the pick-face row.
//!
//! Every operation validates the whole request before touching the product:
//! on any `Err` the product is unchanged. The engine performs no IO, no
//! logging and no retries; callers own the clock (`adjust` takes the date to
//! record) and the per-product serialization boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{StockError, StockResult};

use crate::product::{AdjustmentReason, Product, Transaction};

/// Where moved or adjusted quantity should land.
///
/// `Existing` must name a location already on the product. `New` asks for a
/// fresh row; whether a colliding code is an error (transfer) or silently
/// reused (adjust) is operation-specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Destination {
    Existing { code: String },
    New { code: String },
}

/// One `{code, quantity}` draw from a transfer source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDraw {
    pub code: String,
    pub quantity: u64,
}

/// Move quantity from one or more source locations into one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sources: Vec<SourceDraw>,
    pub destination: Destination,
    pub set_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub moved_total: u64,
    pub destination_code: String,
    pub destination_new_quantity: u64,
    pub destination_is_primary: bool,
    /// Source locations removed because the transfer drained them to 0.
    pub emptied_source_codes: Vec<String>,
}

/// Apply a signed delta to one location and record it in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustRequest {
    pub target: Destination,
    pub delta: i64,
    pub reason: AdjustmentReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustOutcome {
    pub target_code: String,
    pub new_quantity: u64,
    pub transaction: Transaction,
}

/// Cumulative draw per source code, in first-seen order.
///
/// Duplicate source entries are legal; folding them keeps validation honest
/// when the same code is drawn twice (the individual draws could each fit
/// while their sum overdraws the location). A per-code sum past `u64::MAX`
/// is as unserviceable as any other malformed draw and is rejected rather
/// than wrapped.
fn fold_draws(sources: &[SourceDraw]) -> StockResult<Vec<(String, u64)>> {
    let mut draws: Vec<(String, u64)> = Vec::new();
    for s in sources {
        match draws.iter_mut().find(|(code, _)| code == &s.code) {
            Some((_, total)) => {
                *total = total
                    .checked_add(s.quantity)
                    .ok_or(StockError::InvalidSourceInput)?;
            }
            None => draws.push((s.code.clone(), s.quantity)),
        }
    }
    Ok(draws)
}

/// Validate a transfer destination and resolve it to a concrete code.
///
/// `Existing` must be present on the product and not coincide with a source;
/// `New` must be non-blank, not coincide with a source, and not collide with
/// an existing row. The equals-source check runs before the collision check
/// so a `New` code that is also a source reports the source conflict.
fn resolve_destination(
    product: &Product,
    destination: &Destination,
    draws: &[(String, u64)],
) -> StockResult<String> {
    let (code, wants_new) = match destination {
        Destination::Existing { code } => (code.as_str(), false),
        Destination::New { code } => (code.trim(), true),
    };
    if code.is_empty() {
        return Err(StockError::DestinationNotSelected);
    }
    if draws.iter().any(|(source, _)| source == code) {
        return Err(StockError::DestinationEqualsSource);
    }
    match (wants_new, product.has_location(code)) {
        (true, true) => Err(StockError::destination_exists(code)),
        (false, false) => Err(StockError::DestinationNotSelected),
        _ => Ok(code.to_string()),
    }
}

/// Resolve an adjustment target to a concrete code.
///
/// Unlike the transfer destination, a `New` code that already exists is
/// silently treated as `Existing`: the adjustment lands on whichever row has
/// that code. Kept as a documented degenerate-case policy, deliberately
/// asymmetric with `resolve_destination`.
fn resolve_adjust_target(product: &Product, target: &Destination) -> StockResult<String> {
    match target {
        Destination::Existing { code } => {
            if code.is_empty() || !product.has_location(code) {
                return Err(StockError::DestinationNotSelected);
            }
            Ok(code.clone())
        }
        Destination::New { code } => {
            let code = code.trim();
            if code.is_empty() {
                return Err(StockError::DestinationNotSelected);
            }
            Ok(code.to_string())
        }
    }
}

/// Move quantity from one or more sources into a single destination, in one
/// atomic step.
///
/// Validation covers the whole request up front; on any error the product is
/// untouched. Sources drained to exactly 0 are removed from the ledger and
/// reported in `emptied_source_codes`. With `set_primary`, the destination
/// becomes the product's only primary location.
///
/// Transfers conserve `Product::total_quantity` and append **no** transaction
/// entry: reshelving is not a stock-level change.
pub fn transfer(product: &mut Product, request: &TransferRequest) -> StockResult<TransferOutcome> {
    if request.sources.is_empty() {
        return Err(StockError::NoSources);
    }
    for s in &request.sources {
        if s.code.trim().is_empty() || s.quantity == 0 {
            return Err(StockError::InvalidSourceInput);
        }
    }

    let draws = fold_draws(&request.sources)?;
    let mut moved_total = 0u64;
    for (code, total) in &draws {
        let available = product
            .location(code)
            .ok_or_else(|| StockError::source_not_found(code))?
            .quantity();
        if *total > available {
            return Err(StockError::insufficient(code));
        }
        moved_total = moved_total
            .checked_add(*total)
            .ok_or(StockError::InvalidSourceInput)?;
    }
    let destination_code = resolve_destination(product, &request.destination, &draws)?;
    // Project the destination credit while still validating so an overflow
    // is a typed rejection, not a wrapped quantity.
    let destination_new_quantity = product
        .location(&destination_code)
        .map(|l| l.quantity())
        .unwrap_or(0)
        .checked_add(moved_total)
        .ok_or(StockError::InvalidSourceInput)?;

    // Validation passed; from here the whole mutation applies.
    let mut emptied_source_codes = Vec::new();
    for (code, total) in &draws {
        // Presence and sufficiency were checked above.
        let mut drained = false;
        if let Some(source) = product.location_mut(code) {
            source.quantity -= total;
            drained = source.quantity == 0;
        }
        if drained {
            product.remove_location(code);
            emptied_source_codes.push(code.clone());
        }
    }

    let destination = product.ensure_location(&destination_code);
    destination.quantity = destination_new_quantity;

    if request.set_primary {
        product.clear_primary_flags();
        if let Some(destination) = product.location_mut(&destination_code) {
            destination.is_primary = true;
        }
    }
    let destination_is_primary = product
        .location(&destination_code)
        .map(|l| l.is_primary())
        .unwrap_or(false);

    Ok(TransferOutcome {
        moved_total,
        destination_code,
        destination_new_quantity,
        destination_is_primary,
        emptied_source_codes,
    })
}

/// Apply a signed quantity delta to one location and append exactly one
/// transaction recording it.
///
/// `recorded_on` is the calendar date stamped on the log entry; the caller
/// owns the clock so the engine stays deterministic. A delta that would take
/// the location below 0 is rejected with no mutation; a delta landing exactly
/// on 0 removes the row.
pub fn adjust(
    product: &mut Product,
    request: &AdjustRequest,
    recorded_on: NaiveDate,
) -> StockResult<AdjustOutcome> {
    if request.delta == 0 {
        return Err(StockError::InvalidQuantity);
    }
    let target_code = resolve_adjust_target(product, &request.target)?;
    let current = product
        .location(&target_code)
        .map(|l| l.quantity())
        .unwrap_or(0);

    let new_quantity = if request.delta > 0 {
        current
            .checked_add(request.delta as u64)
            .ok_or(StockError::InvalidQuantity)?
    } else {
        current
            .checked_sub(request.delta.unsigned_abs())
            .ok_or_else(|| StockError::insufficient(&target_code))?
    };

    if new_quantity == 0 {
        product.remove_location(&target_code);
    } else {
        product.ensure_location(&target_code).quantity = new_quantity;
    }

    let transaction = Transaction::new(
        recorded_on,
        request.delta,
        Some(request.reason),
        request.note.clone(),
    );
    product.prepend_transaction(transaction.clone());

    Ok(AdjustOutcome {
        target_code,
        new_quantity,
        transaction,
    })
}

/// Mark one existing location as the product's primary (pick-face) location.
///
/// Clears every other flag first so at most one location is ever primary.
/// No transaction entry is appended.
pub fn set_primary_location(product: &mut Product, code: &str) -> StockResult<()> {
    if !product.has_location(code) {
        return Err(StockError::location_not_found(code));
    }
    product.clear_primary_flags();
    if let Some(location) = product.location_mut(code) {
        location.is_primary = true;
    }
    Ok(())
}
