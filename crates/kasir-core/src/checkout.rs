//! # Checkout Engine
//!
//! Turns a basket into one committed [`Transaction`] or nothing at all.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(store, items)                               │
//! │                                                                         │
//! │  items empty? ──────────────────────────────► EmptyBasket              │
//! │  any quantity <= 0? ────────────────────────► Validation               │
//! │       │                                                                 │
//! │       ▼  for each line, in request order                               │
//! │  product_for_sale(id) ── None ──────────────► ProductNotFound(id)      │
//! │       │                                                                 │
//! │  subtotal = price × qty, total += subtotal ─► AmountOverflow           │
//! │       │                                                                 │
//! │  decrement_stock(id, qty) ── refused ───────► InsufficientStock        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create_transaction(total) → id, created_at                            │
//! │  append_detail(id, line)   × N, same order                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transaction { id, total_amount, details }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never commits. The caller owns the unit of work: it commits on
//! `Ok` and drops (rolls back) on `Err`, so a failure at any step leaves stock
//! and transaction tables exactly as they were.

use std::future::Future;

use crate::error::{CheckoutError, CoreError};
use crate::money::Money;
use crate::types::{
    CheckoutItem, PendingDetail, ProductForSale, Transaction, TransactionDetail, TransactionHeader,
};
use crate::validation::validate_quantity;

// =============================================================================
// Capabilities
// =============================================================================

/// An open, uncommitted set of reads and writes against the backing store.
///
/// Implementors are the only place where storage errors come from; every
/// capability below reports failures as `Self::Error`.
pub trait UnitOfWork {
    type Error;
}

/// Price/stock lookup and stock decrement.
pub trait CatalogAccessor: UnitOfWork {
    /// Current name, price and stock of a product, or `None` if absent.
    fn product_for_sale(
        &mut self,
        product_id: i64,
    ) -> impl Future<Output = Result<Option<ProductForSale>, Self::Error>> + Send;

    /// Removes `quantity` units from stock if enough are on hand.
    ///
    /// Returns `false` (and changes nothing) when the decrement would take
    /// stock below zero.
    fn decrement_stock(
        &mut self,
        product_id: i64,
        quantity: i64,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Append-only storage of transactions and their lines.
pub trait TransactionRecordStore: UnitOfWork {
    /// Creates the transaction row and returns its store-assigned identity.
    fn create_transaction(
        &mut self,
        total_amount: Money,
    ) -> impl Future<Output = Result<TransactionHeader, Self::Error>> + Send;

    /// Writes one line linked to `transaction_id`, returning the line id.
    fn append_detail(
        &mut self,
        transaction_id: i64,
        detail: &PendingDetail,
    ) -> impl Future<Output = Result<i64, Self::Error>> + Send;
}

// =============================================================================
// Engine
// =============================================================================

/// Runs one checkout inside `store`.
///
/// ## Returns
/// * `Ok(Transaction)` - every effect is staged in `store`, ready to commit
/// * `Err(CheckoutError::Rejected(_))` - the basket broke a business rule
/// * `Err(CheckoutError::Store(_))` - the store failed
///
/// In both error cases the caller must discard `store` without committing.
pub async fn checkout<S>(
    store: &mut S,
    items: &[CheckoutItem],
) -> Result<Transaction, CheckoutError<S::Error>>
where
    S: CatalogAccessor + TransactionRecordStore,
{
    if items.is_empty() {
        return Err(CoreError::EmptyBasket.into());
    }

    for item in items {
        validate_quantity(item.quantity).map_err(CoreError::from)?;
    }

    let mut total = Money::zero();
    let mut pending = Vec::with_capacity(items.len());

    for item in items {
        let product = store
            .product_for_sale(item.product_id)
            .await
            .map_err(CheckoutError::Store)?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

        let overflow = || CoreError::AmountOverflow {
            product_id: item.product_id,
        };
        let subtotal = product
            .price
            .checked_mul_quantity(item.quantity)
            .ok_or_else(overflow)?;
        total = total.checked_add(subtotal).ok_or_else(overflow)?;

        let applied = store
            .decrement_stock(item.product_id, item.quantity)
            .await
            .map_err(CheckoutError::Store)?;
        if !applied {
            return Err(CoreError::InsufficientStock {
                product_id: item.product_id,
                name: product.name,
                available: product.stock,
                requested: item.quantity,
            }
            .into());
        }

        pending.push(PendingDetail {
            product_id: item.product_id,
            product_name: product.name,
            quantity: item.quantity,
            subtotal,
        });
    }

    let header = store
        .create_transaction(total)
        .await
        .map_err(CheckoutError::Store)?;

    let mut details = Vec::with_capacity(pending.len());
    for line in pending {
        let id = store
            .append_detail(header.id, &line)
            .await
            .map_err(CheckoutError::Store)?;
        details.push(TransactionDetail {
            id,
            transaction_id: header.id,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            subtotal: line.subtotal,
        });
    }

    Ok(Transaction {
        id: header.id,
        total_amount: total,
        created_at: header.created_at,
        details,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
