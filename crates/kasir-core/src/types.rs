//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name, price    │   │  total_amount       │   │
//! │  │  description    │   │  stock          │   │  created_at         │   │
//! │  └─────────────────┘   └────────▲────────┘   │  details ───┐       │   │
//! │                                 │            └─────────────┼───────┘   │
//! │                                 │                          ▼           │
//! │                                 │            ┌─────────────────────┐   │
//! │                                 └────────────│ TransactionDetail   │   │
//! │                                   product_id │  name snapshot      │   │
//! │                                              │  quantity, subtotal │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A detail copies the product name and the priced subtotal at sale time, so
//! later catalog edits never rewrite history.
//!
//! ## Wire Names
//! JSON field names match what existing Kasir clients read (`total_transaksi`,
//! `produk_terlaris`, ...). Rust names stay in English.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category (Makanan, Minuman, Snack, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Owning category, if any.
    pub category_id: Option<i64>,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// The slice of a product the checkout engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductForSale {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

// =============================================================================
// Checkout
// =============================================================================

/// One basket line submitted for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// A priced basket line that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Identity the record store hands back for a freshly created transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionHeader {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A line of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale × quantity.
    pub subtotal: Money,
}

/// A completed sale. Immutable once committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Lines in request order.
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Sum of the detail subtotals. Equals `total_amount` for every
    /// transaction produced by the checkout engine.
    pub fn details_total(&self) -> Money {
        self.details.iter().map(|d| d.subtotal).sum()
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Product with the highest summed quantity inside a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BestSeller {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "qty_terjual")]
    pub quantity_sold: i64,
}

/// Revenue, count and best seller over a reporting window. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: Money,
    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,
    #[serde(rename = "produk_terlaris")]
    pub best_seller: Option<BestSeller>,
}

impl SalesSummary {
    /// The summary of a window with no sales.
    pub fn empty() -> Self {
        SalesSummary {
            total_revenue: Money::zero(),
            total_transactions: 0,
            best_seller: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
