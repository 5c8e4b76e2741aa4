//! # Transaction Repository
//!
//! Checkout, transaction lookup and sales reports.
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/checkout {"items": [...]}                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionRepository::checkout(items)                                │
//! │       │                                                                 │
//! │       ├── SqliteUnitOfWork::begin        BEGIN IMMEDIATE               │
//! │       ├── kasir_core::checkout(&mut uow) lookups, decrements, inserts  │
//! │       │                                                                 │
//! │       ├── Ok(tx)   → uow.commit()        COMMIT, log info              │
//! │       ├── Rejected → drop(uow)           ROLLBACK, log warn            │
//! │       └── Store    → drop(uow)           ROLLBACK, log error           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkouts take the SQLite write lock when they begin, so racing checkouts
//! run one after another. A later one sees the stock the earlier one left
//! and is refused with `InsufficientStock` if too little remains. A busy
//! error only surfaces when the lock is held longer than the busy timeout.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use super::checkout::SqliteUnitOfWork;
use crate::error::{DbError, DbResult};
use kasir_core::{
    checkout, summarize_sales, CheckoutError, CheckoutItem, Money, ReportPeriod, SalesSummary,
    Transaction, TransactionDetail,
};

/// Header row of a stored transaction.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    total_amount: Money,
    created_at: DateTime<Utc>,
}

/// Repository for sales.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Runs one atomic checkout.
    ///
    /// ## Returns
    /// * `Ok(Transaction)` - committed, stock decremented
    /// * `Err(CheckoutError::Rejected(_))` - business rule refused the basket, nothing written
    /// * `Err(CheckoutError::Store(_))` - database failure, nothing written
    pub async fn checkout(
        &self,
        items: &[CheckoutItem],
    ) -> Result<Transaction, CheckoutError<DbError>> {
        debug!(lines = items.len(), "Starting checkout");

        let mut uow = SqliteUnitOfWork::begin(&self.pool)
            .await
            .map_err(CheckoutError::Store)?;

        match checkout(&mut uow, items).await {
            Ok(transaction) => {
                uow.commit().await.map_err(|err| {
                    error!(error = %err, "Checkout commit failed");
                    CheckoutError::Store(err)
                })?;

                info!(
                    id = transaction.id,
                    total = %transaction.total_amount,
                    lines = transaction.details.len(),
                    "Checkout committed"
                );
                Ok(transaction)
            }
            Err(CheckoutError::Rejected(reason)) => {
                warn!(reason = %reason, "Checkout rejected");
                Err(CheckoutError::Rejected(reason))
            }
            Err(CheckoutError::Store(err)) => {
                error!(error = %err, "Checkout failed in store");
                Err(CheckoutError::Store(err))
            }
        }
    }

    /// Gets a transaction with its details in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction {
            id: row.id,
            total_amount: row.total_amount,
            created_at: row.created_at,
            details,
        }))
    }

    /// Sales summary for `period`, read from a single snapshot.
    pub async fn summarize(&self, period: &ReportPeriod) -> DbResult<SalesSummary> {
        let mut uow = SqliteUnitOfWork::begin_read(&self.pool).await?;
        let summary = summarize_sales(&mut uow, period).await?;
        uow.commit().await?;

        debug!(
            ?period,
            revenue = %summary.total_revenue,
            transactions = summary.total_transactions,
            "Sales summary"
        );
        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
