//! # SQLite Unit of Work
//!
//! One `sqlx` transaction exposed to kasir-core through the capability
//! traits. The checkout engine and the sales aggregator run against it
//! without knowing it is SQLite.
//!
//! ## Lifecycle
//! ```text
//! SqliteUnitOfWork::begin(pool)      BEGIN IMMEDIATE
//!       │
//!       ▼
//! kasir_core::checkout(&mut uow, items)
//!   ├── product_for_sale    SELECT name, price, stock ...
//!   ├── decrement_stock     UPDATE ... WHERE stock >= ?qty
//!   ├── create_transaction  INSERT ... RETURNING id, created_at
//!   └── append_detail       INSERT ... RETURNING id
//!       │
//!       ├── Ok  → uow.commit()       COMMIT
//!       └── Err → drop(uow)          ROLLBACK
//! ```

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{
    CatalogAccessor, Money, PendingDetail, ProductForSale, TransactionHeader,
    TransactionRecordStore, UnitOfWork,
};

/// An open SQLite transaction.
///
/// Dropping it without calling [`commit`](Self::commit) rolls back every
/// statement issued through it.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    /// Acquires a pooled connection and opens a write transaction on it.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so a second checkout
    /// waits in the busy handler instead of failing when it upgrades from
    /// its first `SELECT` to the stock `UPDATE`.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(SqliteUnitOfWork { tx })
    }

    /// Opens a deferred transaction for read-only work (reports).
    pub async fn begin_read(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin().await?;
        Ok(SqliteUnitOfWork { tx })
    }

    /// Commits every staged change.
    pub async fn commit(self) -> DbResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    pub(super) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    type Error = DbError;
}

impl CatalogAccessor for SqliteUnitOfWork {
    async fn product_for_sale(&mut self, product_id: i64) -> DbResult<Option<ProductForSale>> {
        let product = sqlx::query_as::<_, ProductForSale>(
            "SELECT name, price, stock FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(product)
    }

    async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(self.conn())
        .await?;

        let applied = result.rows_affected() == 1;
        debug!(product_id, quantity, applied, "Stock decrement");
        Ok(applied)
    }
}

impl TransactionRecordStore for SqliteUnitOfWork {
    async fn create_transaction(&mut self, total_amount: Money) -> DbResult<TransactionHeader> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            r#"
            INSERT INTO transactions (total_amount)
            VALUES (?1)
            RETURNING id, created_at
            "#,
        )
        .bind(total_amount)
        .fetch_one(self.conn())
        .await?;

        debug!(id = header.id, total = %total_amount, "Transaction created");
        Ok(header)
    }

    async fn append_detail(
        &mut self,
        transaction_id: i64,
        detail: &PendingDetail,
    ) -> DbResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transaction_details (
                transaction_id, product_id, product_name, quantity, subtotal
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(transaction_id)
        .bind(detail.product_id)
        .bind(&detail.product_name)
        .bind(detail.quantity)
        .bind(detail.subtotal)
        .fetch_one(self.conn())
        .await?;

        Ok(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{add_product, memory_db};

    #[tokio::test]
    async fn test_conditional_decrement() {
        let db = memory_db().await;
        let kopi = add_product(&db, "Kopi", 3500, 5).await;

        let mut uow = SqliteUnitOfWork::begin(db.pool()).await.unwrap();
        assert!(uow.decrement_stock(kopi.id, 5).await.unwrap());
        assert!(!uow.decrement_stock(kopi.id, 1).await.unwrap());
        assert!(!uow.decrement_stock(999, 1).await.unwrap());
        uow.commit().await.unwrap();

        let kopi = db.products().get_by_id(kopi.id).await.unwrap().unwrap();
        assert_eq!(kopi.stock, 0);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = memory_db().await;
        let kopi = add_product(&db, "Kopi", 3500, 5).await;

        {
            let mut uow = SqliteUnitOfWork::begin(db.pool()).await.unwrap();
            assert!(uow.decrement_stock(kopi.id, 2).await.unwrap());
            let header = uow.create_transaction(Money::from_minor(7000)).await.unwrap();
            assert!(header.id > 0);
        }

        let kopi = db.products().get_by_id(kopi.id).await.unwrap().unwrap();
        assert_eq!(kopi.stock, 5);
        assert_eq!(db.transactions().get_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_product_for_sale() {
        let db = memory_db().await;
        let teh = add_product(&db, "Teh", 4000, 15).await;

        let mut uow = SqliteUnitOfWork::begin_read(db.pool()).await.unwrap();
        let found = uow.product_for_sale(teh.id).await.unwrap();
        assert_eq!(
            found,
            Some(ProductForSale {
                name: "Teh".to_string(),
                price: Money::from_minor(4000),
                stock: 15,
            })
        );
        assert_eq!(uow.product_for_sale(999).await.unwrap(), None);
        uow.commit().await.unwrap();
    }
}
