//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Two Access Styles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog CRUD (flat repositories, one statement per call)              │
//! │  ├── ProductRepository   list / get_by_id / insert / update / delete   │
//! │  └── CategoryRepository  list / get_by_id / insert / update / delete   │
//! │                                                                         │
//! │  Sales (unit of work, many statements, commit or roll back)            │
//! │  └── TransactionRepository                                             │
//! │       ├── checkout(items)  ── SqliteUnitOfWork ── kasir_core::checkout │
//! │       ├── summarize(period) ─ SqliteUnitOfWork ── summarize_sales      │
//! │       └── get_by_id(id)                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout, lookup, reports

pub mod category;
pub mod checkout;
pub mod product;
pub mod report;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_support {
    use kasir_core::{CategoryInput, Money, Product, ProductInput};

    use crate::pool::{Database, DbConfig};

    pub async fn memory_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn add_product(db: &Database, name: &str, price: i64, stock: i64) -> Product {
        db.products()
            .insert(&ProductInput {
                name: name.to_string(),
                price: Money::from_minor(price),
                stock,
                category_id: None,
            })
            .await
            .unwrap()
    }

    pub fn category(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: format!("Kategori {name}"),
        }
    }
}
