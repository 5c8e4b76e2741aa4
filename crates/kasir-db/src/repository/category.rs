//! # Category Repository
//!
//! Database operations for product categories.
//!
//! Deleting a category detaches its products (`category_id` becomes NULL via
//! `ON DELETE SET NULL`); the products themselves stay on sale.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Category, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    pub async fn insert(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "Inserting category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Replaces name and description of an existing category.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        debug!(id, name = %input.name, "Updating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name = ?2,
                description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category, detaching its products.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{category, memory_db};
    use kasir_core::{Money, ProductInput};

    #[tokio::test]
    async fn test_crud_round() {
        let db = memory_db().await;
        let repo = db.categories();

        let makanan = repo.insert(&category("Makanan")).await.unwrap();
        let minuman = repo.insert(&category("Minuman")).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![makanan.clone(), minuman.clone()]);

        let renamed = repo
            .update(
                minuman.id,
                &CategoryInput {
                    name: "Minuman Dingin".to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Minuman Dingin");
        assert_eq!(renamed.description, "");

        repo.delete(makanan.id).await.unwrap();
        assert_eq!(repo.get_by_id(makanan.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_category() {
        let db = memory_db().await;
        let repo = db.categories();

        assert!(matches!(
            repo.update(5, &category("Snack")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(repo.delete(5).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_detaches_products() {
        let db = memory_db().await;
        let snack = db.categories().insert(&category("Snack")).await.unwrap();
        let chips = db
            .products()
            .insert(&ProductInput {
                name: "Keripik".to_string(),
                price: Money::from_minor(6000),
                stock: 10,
                category_id: Some(snack.id),
            })
            .await
            .unwrap();

        db.categories().delete(snack.id).await.unwrap();

        let chips = db.products().get_by_id(chips.id).await.unwrap().unwrap();
        assert_eq!(chips.category_id, None);
        assert_eq!(chips.stock, 10);
    }
}
