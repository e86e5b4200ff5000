//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert with database-assigned ids
//! - Paged listing of available products
//! - Bulk lookup by id (any availability)
//! - Partial field updates
//!
//! ## Soft Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Availability Flag                                    │
//! │                                                                         │
//! │   remove_product            update_product_status                       │
//! │        │                           │                                    │
//! │        ▼                           ▼                                    │
//! │   available = 0  ◄────────►  available = 1                              │
//! │                                                                         │
//! │   Rows are never deleted. Listing filters on `available = 1`;           │
//! │   lookups by id ignore the flag.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use catalog_core::{NewProduct, Product, ProductChanges};

/// Column list matching the `Product` row mapping.
const PRODUCT_COLUMNS: &str = "id, name, price_cents, available, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.insert(&new_product).await?;
/// let page = repo.find_many_available(0, 10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new, available product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, price = %product.price, "Inserting product");

        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO products (name, price_cents, available, created_at, updated_at)
            VALUES (?1, ?2, 1, ?3, ?3)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(product.name.as_str())
            .bind(product.price.cents())
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        debug!(id = created.id, "Product inserted");
        Ok(created)
    }

    /// Gets a product by its id, regardless of availability.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists available products in id order.
    ///
    /// ## Arguments
    /// * `skip` - Rows to skip (offset)
    /// * `take` - Maximum rows to return
    ///
    /// Both values are clamped to `i64::MAX`; an offset past the last row
    /// yields an empty list.
    pub async fn find_many_available(&self, skip: u64, take: u64) -> DbResult<Vec<Product>> {
        debug!(skip, take, "Listing available products");

        let offset = i64::try_from(skip).unwrap_or(i64::MAX);
        let limit = i64::try_from(take).unwrap_or(i64::MAX);

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE available = 1
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Counts available products.
    pub async fn count_available(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Fetches every product whose id is in `ids`, regardless of availability.
    ///
    /// Ids that match nothing are simply absent from the result.
    pub async fn find_many_by_ids(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(requested = ids.len(), "Fetching products by id");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Applies a partial update and returns the stored row.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Row after the update
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn update_fields(&self, id: i64, changes: &ProductChanges) -> DbResult<Product> {
        debug!(id, ?changes, "Updating product");

        let now = Utc::now();
        let sql = format!(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                price_cents = COALESCE(?3, price_cents),
                available = COALESCE(?4, available),
                updated_at = ?5
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.price.map(|p| p.cents()))
            .bind(changes.available)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use catalog_core::Price;

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn new_product(name: &str, cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Price::from_cents(cents).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = repo().await;

        let first = repo.insert(&new_product("Keyboard", 4999)).await.unwrap();
        let second = repo.insert(&new_product("Keyboard", 4999)).await.unwrap();

        assert!(first.available);
        assert_eq!(first.price.cents(), 4999);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_by_id_roundtrip() {
        let repo = repo().await;
        let created = repo.insert(&new_product("Mouse", 1999)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));

        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_listing_skips_unavailable() {
        let repo = repo().await;
        for i in 0..5 {
            repo.insert(&new_product(&format!("Item {i}"), 100 + i)).await.unwrap();
        }
        repo.update_fields(2, &ProductChanges::availability(false))
            .await
            .unwrap();

        assert_eq!(repo.count_available().await.unwrap(), 4);

        let page = repo.find_many_available(0, 10).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);

        let window = repo.find_many_available(1, 2).await.unwrap();
        let ids: Vec<i64> = window.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_listing_far_past_the_end_is_empty() {
        let repo = repo().await;
        repo.insert(&new_product("Only", 100)).await.unwrap();

        let huge_skip = (u64::from(u32::MAX) - 1) * u64::from(u32::MAX);
        assert!(repo
            .find_many_available(huge_skip, u64::from(u32::MAX))
            .await
            .unwrap()
            .is_empty());
        assert!(repo
            .find_many_available(u64::MAX, u64::MAX)
            .await
            .unwrap()
            .is_empty());

        assert_eq!(repo.find_many_available(0, u64::MAX).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_many_by_ids_ignores_availability() {
        let repo = repo().await;
        for i in 0..3 {
            repo.insert(&new_product(&format!("Item {i}"), 500)).await.unwrap();
        }
        repo.update_fields(3, &ProductChanges::availability(false))
            .await
            .unwrap();

        let found = repo.find_many_by_ids(&[1, 3, 42]).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(repo.find_many_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_fields_is_partial() {
        let repo = repo().await;
        let created = repo.insert(&new_product("Desk", 15000)).await.unwrap();

        let renamed = repo
            .update_fields(created.id, &ProductChanges::details(Some("Standing Desk".into()), None))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Standing Desk");
        assert_eq!(renamed.price, created.price);
        assert!(renamed.available);
        assert_eq!(renamed.created_at, created.created_at);

        let hidden = repo
            .update_fields(created.id, &ProductChanges::availability(false))
            .await
            .unwrap();
        assert!(!hidden.available);
        assert_eq!(hidden.name, "Standing Desk");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update_fields(77, &ProductChanges::availability(true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ids_not_reused() {
        let repo = repo().await;
        let first = repo.insert(&new_product("A", 100)).await.unwrap();
        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(first.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let second = repo.insert(&new_product("B", 100)).await.unwrap();
        assert!(second.id > first.id);
    }
}
