//! # Product Store Contract
//!
//! The persistence operations [`ProductsService`](crate::service::ProductsService)
//! depends on. `catalog_db::ProductRepository` is the production
//! implementation; tests may wrap it to observe calls.

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::{NewProduct, Product, ProductChanges};
use catalog_db::{DbError, ProductRepository};

/// Opaque persistence failure. The domain service never inspects it.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError(Box::new(err))
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::new(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations needed by the products service.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts an available product and returns it with its new id.
    async fn insert(&self, product: &NewProduct) -> StoreResult<Product>;

    /// Looks a product up by id, whatever its availability.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>>;

    /// Available products in stable id order.
    async fn find_many_available(&self, skip: u64, take: u64) -> StoreResult<Vec<Product>>;

    async fn count_available(&self) -> StoreResult<u64>;

    /// Products matching any of `ids`, whatever their availability.
    async fn find_many_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>>;

    /// Writes the given fields. Fails when `id` does not exist.
    async fn update_fields(&self, id: i64, changes: &ProductChanges) -> StoreResult<Product>;
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: &NewProduct) -> StoreResult<Product> {
        Ok(ProductRepository::insert(self, product).await?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(ProductRepository::find_by_id(self, id).await?)
    }

    async fn find_many_available(&self, skip: u64, take: u64) -> StoreResult<Vec<Product>> {
        Ok(ProductRepository::find_many_available(self, skip, take).await?)
    }

    async fn count_available(&self) -> StoreResult<u64> {
        Ok(ProductRepository::count_available(self).await?)
    }

    async fn find_many_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>> {
        Ok(ProductRepository::find_many_by_ids(self, ids).await?)
    }

    async fn update_fields(&self, id: i64, changes: &ProductChanges) -> StoreResult<Product> {
        Ok(ProductRepository::update_fields(self, id, changes).await?)
    }
}
