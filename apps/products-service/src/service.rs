//! # Products Service
//!
//! Catalog rules behind every product command.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Id-Keyed Operations                                 │
//! │                                                                         │
//! │  find_one / update / remove / restore_status                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.find_by_id(id) ── None ──► CoreError::ProductNotFound(id)        │
//! │       │                           (no write happens)                    │
//! │       ▼ Some                                                            │
//! │  store.update_fields(id, changes) ──► updated Product                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation touches a single row, so no transactions are opened.
//! Concurrent writes to one id are left to SQLite (last writer wins).

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use catalog_core::{
    CoreError, NewProduct, PageMeta, Paginated, PaginationQuery, Price, Product, ProductChanges,
};

use crate::store::{ProductStore, StoreError};

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A catalog rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The store failed; passed through unchanged.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Product command handlers over a [`ProductStore`].
pub struct ProductsService<S> {
    store: S,
}

impl<S: ProductStore> ProductsService<S> {
    pub fn new(store: S) -> Self {
        ProductsService { store }
    }

    /// Creates an available product. Duplicate names are allowed.
    pub async fn create(&self, product: NewProduct) -> ServiceResult<Product> {
        let created = self.store.insert(&product).await?;
        info!(id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Lists one page of available products with page metadata.
    ///
    /// A page past `lastPage` is not an error; it just has no data.
    pub async fn find_all(&self, query: PaginationQuery) -> ServiceResult<Paginated<Product>> {
        let total = self.store.count_available().await?;
        let data = self
            .store
            .find_many_available(query.skip(), query.limit())
            .await?;

        debug!(
            page = query.page(),
            limit = query.limit(),
            total,
            returned = data.len(),
            "Listed products"
        );

        Ok(Paginated {
            data,
            meta: PageMeta::new(&query, total),
        })
    }

    /// Fetches a product by id, available or not.
    pub async fn find_one(&self, id: i64) -> ServiceResult<Product> {
        match self.store.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                debug!(id, "Product lookup missed");
                Err(CoreError::ProductNotFound(id).into())
            }
        }
    }

    /// Changes name and/or price. Availability is left alone.
    ///
    /// With nothing to change, the stored product is returned as is.
    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Price>,
    ) -> ServiceResult<Product> {
        let current = self.find_one(id).await?;

        let changes = ProductChanges::details(name, price);
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = self.store.update_fields(id, &changes).await?;
        info!(id, "Product updated");
        Ok(updated)
    }

    /// Soft delete: marks the product unavailable.
    pub async fn remove(&self, id: i64) -> ServiceResult<Product> {
        self.find_one(id).await?;

        let removed = self
            .store
            .update_fields(id, &ProductChanges::availability(false))
            .await?;
        info!(id, "Product marked unavailable");
        Ok(removed)
    }

    /// Reactivates a product. There is no way to pick another state.
    pub async fn restore_status(&self, id: i64) -> ServiceResult<Product> {
        self.find_one(id).await?;

        let restored = self
            .store
            .update_fields(id, &ProductChanges::availability(true))
            .await?;
        info!(id, "Product marked available");
        Ok(restored)
    }

    /// Resolves every distinct id in `ids`, whatever its availability.
    ///
    /// Fails with [`CoreError::ProductsUnavailable`] naming each id that
    /// matched nothing.
    pub async fn validate_many(&self, ids: &[i64]) -> ServiceResult<Vec<Product>> {
        let requested: BTreeSet<i64> = ids.iter().copied().collect();
        let wanted: Vec<i64> = requested.iter().copied().collect();

        let found = self.store.find_many_by_ids(&wanted).await?;

        if found.len() != requested.len() {
            let present: BTreeSet<i64> = found.iter().map(|p| p.id).collect();
            let missing: Vec<i64> = requested.difference(&present).copied().collect();
            warn!(?missing, "Product validation failed");
            return Err(CoreError::ProductsUnavailable { missing }.into());
        }

        debug!(count = found.len(), "Products validated");
        Ok(found)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use catalog_db::{Database, DbConfig, ProductRepository};

    use crate::store::StoreResult;

    async fn service() -> ProductsService<ProductRepository> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ProductsService::new(db.products())
    }

    fn new_product(name: &str, cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Price::from_cents(cents).unwrap(),
        }
    }

    async fn seed(service: &ProductsService<impl ProductStore>, count: usize) -> Vec<Product> {
        let mut created = Vec::with_capacity(count);
        for i in 0..count {
            created.push(
                service
                    .create(new_product(&format!("Product {i}"), 100 + i as i64))
                    .await
                    .unwrap(),
            );
        }
        created
    }

    fn assert_not_found(err: ServiceError, id: i64) {
        match err {
            ServiceError::Domain(CoreError::ProductNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_returns_available_with_fresh_id() {
        let service = service().await;

        let a = service.create(new_product("Mouse", 1999)).await.unwrap();
        let b = service.create(new_product("Mouse", 1999)).await.unwrap();

        assert!(a.available && b.available);
        assert_ne!(a.id, b.id);
        assert_eq!(b.price.cents(), 1999);
    }

    #[tokio::test]
    async fn test_find_one_roundtrip_and_missing() {
        let service = service().await;
        let created = service.create(new_product("Webcam", 5500)).await.unwrap();

        assert_eq!(service.find_one(created.id).await.unwrap(), created);
        assert_not_found(service.find_one(404).await.unwrap_err(), 404);
    }

    #[tokio::test]
    async fn test_find_all_empty_catalog() {
        let service = service().await;

        let page = service.find_all(PaginationQuery::default()).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.last_page, 0);
    }

    #[tokio::test]
    async fn test_find_all_pages() {
        let service = service().await;
        seed(&service, 25).await;

        let third = service
            .find_all(PaginationQuery::new(3, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(third.data.len(), 5);
        assert_eq!(third.meta.total, 25);
        assert_eq!(third.meta.last_page, 3);

        let fourth = service
            .find_all(PaginationQuery::new(4, 10).unwrap())
            .await
            .unwrap();
        assert!(fourth.data.is_empty());
        assert_eq!(fourth.meta.page, 4);
        assert_eq!(fourth.meta.total, 25);
        assert_eq!(fourth.meta.last_page, 3);
    }

    #[tokio::test]
    async fn test_listing_order_is_stable() {
        let service = service().await;
        seed(&service, 6).await;

        let query = PaginationQuery::new(1, 4).unwrap();
        let first = service.find_all(query).await.unwrap();
        let again = service.find_all(query).await.unwrap();

        let ids: Vec<i64> = first.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(first.data, again.data);
    }

    #[tokio::test]
    async fn test_remove_hides_from_listing_only() {
        let service = service().await;
        let products = seed(&service, 3).await;
        let target = products[1].id;

        let removed = service.remove(target).await.unwrap();
        assert!(!removed.available);

        let fetched = service.find_one(target).await.unwrap();
        assert!(!fetched.available);

        let page = service.find_all(PaginationQuery::default()).await.unwrap();
        assert_eq!(page.meta.total, 2);
        assert!(page.data.iter().all(|p| p.id != target));

        // Second removal succeeds with the same outcome.
        let again = service.remove(target).await.unwrap();
        assert!(!again.available);
        assert_eq!(again.name, removed.name);
    }

    #[tokio::test]
    async fn test_restore_status_reactivates() {
        let service = service().await;
        let products = seed(&service, 2).await;
        let target = products[0].id;

        service.remove(target).await.unwrap();
        let restored = service.restore_status(target).await.unwrap();
        assert!(restored.available);

        let page = service.find_all(PaginationQuery::default()).await.unwrap();
        assert!(page.data.iter().any(|p| p.id == target));

        // Restoring an available product keeps it available.
        assert!(service.restore_status(target).await.unwrap().available);
    }

    #[tokio::test]
    async fn test_update_changes_details_only() {
        let service = service().await;
        let created = service.create(new_product("Lamp", 2500)).await.unwrap();
        service.remove(created.id).await.unwrap();

        let updated = service
            .update(created.id, Some("X".to_string()), Some(Price::from_cents(500).unwrap()))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "X");
        assert_eq!(updated.price.cents(), 500);
        assert!(!updated.available);
    }

    #[tokio::test]
    async fn test_update_partial_and_empty() {
        let service = service().await;
        let created = service.create(new_product("Hub", 3000)).await.unwrap();

        let renamed = service
            .update(created.id, Some("USB Hub".to_string()), None)
            .await
            .unwrap();
        assert_eq!(renamed.name, "USB Hub");
        assert_eq!(renamed.price, created.price);

        let unchanged = service.update(created.id, None, None).await.unwrap();
        assert_eq!(unchanged, renamed);
    }

    #[tokio::test]
    async fn test_validate_many_collapses_duplicates() {
        let service = service().await;
        seed(&service, 2).await;

        let found = service.validate_many(&[1, 2, 2, 1]).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_validate_many_names_missing_ids() {
        let service = service().await;
        seed(&service, 2).await;

        let err = service.validate_many(&[1, 1, 2, 2, 3]).await.unwrap_err();
        match err {
            ServiceError::Domain(CoreError::ProductsUnavailable { missing }) => {
                assert_eq!(missing, vec![3]);
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_many_ignores_availability() {
        let service = service().await;
        seed(&service, 2).await;
        service.remove(2).await.unwrap();

        assert_eq!(service.validate_many(&[1, 2]).await.unwrap().len(), 2);
        assert!(service.validate_many(&[]).await.unwrap().is_empty());
    }

    /// Counts writes reaching the repository.
    struct CountingStore {
        inner: ProductRepository,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl ProductStore for CountingStore {
        async fn insert(&self, product: &NewProduct) -> StoreResult<Product> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            ProductStore::insert(&self.inner, product).await
        }

        async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
            ProductStore::find_by_id(&self.inner, id).await
        }

        async fn find_many_available(&self, skip: u64, take: u64) -> StoreResult<Vec<Product>> {
            ProductStore::find_many_available(&self.inner, skip, take).await
        }

        async fn count_available(&self) -> StoreResult<u64> {
            ProductStore::count_available(&self.inner).await
        }

        async fn find_many_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Product>> {
            ProductStore::find_many_by_ids(&self.inner, ids).await
        }

        async fn update_fields(&self, id: i64, changes: &ProductChanges) -> StoreResult<Product> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            ProductStore::update_fields(&self.inner, id, changes).await
        }
    }

    #[tokio::test]
    async fn test_missing_id_performs_no_write() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = ProductsService::new(CountingStore {
            inner: db.products(),
            writes: AtomicUsize::new(0),
        });

        let price = Price::from_cents(500).unwrap();
        assert_not_found(
            service
                .update(9, Some("X".to_string()), Some(price))
                .await
                .unwrap_err(),
            9,
        );
        assert_not_found(service.remove(9).await.unwrap_err(), 9);
        assert_not_found(service.restore_status(9).await.unwrap_err(), 9);

        assert_eq!(service.store.writes.load(Ordering::SeqCst), 0);
    }
}
