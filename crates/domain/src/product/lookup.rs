//! Product lookup adapters used while aggregating feedback.

use std::collections::HashMap;

use async_trait::async_trait;
use common::ProductId;
use entity_store::{EntityStore, Product};
use tokio::sync::Mutex;

use crate::error::{DomainError, Result};

/// Resolves a product id to a live product record.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Returns the product, or `NotFound` if it is absent or soft-deleted.
    async fn product(&self, id: ProductId) -> Result<Product>;
}

/// Looks products up directly in the entity store, one read per call.
#[derive(Clone)]
pub struct StoreProductLookup<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> StoreProductLookup<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: EntityStore> ProductLookup for StoreProductLookup<S> {
    async fn product(&self, id: ProductId) -> Result<Product> {
        metrics::counter!("product_lookups_total").increment(1);
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }
}

/// Request-scoped cache in front of another lookup.
///
/// A product referenced by many feedback entries is fetched once. Failures
/// are not cached. Create one per request and drop it afterwards, so product
/// changes made by other requests are picked up on the next one.
pub struct CachedProductLookup<'a, L: ProductLookup + ?Sized> {
    inner: &'a L,
    cache: Mutex<HashMap<ProductId, Product>>,
}

impl<'a, L: ProductLookup + ?Sized> CachedProductLookup<'a, L> {
    pub fn new(inner: &'a L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<'a, L: ProductLookup + ?Sized> ProductLookup for CachedProductLookup<'a, L> {
    async fn product(&self, id: ProductId) -> Result<Product> {
        let mut cache = self.cache.lock().await;
        if let Some(product) = cache.get(&id) {
            metrics::counter!("product_lookup_cache_hits_total").increment(1);
            return Ok(product.clone());
        }

        let product = self.inner.product(id).await?;
        cache.insert(id, product.clone());
        Ok(product)
    }
}
