//! Catalog store port.
//!
//! The inventory logic reads and writes products exclusively through this
//! trait. Adapters (in-memory, Postgres) live in `stockroom-infra`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::product::{NewProduct, Product};
use stockroom_core::ProductId;

pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog store operation error.
///
/// These are **infrastructure errors**; they are surfaced unchanged by the
/// inventory service and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached (connection, pool, lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected the write (constraint violation).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// Any other backend failure, including rows that cannot be decoded.
    #[error("store error: {0}")]
    Backend(String),
}

/// Durable record storage for products.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every stored product, in store-defined order.
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// Products whose category equals `category` exactly.
    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Upsert by id; returns the stored representation.
    async fn save(&self, product: Product) -> StoreResult<Product>;

    /// Create a record, assigning the next id.
    ///
    /// Only bootstrap seeding calls this; no request surface creates products.
    async fn insert(&self, product: NewProduct) -> StoreResult<Product>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        (**self).find_all().await
    }

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        (**self).find_by_category(category).await
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, product: Product) -> StoreResult<Product> {
        (**self).save(product).await
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        (**self).insert(product).await
    }
}
