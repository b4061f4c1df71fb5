use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockroom_core::ProductId;
use stockroom_products::{CatalogStore, NewProduct, Product, StoreError, StoreResult};

/// In-memory catalog store for tests/dev.
///
/// Records are kept ordered by id, so `find_all` returns them in creation
/// order. Ids are assigned sequentially starting at 1.
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Catalog>,
}

#[derive(Debug)]
struct Catalog {
    products: BTreeMap<ProductId, Product>,
    last_id: ProductId,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Catalog {
                products: BTreeMap::new(),
                last_id: ProductId::new(0),
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> StoreResult<usize> {
        let catalog = self.inner.read().map_err(|_| poisoned())?;
        Ok(catalog.products.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("catalog lock poisoned".to_string())
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let catalog = self.inner.read().map_err(|_| poisoned())?;
        Ok(catalog.products.values().cloned().collect())
    }

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        let catalog = self.inner.read().map_err(|_| poisoned())?;
        Ok(catalog
            .products
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let catalog = self.inner.read().map_err(|_| poisoned())?;
        Ok(catalog.products.get(&id).cloned())
    }

    async fn save(&self, product: Product) -> StoreResult<Product> {
        let mut catalog = self.inner.write().map_err(|_| poisoned())?;
        // Keep the id sequence ahead of explicitly saved ids.
        if product.id > catalog.last_id {
            catalog.last_id = product.id;
        }
        catalog.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let mut catalog = self.inner.write().map_err(|_| poisoned())?;
        let id = catalog.last_id.next().ok_or_else(|| {
            StoreError::Backend(format!("id sequence exhausted after {}", catalog.last_id))
        })?;
        let stored = product.into_product(id);
        catalog.products.insert(id, stored.clone());
        catalog.last_id = id;
        Ok(stored)
    }
}
