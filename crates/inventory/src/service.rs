use tracing::instrument;

use stockroom_core::ProductId;
use stockroom_products::{CatalogStore, Product};

use crate::error::{InventoryError, InventoryResult};

/// Stock queries and mutations over a catalog store.
///
/// ## Concurrency
///
/// Mutations are a plain read + write through the store with no locking or
/// versioning. Two concurrent `receive_new_shipment` calls on the same id can
/// lose one of the increments.
#[derive(Debug, Clone)]
pub struct InventoryService<S> {
    store: S,
}

impl<S> InventoryService<S>
where
    S: CatalogStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every product, in store order.
    #[instrument(skip(self), err)]
    pub async fn list_all(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.store.find_all().await?)
    }

    /// Products whose category equals `category` exactly (case-sensitive).
    #[instrument(skip(self), err)]
    pub async fn list_by_category(&self, category: &str) -> InventoryResult<Vec<Product>> {
        Ok(self.store.find_by_category(category).await?)
    }

    /// Replace the stock of product `id` with `new_stock`.
    ///
    /// No validation or clamping is applied; zero and negative values are
    /// stored as given.
    #[instrument(skip(self), err)]
    pub async fn update_stock(&self, id: ProductId, new_stock: i64) -> InventoryResult<Product> {
        let mut product = self.get_or_fail(id).await?;
        let previous = product.stock;

        product.set_stock(new_stock);
        let saved = self.store.save(product).await?;

        tracing::info!(%id, previous, stock = saved.stock, "stock updated");
        Ok(saved)
    }

    /// Add `quantity` to the stock of product `id`.
    ///
    /// `quantity` may be negative (returns, corrections). Fails with
    /// `StockOverflow` instead of wrapping when the sum does not fit.
    #[instrument(skip(self), err)]
    pub async fn receive_new_shipment(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> InventoryResult<Product> {
        let mut product = self.get_or_fail(id).await?;
        let current = product.stock;

        let stock = current
            .checked_add(quantity)
            .ok_or(InventoryError::StockOverflow {
                id,
                current,
                quantity,
            })?;
        product.set_stock(stock);
        let saved = self.store.save(product).await?;

        tracing::info!(%id, previous = current, quantity, stock = saved.stock, "shipment received");
        Ok(saved)
    }

    async fn get_or_fail(&self, id: ProductId) -> InventoryResult<Product> {
        match self.store.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                tracing::warn!(%id, "product not found");
                Err(InventoryError::NotFound(id))
            }
        }
    }
}
