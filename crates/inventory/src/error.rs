use thiserror::Error;

use stockroom_core::ProductId;
use stockroom_products::StoreError;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory service error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// No product exists with the requested id.
    #[error("product not found with id {0}")]
    NotFound(ProductId),

    /// `current + quantity` does not fit in the stock counter.
    #[error("stock overflow for product {id}: {current} + {quantity}")]
    StockOverflow {
        id: ProductId,
        current: i64,
        quantity: i64,
    },

    /// The catalog store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
