use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductId};

/// A stored product.
///
/// This is the canonical representation: REST responses serialize it directly
/// and the GraphQL `Product` type exposes the same fields under the same names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    /// Replace the quantity on hand. No clamping is applied.
    pub fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
    }
}

/// A product that has not been stored yet (the store assigns its id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

impl NewProduct {
    /// Check the record before it is handed to a store.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::invariant("price must be a non-negative number"));
        }
        if self.stock < 0 {
            return Err(DomainError::invariant("stock cannot be negative"));
        }
        Ok(())
    }

    /// Attach the store-assigned identifier.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
        }
    }
}
