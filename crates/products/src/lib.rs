//! Products domain module.
//!
//! This crate holds the product record shared by every layer and the
//! `CatalogStore` port the inventory logic persists through. It contains no IO;
//! concrete stores live in `stockroom-infra`.

pub mod product;
pub mod store;

pub use product::{NewProduct, Product};
pub use store::{CatalogStore, StoreError, StoreResult};
pub use stockroom_core::ProductId;
