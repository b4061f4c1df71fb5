//! Inventory service.
//!
//! Applies the two supported stock mutations (absolute replacement and
//! shipment receipt) with lookup-or-fail semantics, and passes catalog queries
//! through unchanged. The service holds no state of its own; every record is
//! loaded fresh from the injected `CatalogStore` per call.

pub mod error;
pub mod service;

pub use error::{InventoryError, InventoryResult};
pub use service::InventoryService;
