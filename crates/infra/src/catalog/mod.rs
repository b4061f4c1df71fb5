//! Catalog store adapters.
//!
//! Both adapters implement `stockroom_products::CatalogStore`; the API picks
//! one at startup based on configuration.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
