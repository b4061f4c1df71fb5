//! Infrastructure layer: catalog store adapters, configuration, seeding.

pub mod catalog;
pub mod config;
pub mod seed;

pub use catalog::{InMemoryCatalogStore, PostgresCatalogStore};
pub use config::{AppConfig, ConfigError};
pub use seed::{SeedError, load_seed_file, seed_if_empty};
