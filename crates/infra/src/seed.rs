//! Bootstrap seeding of the catalog store from a JSON file.

use std::path::{Path, PathBuf};

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_products::{CatalogStore, NewProduct, StoreError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed entry {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse and validate a JSON array of products.
pub fn parse_seed(json: &str) -> Result<Vec<NewProduct>, SeedError> {
    let products: Vec<NewProduct> = serde_json::from_str(json)?;
    for (index, product) in products.iter().enumerate() {
        product
            .validate()
            .map_err(|source| SeedError::Invalid { index, source })?;
    }
    Ok(products)
}

/// Read, parse and validate a seed file.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewProduct>, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&json)
}

/// Insert `products` only if the store holds no records yet.
///
/// Returns the number of records inserted (zero when the store was already
/// populated), so restarting against a durable store does not duplicate rows.
pub async fn seed_if_empty<S>(store: &S, products: Vec<NewProduct>) -> Result<usize, SeedError>
where
    S: CatalogStore + ?Sized,
{
    if !store.find_all().await?.is_empty() {
        tracing::info!("catalog already populated; skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for product in products {
        store.insert(product).await?;
        inserted += 1;
    }
    tracing::info!(inserted, "catalog seeded");
    Ok(inserted)
}
