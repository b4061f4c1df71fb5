use std::sync::Arc;

use anyhow::Context;

use stockroom_infra::{
    AppConfig, InMemoryCatalogStore, PostgresCatalogStore, load_seed_file, seed_if_empty,
};
use stockroom_inventory::InventoryService;
use stockroom_products::CatalogStore;

/// Type-erased catalog store shared by every request.
pub type CatalogHandle = Arc<dyn CatalogStore>;

/// The inventory service as wired into the request surfaces.
pub type AppServices = InventoryService<CatalogHandle>;

/// Select the catalog store from configuration, seed it, and wrap it in the service.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<Arc<AppServices>> {
    let store: CatalogHandle = match &config.database_url {
        Some(url) => {
            let store = PostgresCatalogStore::connect(url)
                .await
                .context("failed to connect to Postgres")?;
            store
                .ensure_schema()
                .await
                .context("failed to create products table")?;
            tracing::info!("using postgres catalog store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory catalog store");
            Arc::new(InMemoryCatalogStore::new())
        }
    };

    if let Some(path) = &config.seed_file {
        let products = load_seed_file(path)
            .with_context(|| format!("failed to load seed file {}", path.display()))?;
        seed_if_empty(store.as_ref(), products)
            .await
            .context("failed to seed catalog")?;
    }

    Ok(Arc::new(InventoryService::new(store)))
}
