//! GraphQL surface.
//!
//! Queries `getAllProducts` / `getProductsByCategory` and mutations
//! `updateStock` / `receiveNewShipment`, each delegating to one
//! `InventoryService` call. The service is injected as schema data.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
    Json,
};

use stockroom_core::ProductId;
use stockroom_products::Product;

use crate::app::errors::graphql_error;
use crate::app::services::AppServices;

/// GraphQL schema type.
pub type InventorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Create the GraphQL schema over the inventory service.
pub fn build_schema(services: Arc<AppServices>) -> InventorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

/// GraphQL query/mutation handler (`POST /graphql`).
pub async fn graphql_handler(
    Extension(schema): Extension<InventorySchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

/// GraphiQL IDE (`GET /graphql`).
pub async fn graphql_playground() -> impl IntoResponse {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

/// A product as exposed over GraphQL; same fields as the REST representation.
pub struct ProductObject(Product);

#[Object(name = "Product")]
impl ProductObject {
    async fn id(&self) -> i64 {
        self.0.id.value()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn price(&self) -> f64 {
        self.0.price
    }

    async fn stock(&self) -> i64 {
        self.0.stock
    }
}

impl From<Product> for ProductObject {
    fn from(value: Product) -> Self {
        Self(value)
    }
}

fn wrap(products: Vec<Product>) -> Vec<ProductObject> {
    products.into_iter().map(ProductObject::from).collect()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every product in the catalog.
    async fn get_all_products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProductObject>> {
        let services = ctx.data::<Arc<AppServices>>()?;
        services.list_all().await.map(wrap).map_err(graphql_error)
    }

    /// Products in exactly this category (case-sensitive).
    async fn get_products_by_category(
        &self,
        ctx: &Context<'_>,
        category: String,
    ) -> async_graphql::Result<Vec<ProductObject>> {
        let services = ctx.data::<Arc<AppServices>>()?;
        services
            .list_by_category(&category)
            .await
            .map(wrap)
            .map_err(graphql_error)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Replace the stock of a product.
    async fn update_stock(
        &self,
        ctx: &Context<'_>,
        id: i64,
        stock: i64,
    ) -> async_graphql::Result<ProductObject> {
        let services = ctx.data::<Arc<AppServices>>()?;
        services
            .update_stock(ProductId::new(id), stock)
            .await
            .map(ProductObject::from)
            .map_err(graphql_error)
    }

    /// Add a received quantity to the stock of a product.
    async fn receive_new_shipment(
        &self,
        ctx: &Context<'_>,
        id: i64,
        quantity: i64,
    ) -> async_graphql::Result<ProductObject> {
        let services = ctx.data::<Arc<AppServices>>()?;
        services
            .receive_new_shipment(ProductId::new(id), quantity)
            .await
            .map(ProductObject::from)
            .map_err(graphql_error)
    }
}
