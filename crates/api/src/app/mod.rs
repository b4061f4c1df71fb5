//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: catalog store selection and seeding
//! - `routes/`: REST routes + handlers
//! - `graphql.rs`: GraphQL schema, resolvers and handlers
//! - `errors.rs`: consistent error responses for both surfaces

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use stockroom_infra::AppConfig;

use crate::middleware;

pub mod errors;
pub mod graphql;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(services, config.graphql_playground))
}

/// Build the router over already-constructed services.
pub fn router(services: Arc<AppServices>, graphql_playground: bool) -> Router {
    let schema = graphql::build_schema(services.clone());

    let mut graphql_route = post(graphql::graphql_handler);
    if graphql_playground {
        graphql_route = graphql_route.get(graphql::graphql_playground);
    }

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/graphql", graphql_route)
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services))
                .layer(Extension(schema)),
        )
}
