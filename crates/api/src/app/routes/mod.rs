use axum::Router;

pub mod products;
pub mod system;

/// Router for the REST surface.
pub fn router() -> Router {
    Router::new().merge(products::router())
}
