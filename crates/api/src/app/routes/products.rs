use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:category", get(list_products_by_category))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_all().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn list_products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    match services.list_by_category(&category).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
