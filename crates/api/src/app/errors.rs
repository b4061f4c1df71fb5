use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_inventory::InventoryError;
use stockroom_products::StoreError;

/// Stable machine-readable code for an inventory error (shared by both surfaces).
pub fn error_code(err: &InventoryError) -> &'static str {
    match err {
        InventoryError::NotFound(_) => "not_found",
        InventoryError::StockOverflow { .. } => "stock_overflow",
        InventoryError::Store(StoreError::Unavailable(_)) => "store_unavailable",
        InventoryError::Store(_) => "store_error",
    }
}

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    let status = match &err {
        InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
        InventoryError::StockOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        InventoryError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        InventoryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    json_error(status, error_code(&err), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// GraphQL error payload carrying `extensions.code` (and `extensions.id` for `NotFound`).
pub fn graphql_error(err: InventoryError) -> async_graphql::Error {
    use async_graphql::{ErrorExtensions, Value};

    let code = error_code(&err).to_ascii_uppercase();
    let id = match &err {
        InventoryError::NotFound(id) => Some(id.value()),
        _ => None,
    };

    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| {
        ext.set("code", Value::String(code));
        if let Some(id) = id {
            ext.set("id", Value::Number(id.into()));
        }
    })
}
