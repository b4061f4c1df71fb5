use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use stockroom_api::app::{self, services::CatalogHandle};
use stockroom_infra::InMemoryCatalogStore;
use stockroom_inventory::InventoryService;
use stockroom_products::{CatalogStore, NewProduct};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(products: Vec<NewProduct>) -> Self {
        Self::spawn_with(products, true).await
    }

    async fn spawn_with(products: Vec<NewProduct>, graphql_playground: bool) -> Self {
        let store: CatalogHandle = Arc::new(InMemoryCatalogStore::new());
        for p in products {
            store.insert(p).await.expect("seed product");
        }

        // Same router as prod, over a pre-seeded in-memory store, on an ephemeral port.
        let app = app::router(Arc::new(InventoryService::new(store)), graphql_playground);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn graphql(&self, client: &reqwest::Client, query: &str) -> serde_json::Value {
        let res = client
            .post(format!("{}/graphql", self.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product(name: &str, category: &str, price: f64, stock: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: category.to_string(),
        price,
        stock,
    }
}

fn catalog() -> Vec<NewProduct> {
    vec![
        product("Claw hammer", "tools", 12.5, 10),
        product("Stapler", "office", 7.0, 3),
        product("Hand saw", "tools", 20.0, 4),
    ]
}

#[tokio::test]
async fn health_returns_ok() {
    let srv = TestServer::spawn(vec![]).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn rest_lists_all_products() {
    let srv = TestServer::spawn(catalog()).await;

    let res = reqwest::get(format!("{}/products", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0],
        json!({
            "id": 1,
            "name": "Claw hammer",
            "category": "tools",
            "price": 12.5,
            "stock": 10,
        })
    );
}

#[tokio::test]
async fn rest_filters_by_category() {
    let srv = TestServer::spawn(catalog()).await;

    let body: serde_json::Value = reqwest::get(format!("{}/products/tools", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Claw hammer", "Hand saw"]);

    // No match is an empty list, not an error.
    let res = reqwest::get(format!("{}/products/garden", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn graphql_stock_lifecycle_is_visible_over_rest() {
    let srv = TestServer::spawn(catalog()).await;
    let client = reqwest::Client::new();

    let body = srv
        .graphql(&client, "mutation { receiveNewShipment(id: 1, quantity: 5) { id stock } }")
        .await;
    assert_eq!(body["data"]["receiveNewShipment"], json!({ "id": 1, "stock": 15 }));

    let body = srv
        .graphql(&client, "mutation { updateStock(id: 1, stock: 0) { stock } }")
        .await;
    assert_eq!(body["data"]["updateStock"]["stock"], 0);

    let body: serde_json::Value = client
        .get(format!("{}/products/tools", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["stock"], 0);
}

#[tokio::test]
async fn graphql_reports_not_found_with_id() {
    let srv = TestServer::spawn(catalog()).await;
    let client = reqwest::Client::new();

    let body = srv
        .graphql(&client, "mutation { updateStock(id: 99, stock: 5) { stock } }")
        .await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["extensions"]["id"], 99);

    // Store untouched.
    let body: serde_json::Value = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let stocks: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["stock"].as_i64().unwrap())
        .collect();
    assert_eq!(stocks, vec![10, 3, 4]);
}

#[tokio::test]
async fn graphql_and_rest_serialize_products_identically() {
    let srv = TestServer::spawn(catalog()).await;
    let client = reqwest::Client::new();

    let gql = srv
        .graphql(&client, "{ getAllProducts { id name category price stock } }")
        .await;
    let rest: serde_json::Value = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(gql["data"]["getAllProducts"], rest);
}

#[tokio::test]
async fn graphql_ide_served_on_get() {
    let srv = TestServer::spawn(vec![]).await;

    let res = reqwest::get(format!("{}/graphql", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("/graphql"));
}

#[tokio::test]
async fn graphql_ide_disabled_leaves_only_post() {
    let srv = TestServer::spawn_with(catalog(), false).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/graphql", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Queries still work.
    let body = srv.graphql(&client, "{ getAllProducts { id } }").await;
    assert_eq!(body["data"]["getAllProducts"].as_array().unwrap().len(), 3);
}
