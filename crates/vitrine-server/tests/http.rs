//! In-process tests for the HTTP surface.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vitrine_core::{Error, NewProduct, Product, Result};
use vitrine_server::{Server, ServerConfig};
use vitrine_store::{Catalog, MemoryCatalog};

fn router_over(catalog: Arc<dyn Catalog>) -> Router {
    Server::new(ServerConfig::default(), catalog).router()
}

fn router_with(products: Vec<NewProduct>) -> Router {
    let catalog = MemoryCatalog::new();
    for product in products {
        catalog.insert(product);
    }
    router_over(Arc::new(catalog))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, body.to_vec(), content_type)
}

/// A catalog whose backend is gone, for exercising error paths.
struct BrokenCatalog;

#[async_trait]
impl Catalog for BrokenCatalog {
    async fn list(&self) -> Result<Vec<Product>> {
        Err(Error::internal("backend unreachable"))
    }

    async fn count(&self) -> Result<u64> {
        Err(Error::internal("backend unreachable"))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::internal("backend unreachable"))
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn products_returns_every_row_with_four_fields() {
    let router = router_with(vec![
        NewProduct::new("Widget", 9.99, "A widget"),
        NewProduct::new("Gadget", 19.5, "A gadget"),
        NewProduct::new("Doohickey", 0.5, "Spare part"),
    ]);

    let (status, body, content_type) = get(router, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    for row in rows {
        let object = row.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("name"));
        assert!(object.contains_key("price"));
        assert!(object.contains_key("description"));
    }
}

#[tokio::test]
async fn single_product_serializes_as_expected() {
    let router = router_with(vec![NewProduct::new("Widget", 9.99, "A widget")]);

    let (status, body, _) = get(router, "/products").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": 1, "name": "Widget", "price": 9.99, "description": "A widget"}])
    );
}

#[tokio::test]
async fn empty_catalog_returns_empty_array() {
    let router = router_with(Vec::new());

    let (status, body, content_type) = get(router, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn health_is_always_ok() {
    let (status, body, _) = get(router_with(Vec::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn ready_reflects_catalog_liveness() {
    let (status, _, _) = get(router_with(Vec::new()), "/ready").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get(router_over(Arc::new(BrokenCatalog)), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn broken_catalog_maps_to_json_error_envelope() {
    let (status, body, _) = get(router_over(Arc::new(BrokenCatalog)), "/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["error"]["type"], "database_error");
    assert!(value["error"]["message"]
        .as_str()
        .unwrap()
        .contains("backend unreachable"));
}

#[tokio::test]
async fn status_reports_backend_and_product_count() {
    let router = router_with(vec![
        NewProduct::new("Widget", 9.99, "A widget"),
        NewProduct::new("Gadget", 19.5, "A gadget"),
    ]);

    let (status, body, _) = get(router, "/api/status").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "running");
    assert_eq!(value["backend"], "memory");
    assert_eq!(value["products"], 2);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = get(router_with(Vec::new()), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
