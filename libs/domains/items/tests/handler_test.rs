//! Handler tests for the Items domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! The router runs over the in-memory repository, so the suite needs no
//! external services; the PostgreSQL variant satisfies the same repository
//! contract and shares the service and handler code exercised here.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_items::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ItemService::new(InMemoryItemRepository::new());
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn create_widget(app: &Router, name: &str, price: Option<f64>) -> Item {
    let response = app
        .clone()
        .oneshot(post_json("/", json!({ "name": name, "price": price })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_item_returns_201_with_assigned_id() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Widget",
                "description": "Handler test",
                "price": 10.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "Widget");
    assert_eq!(item.description.as_deref(), Some("Handler test"));
    assert_eq!(item.price, Some(10.0));
}

#[tokio::test]
async fn test_create_item_rejects_empty_name_with_422() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/", json!({ "name": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was stored by the rejected request
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_create_item_rejects_overlong_name_with_422() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({ "name": "a".repeat(101) })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_item_rejects_overlong_description_with_422() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({ "name": "Widget", "description": "d".repeat(501) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_item_rejects_negative_price_with_422() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({ "name": "Widget", "price": -1.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_create_item_rejects_malformed_json() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_item_returns_200() {
    let app = app();
    let created = create_widget(&app, "Widget", Some(10.0)).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.id, created.id);
    assert_eq!(item.name, "Widget");
}

#[tokio::test]
async fn test_get_item_returns_404_for_missing() {
    let app = app();

    let response = app
        .oneshot(Request::builder().uri("/999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_get_item_returns_400_for_non_numeric_id() {
    let app = app();

    let response = app
        .oneshot(Request::builder().uri("/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_list_items_returns_creation_order() {
    let app = app();
    for name in ["first", "second", "third"] {
        create_widget(&app, name, None).await;
    }

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let items: Vec<Item> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 3);
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_items_applies_skip_and_limit() {
    let app = app();
    for i in 0..5 {
        create_widget(&app, &format!("item-{}", i), None).await;
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?skip=1&limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let items: Vec<Item> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "item-1");
    assert_eq!(items[1].name, "item-2");
}

#[tokio::test]
async fn test_list_items_out_of_range_skip_is_empty() {
    let app = app();
    create_widget(&app, "only", None).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?skip=50")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let items: Vec<Item> = json_body(response.into_body()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_update_item_merges_supplied_fields_only() {
    let app = app();
    let created = create_widget(&app, "Widget", Some(10.0)).await;

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/{}", created.id),
            json!({ "description": "new" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.name, "Widget");
    assert_eq!(item.description.as_deref(), Some("new"));
    assert_eq!(item.price, Some(10.0));
    assert!(item.updated_at >= item.created_at);
}

#[tokio::test]
async fn test_update_item_returns_404_for_missing() {
    let app = app();

    let response = app
        .oneshot(put_json("/999", json!({ "price": 1.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_item_rejects_invalid_fields_with_422() {
    let app = app();
    let created = create_widget(&app, "Widget", None).await;

    let response = app
        .clone()
        .oneshot(put_json(&format!("/{}", created.id), json!({ "name": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The rejected update left the record untouched
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.name, "Widget");
}

#[tokio::test]
async fn test_delete_item_returns_204_then_404() {
    let app = app();
    let created = create_widget(&app, "Widget", None).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting the same id again reports absence
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_lifecycle_over_http() {
    let app = app();

    // Create
    let created = create_widget(&app, "Widget", Some(10.0)).await;
    assert_eq!(created.id, 1);

    // Update description only
    let response = app
        .clone()
        .oneshot(put_json("/1", json!({ "description": "new" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Item = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.description.as_deref(), Some("new"));

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent get is a 404
    let response = app
        .oneshot(Request::builder().uri("/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
