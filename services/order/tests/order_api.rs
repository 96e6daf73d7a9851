//! HTTP-level tests for the order RPC surface.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use common::rpc::{CREATE_ORDER_PATH, GET_ORDER_PATH, GetOrderResponse, OrderItem, OrderView};
use http_body_util::BodyExt;
use order::{AppState, repositories::MemoryOrderStore, routes::create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn build_app() -> Router {
    create_router(AppState {
        store: Arc::new(MemoryOrderStore::new()),
    })
}

async fn post_json(app: Router, path: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_then_get_order() {
    let app = build_app();

    let response = post_json(
        app.clone(),
        CREATE_ORDER_PATH,
        json!({"user_id": 7, "items": [{"product_id": 1, "quantity": 2, "price": 9.99}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"status": 0, "order_id": 1}));

    let response = post_json(app, GET_ORDER_PATH, json!({"order_id": 1})).await;
    let fetched: GetOrderResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(
        fetched,
        GetOrderResponse::ok(OrderView {
            order_id: 1,
            user_id: 7,
            status: "PENDING".to_string(),
            items: vec![OrderItem {
                product_id: 1,
                quantity: 2,
                price: 9.99,
            }],
        })
    );
}

#[tokio::test]
async fn test_empty_order_is_invalid_argument() {
    let response = post_json(
        build_app(),
        CREATE_ORDER_PATH,
        json!({"user_id": 7, "items": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": 3, "error": "Order must have at least one item"})
    );
}

#[tokio::test]
async fn test_non_positive_quantity_is_invalid_argument() {
    let response = post_json(
        build_app(),
        CREATE_ORDER_PATH,
        json!({"user_id": 7, "items": [{"product_id": 4, "quantity": 0, "price": 1.0}]}),
    )
    .await;

    let body = body_json(response).await;
    assert_eq!(body["status"], 3);
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let response = post_json(build_app(), GET_ORDER_PATH, json!({"order_id": 99})).await;

    assert_eq!(
        body_json(response).await,
        json!({"status": 5, "error": "Order not found"})
    );
}
