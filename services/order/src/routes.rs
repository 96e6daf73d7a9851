//! Order service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{
    error::DatabaseError,
    rpc::{
        CREATE_ORDER_PATH, Code, CreateOrderRequest, CreateOrderResponse, GET_ORDER_PATH,
        GetOrderRequest, GetOrderResponse,
    },
};
use tracing::{error, info};

use crate::AppState;

/// Create the router for the order service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(CREATE_ORDER_PATH, post(create_order))
        .route(GET_ORDER_PATH, post(get_order))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "order-service"
    }))
}

/// Create an order for an already authenticated user
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, RpcError> {
    if payload.items.is_empty() {
        return Ok(Json(CreateOrderResponse::rejected(
            Code::InvalidArgument,
            "Order must have at least one item",
        )));
    }

    if let Some(item) = payload.items.iter().find(|i| i.quantity <= 0) {
        return Ok(Json(CreateOrderResponse::rejected(
            Code::InvalidArgument,
            format!("Quantity for product {} must be positive", item.product_id),
        )));
    }

    let order = state.store.create(payload.user_id, &payload.items).await?;
    info!(order_id = order.id, user_id = order.user_id, "Order accepted");

    Ok(Json(CreateOrderResponse::ok(order.id)))
}

/// Get order details
pub async fn get_order(
    State(state): State<AppState>,
    Json(payload): Json<GetOrderRequest>,
) -> Result<Json<GetOrderResponse>, RpcError> {
    let response = match state.store.get(payload.order_id).await? {
        Some(order) => GetOrderResponse::ok(order.into()),
        None => GetOrderResponse::rejected(Code::NotFound, "Order not found"),
    };

    Ok(Json(response))
}

/// Store failure surfaced as a transport-level failure
#[derive(Debug)]
pub struct RpcError(DatabaseError);

impl From<DatabaseError> for RpcError {
    fn from(err: DatabaseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Order request failed");

        let body = Json(serde_json::json!({
            "status": i32::from(Code::Internal),
            "error": "Internal error",
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
