//! Gateway routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use common::rpc::{Code, Reply};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthenticatedUser, require_auth},
    models::{
        CreateOrderRequest, CredentialsRequest, MessageResponse, OrderCreatedResponse,
        TokenResponse,
    },
    state::AppState,
};

/// Create the router for the gateway
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/orders", post(create_order))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_string())
    })
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "gateway"
    }))
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = body(payload)?;

    match state
        .identity
        .register(&payload.email, &payload.password)
        .await?
    {
        Reply::Accepted(()) => Ok(Json(MessageResponse {
            message: "Registration successful".to_string(),
        })),
        Reply::Rejected { message, .. } => Err(ApiError::BadRequest(message)),
    }
}

/// Exchange credentials for a session token
///
/// Every failure, including an unreachable identity service, answers 401.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = body(payload)?;

    let reply = state
        .identity
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| {
            error!(error = %e, "Login call to identity service failed");
            ApiError::Unauthorized("Login failed".to_string())
        })?;

    match reply {
        Reply::Accepted(token) => Ok(Json(TokenResponse { token })),
        Reply::Rejected { message, .. } => Err(ApiError::Unauthorized(message)),
    }
}

/// Place an order for the authenticated caller
pub async fn create_order(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = body(payload)?;

    match state
        .orders
        .create_order(user.user_id, payload.items)
        .await?
    {
        Reply::Accepted(order_id) => {
            info!(user_id = user.user_id, order_id, "Order placed");
            Ok((StatusCode::CREATED, Json(OrderCreatedResponse { order_id })))
        }
        Reply::Rejected {
            code: Code::InvalidArgument,
            message,
        } => Err(ApiError::BadRequest(message)),
        Reply::Rejected { code, message } => {
            error!(%code, message, "Order service rejected the order");
            Err(ApiError::InternalServerError)
        }
    }
}
