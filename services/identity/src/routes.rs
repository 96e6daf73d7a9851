//! Identity service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::rpc::{
    Code, LOGIN_PATH, LoginRequest, LoginResponse, REGISTER_PATH, RegisterRequest,
    RegisterResponse, VALIDATE_PATH, ValidateRequest, ValidateResponse,
};
use tracing::error;

use crate::{AppState, service::IdentityError};

/// Create the router for the identity service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(REGISTER_PATH, post(register))
        .route(LOGIN_PATH, post(login))
        .route(VALIDATE_PATH, post(validate))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "identity-service"
    }))
}

/// Register endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, RpcError> {
    Ok(Json(state.identity.register(payload).await?))
}

/// Login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RpcError> {
    Ok(Json(state.identity.login(payload).await?))
}

/// Token validation endpoint
pub async fn validate(
    State(state): State<AppState>,
    Json(payload): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    Json(state.identity.validate(payload))
}

/// Infrastructure fault surfaced as a transport-level failure
#[derive(Debug)]
pub struct RpcError(IdentityError);

impl From<IdentityError> for RpcError {
    fn from(err: IdentityError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Identity request failed");

        let body = Json(serde_json::json!({
            "status": i32::from(Code::Internal),
            "error": "Internal error",
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
