//! Public request and response bodies

use common::rpc::OrderItem;
use serde::{Deserialize, Serialize};

/// Body of `/api/auth/register` and `/api/auth/login`
///
/// Absent fields decode as empty strings so the identity service reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: i64,
}
