//! Request/response contract shared by the internal services and their callers
//!
//! Every operation is a JSON `POST` to one of the route constants below. A
//! business outcome always travels as HTTP 200 with a [`Code`] in the body;
//! only infrastructure faults use a non-2xx HTTP status.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const REGISTER_PATH: &str = "/rpc/identity/register";
pub const LOGIN_PATH: &str = "/rpc/identity/login";
pub const VALIDATE_PATH: &str = "/rpc/identity/validate";
pub const CREATE_ORDER_PATH: &str = "/rpc/order/create";
pub const GET_ORDER_PATH: &str = "/rpc/order/get";

/// Status carried by every response envelope
///
/// Serialized as the conventional RPC integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Code {
    Ok,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
    Unauthenticated,
}

impl From<Code> for i32 {
    fn from(code: Code) -> Self {
        match code {
            Code::Ok => 0,
            Code::InvalidArgument => 3,
            Code::NotFound => 5,
            Code::AlreadyExists => 6,
            Code::Internal => 13,
            Code::Unauthenticated => 16,
        }
    }
}

impl TryFrom<i32> for Code {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Code::Ok),
            3 => Ok(Code::InvalidArgument),
            5 => Ok(Code::NotFound),
            6 => Ok(Code::AlreadyExists),
            13 => Ok(Code::Internal),
            16 => Ok(Code::Unauthenticated),
            other => Err(format!("unknown status code {}", other)),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::Ok => "OK",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::Internal => "INTERNAL",
            Code::Unauthenticated => "UNAUTHENTICATED",
        };
        f.write_str(name)
    }
}

/// Outcome of a call that reached the remote service
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The service accepted the request and produced a payload
    Accepted(T),
    /// The service rejected the request for a business reason
    Rejected { code: Code, message: String },
}

/// A response envelope that does not satisfy the contract
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("response status OK without the `{0}` payload")]
    MissingPayload(&'static str),
}

fn rejected<T>(code: Code, error: Option<String>) -> Reply<T> {
    Reply::Rejected {
        code,
        message: error.unwrap_or_else(|| code.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegisterResponse {
    pub fn ok() -> Self {
        Self {
            status: Code::Ok,
            error: None,
        }
    }

    pub fn rejected(status: Code, error: impl Into<String>) -> Self {
        Self {
            status,
            error: Some(error.into()),
        }
    }

    pub fn into_reply(self) -> Result<Reply<()>, ProtocolError> {
        match self.status {
            Code::Ok => Ok(Reply::Accepted(())),
            code => Ok(rejected(code, self.error)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn ok(token: String) -> Self {
        Self {
            status: Code::Ok,
            token: Some(token),
            error: None,
        }
    }

    pub fn rejected(status: Code, error: impl Into<String>) -> Self {
        Self {
            status,
            token: None,
            error: Some(error.into()),
        }
    }

    pub fn into_reply(self) -> Result<Reply<String>, ProtocolError> {
        match (self.status, self.token) {
            (Code::Ok, Some(token)) if !token.is_empty() => Ok(Reply::Accepted(token)),
            (Code::Ok, _) => Err(ProtocolError::MissingPayload("token")),
            (code, _) => Ok(rejected(code, self.error)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub status: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateResponse {
    pub fn ok(user_id: i64) -> Self {
        Self {
            status: Code::Ok,
            user_id: Some(user_id),
            error: None,
        }
    }

    pub fn rejected(status: Code, error: impl Into<String>) -> Self {
        Self {
            status,
            user_id: None,
            error: Some(error.into()),
        }
    }

    pub fn into_reply(self) -> Result<Reply<i64>, ProtocolError> {
        match (self.status, self.user_id) {
            (Code::Ok, Some(user_id)) => Ok(Reply::Accepted(user_id)),
            (Code::Ok, None) => Err(ProtocolError::MissingPayload("user_id")),
            (code, _) => Ok(rejected(code, self.error)),
        }
    }
}

/// A single order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub status: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateOrderResponse {
    pub fn ok(order_id: i64) -> Self {
        Self {
            status: Code::Ok,
            order_id: Some(order_id),
            error: None,
        }
    }

    pub fn rejected(status: Code, error: impl Into<String>) -> Self {
        Self {
            status,
            order_id: None,
            error: Some(error.into()),
        }
    }

    pub fn into_reply(self) -> Result<Reply<i64>, ProtocolError> {
        match (self.status, self.order_id) {
            (Code::Ok, Some(order_id)) => Ok(Reply::Accepted(order_id)),
            (Code::Ok, None) => Err(ProtocolError::MissingPayload("order_id")),
            (code, _) => Ok(rejected(code, self.error)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrderRequest {
    pub order_id: i64,
}

/// Order as seen by callers of `GetOrder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: i64,
    pub user_id: i64,
    pub status: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOrderResponse {
    pub status: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GetOrderResponse {
    pub fn ok(order: OrderView) -> Self {
        Self {
            status: Code::Ok,
            order: Some(order),
            error: None,
        }
    }

    pub fn rejected(status: Code, error: impl Into<String>) -> Self {
        Self {
            status,
            order: None,
            error: Some(error.into()),
        }
    }

    pub fn into_reply(self) -> Result<Reply<OrderView>, ProtocolError> {
        match (self.status, self.order) {
            (Code::Ok, Some(order)) => Ok(Reply::Accepted(order)),
            (Code::Ok, None) => Err(ProtocolError::MissingPayload("order")),
            (code, _) => Ok(rejected(code, self.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_serializes_as_integer() {
        let response = ValidateResponse::rejected(Code::Unauthenticated, "Invalid token");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"status": 16, "error": "Invalid token"}));
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let parsed = serde_json::from_value::<RegisterResponse>(json!({"status": 2}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_ok_without_payload_is_protocol_error() {
        let response: ValidateResponse = serde_json::from_value(json!({"status": 0})).unwrap();
        assert_eq!(
            response.into_reply(),
            Err(ProtocolError::MissingPayload("user_id"))
        );

        let response: LoginResponse =
            serde_json::from_value(json!({"status": 0, "token": ""})).unwrap();
        assert!(response.into_reply().is_err());
    }

    #[test]
    fn test_rejection_keeps_message() {
        let reply = LoginResponse::rejected(Code::Unauthenticated, "Invalid credentials")
            .into_reply()
            .unwrap();
        assert_eq!(
            reply,
            Reply::Rejected {
                code: Code::Unauthenticated,
                message: "Invalid credentials".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_without_message_falls_back_to_code_name() {
        let response: RegisterResponse = serde_json::from_value(json!({"status": 6})).unwrap();
        assert_eq!(
            response.into_reply().unwrap(),
            Reply::Rejected {
                code: Code::AlreadyExists,
                message: "ALREADY_EXISTS".to_string()
            }
        );
    }
}
