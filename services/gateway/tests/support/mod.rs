//! Test doubles and request helpers shared by the gateway tests

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use common::rpc::{Code, OrderItem, Reply};
use gateway::{
    AppState,
    clients::{ClientError, IdentityClient, OrderClient},
    routes::create_router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// How the fake identity service answers `validate`
#[derive(Clone, Copy)]
pub enum ValidateMode {
    /// Accept the listed token only
    Accept,
    /// Answer every call with an infrastructure failure
    Unavailable,
}

/// Identity service double
pub struct FakeIdentity {
    pub valid_token: &'static str,
    pub user_id: i64,
    pub mode: ValidateMode,
    pub validate_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self {
            valid_token: "good-token",
            user_id: 42,
            mode: ValidateMode::Accept,
            validate_calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            mode: ValidateMode::Unavailable,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    fn outage(&self) -> ClientError {
        ClientError::Upstream {
            service: "identity",
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn register(&self, email: &str, _password: &str) -> Result<Reply<()>, ClientError> {
        match (self.mode, email) {
            (ValidateMode::Unavailable, _) => Err(self.outage()),
            (_, "taken@x.com") => Ok(Reply::Rejected {
                code: Code::AlreadyExists,
                message: "User already exists".to_string(),
            }),
            _ => Ok(Reply::Accepted(())),
        }
    }

    async fn login(&self, _email: &str, password: &str) -> Result<Reply<String>, ClientError> {
        match (self.mode, password) {
            (ValidateMode::Unavailable, _) => Err(self.outage()),
            (_, "secret123") => Ok(Reply::Accepted(self.valid_token.to_string())),
            _ => Ok(Reply::Rejected {
                code: Code::Unauthenticated,
                message: "Invalid credentials".to_string(),
            }),
        }
    }

    async fn validate(&self, token: &str) -> Result<Reply<i64>, ClientError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            ValidateMode::Unavailable => Err(self.outage()),
            ValidateMode::Accept if token == self.valid_token => Ok(Reply::Accepted(self.user_id)),
            ValidateMode::Accept => Ok(Reply::Rejected {
                code: Code::Unauthenticated,
                message: "Invalid token".to_string(),
            }),
        }
    }
}

/// Order service double that records who placed each order
#[derive(Default)]
pub struct FakeOrders {
    pub placed: Mutex<Vec<(i64, Vec<OrderItem>)>>,
}

impl FakeOrders {
    pub fn placed(&self) -> Vec<(i64, Vec<OrderItem>)> {
        self.placed.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderClient for FakeOrders {
    async fn create_order(
        &self,
        user_id: i64,
        items: Vec<OrderItem>,
    ) -> Result<Reply<i64>, ClientError> {
        if items.is_empty() {
            return Ok(Reply::Rejected {
                code: Code::InvalidArgument,
                message: "Order must have at least one item".to_string(),
            });
        }

        let mut placed = self.placed.lock().unwrap();
        placed.push((user_id, items));
        Ok(Reply::Accepted(placed.len() as i64))
    }
}

pub fn app(identity: Arc<dyn IdentityClient>, orders: Arc<dyn OrderClient>) -> Router {
    create_router(AppState { identity, orders })
}

pub async fn send(
    app: Router,
    method: Method,
    path: &str,
    authorization: Option<&str>,
    body: &str,
) -> Response {
    let mut request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    app.oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: Router, path: &str, authorization: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, path, authorization, &body.to_string()).await
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
