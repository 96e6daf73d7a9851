//! RPC clients for the services behind the gateway
//!
//! Every call carries the configured upstream timeout. A call either
//! returns the remote service's [`Reply`] or a [`ClientError`]; there is no
//! path that turns a failed call into an acceptance.

use std::time::Duration;

use async_trait::async_trait;
use common::rpc::{
    CREATE_ORDER_PATH, CreateOrderRequest, CreateOrderResponse, LOGIN_PATH, LoginRequest,
    LoginResponse, OrderItem, ProtocolError, REGISTER_PATH, RegisterRequest, RegisterResponse,
    Reply, VALIDATE_PATH, ValidateRequest, ValidateResponse,
};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Failure to obtain a business answer from a service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, timeout, or an undecodable body
    #[error("request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status
    #[error("{service} answered with HTTP {status}")]
    Upstream {
        service: &'static str,
        status: StatusCode,
    },

    /// The envelope violated the contract
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Identity service contract as seen by the gateway
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<Reply<()>, ClientError>;

    async fn login(&self, email: &str, password: &str) -> Result<Reply<String>, ClientError>;

    /// Resolve a bearer token to a user id
    async fn validate(&self, token: &str) -> Result<Reply<i64>, ClientError>;
}

/// Order service contract as seen by the gateway
#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn create_order(
        &self,
        user_id: i64,
        items: Vec<OrderItem>,
    ) -> Result<Reply<i64>, ClientError>;
}

/// JSON-over-HTTP request/response channel to one service
#[derive(Clone)]
struct RpcChannel {
    service: &'static str,
    base_url: String,
    http: reqwest::Client,
}

impl RpcChannel {
    fn new(service: &'static str, base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport { service, source })?;

        Ok(Self {
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn call<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let service = self.service;
        let url = format!("{}{}", self.base_url, path);
        debug!(service, %url, "Calling upstream");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport { service, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Upstream { service, status });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|source| ClientError::Transport { service, source })
    }
}

/// Identity client over HTTP
#[derive(Clone)]
pub struct HttpIdentityClient {
    channel: RpcChannel,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            channel: RpcChannel::new("identity", base_url, timeout)?,
        })
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn register(&self, email: &str, password: &str) -> Result<Reply<()>, ClientError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: RegisterResponse = self.channel.call(REGISTER_PATH, &request).await?;
        Ok(response.into_reply()?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Reply<String>, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.channel.call(LOGIN_PATH, &request).await?;
        Ok(response.into_reply()?)
    }

    async fn validate(&self, token: &str) -> Result<Reply<i64>, ClientError> {
        let request = ValidateRequest {
            token: token.to_string(),
        };
        let response: ValidateResponse = self.channel.call(VALIDATE_PATH, &request).await?;
        Ok(response.into_reply()?)
    }
}

/// Order client over HTTP
#[derive(Clone)]
pub struct HttpOrderClient {
    channel: RpcChannel,
}

impl HttpOrderClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            channel: RpcChannel::new("order", base_url, timeout)?,
        })
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn create_order(
        &self,
        user_id: i64,
        items: Vec<OrderItem>,
    ) -> Result<Reply<i64>, ClientError> {
        let request = CreateOrderRequest { user_id, items };
        let response: CreateOrderResponse =
            self.channel.call(CREATE_ORDER_PATH, &request).await?;
        Ok(response.into_reply()?)
    }
}
