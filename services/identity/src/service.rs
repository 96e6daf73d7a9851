//! Identity service: Register, Login and Validate
//!
//! Expected business outcomes are returned as response envelopes with a
//! non-OK status. `Err` is reserved for infrastructure faults.

use std::sync::Arc;

use common::rpc::{
    Code, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ValidateRequest,
    ValidateResponse,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    jwt::{TokenError, TokenService},
    password::{PasswordError, PasswordHasher},
    repositories::{CredentialStore, StoreError},
    validation::validate_credentials,
};

/// Infrastructure faults of the identity service
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("credential store failure: {0}")]
    Store(#[source] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Composes the credential store, the password hasher and the token service
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl IdentityService {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse, IdentityError> {
        if let Err(message) = validate_credentials(&req.email, &req.password) {
            return Ok(RegisterResponse::rejected(Code::InvalidArgument, message));
        }

        let password_hash = self.hasher.hash(&req.password)?;

        match self.store.create(&req.email, &password_hash).await {
            Ok(user) => {
                info!(user_id = user.id, "User registered");
                Ok(RegisterResponse::ok())
            }
            Err(StoreError::AlreadyExists) => {
                info!("Registration rejected: email already registered");
                Ok(RegisterResponse::rejected(
                    Code::AlreadyExists,
                    "User already exists",
                ))
            }
            Err(e) => Err(IdentityError::Store(e)),
        }
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, IdentityError> {
        let user = match self.store.find_by_email(&req.email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                return Ok(LoginResponse::rejected(Code::NotFound, "User not found"));
            }
            Err(e) => return Err(IdentityError::Store(e)),
        };

        if !self.hasher.verify(&req.password, &user.password_hash)? {
            warn!(user_id = user.id, "Login rejected: invalid credentials");
            return Ok(LoginResponse::rejected(
                Code::Unauthenticated,
                "Invalid credentials",
            ));
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = user.id, "Login succeeded");

        Ok(LoginResponse::ok(token))
    }

    /// Resolve a token to its subject. Read-only and side-effect free.
    pub fn validate(&self, req: ValidateRequest) -> ValidateResponse {
        match self.tokens.verify(&req.token) {
            Ok(user_id) => ValidateResponse::ok(user_id),
            Err(_) => ValidateResponse::rejected(Code::Unauthenticated, "Invalid token"),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
