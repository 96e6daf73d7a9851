//! Credential store: persistence of users keyed by email

use async_trait::async_trait;
use common::error::DatabaseError;
use thiserror::Error;

use crate::models::User;

pub mod memory;
pub mod user;

pub use memory::MemoryCredentialStore;
pub use user::PgCredentialStore;

/// Failures of the credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The email is already registered
    #[error("a user with this email already exists")]
    AlreadyExists,

    /// No user is registered under the email
    #[error("user not found")]
    NotFound,

    /// Any other persistence failure
    #[error(transparent)]
    Internal(#[from] DatabaseError),
}

/// Pure persistence of credentials with a single uniqueness invariant on email.
///
/// Implementations must detect duplicates through the insert itself, never
/// through a lookup before inserting.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user, failing with [`StoreError::AlreadyExists`] on a duplicate email
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
}
