//! In-process credential store for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{CredentialStore, StoreError};
use crate::models::User;

#[derive(Debug, Default)]
struct Entries {
    last_id: i64,
    by_email: HashMap<String, User>,
}

/// Credential store kept in memory
///
/// Ids are assigned from a counter and never reused; uniqueness is enforced
/// under the same lock as the insert.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.entries.lock().await.by_email.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut entries = self.entries.lock().await;

        if entries.by_email.contains_key(email) {
            return Err(StoreError::AlreadyExists);
        }

        entries.last_id += 1;
        let user = User {
            id: entries.last_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        entries.by_email.insert(email.to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.entries
            .lock()
            .await
            .by_email
            .get(email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
