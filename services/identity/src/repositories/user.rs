//! PostgreSQL-backed credential store

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::{CredentialStore, StoreError};
use crate::models::User;

/// User repository over the `users` table
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn init_schema(&self) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Schema)?;

        info!("Users table ready");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        info!("Creating new user: {}", email);

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::AlreadyExists)
            }
            Err(e) => Err(DatabaseError::Query(e).into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        info!("Finding user by email: {}", email);

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?
        .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_email_is_rejected_by_the_table(pool: PgPool) {
        let store = PgCredentialStore::new(pool);
        store.init_schema().await.unwrap();

        let first = store.create("alice@x.com", "hash-1").await.unwrap();
        assert!(first.id > 0);

        let err = store.create("alice@x.com", "hash-2").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));

        let stored = store.find_by_email("alice@x.com").await.unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.password_hash, "hash-1");
    }

    #[sqlx::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_unknown_email_is_not_found(pool: PgPool) {
        let store = PgCredentialStore::new(pool);
        store.init_schema().await.unwrap();

        let err = store.find_by_email("nobody@x.com").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
