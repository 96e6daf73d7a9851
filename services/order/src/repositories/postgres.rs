//! PostgreSQL-backed order store

use async_trait::async_trait;
use common::{
    error::{DatabaseError, DatabaseResult},
    rpc::OrderItem,
};
use sqlx::{PgPool, Row, types::Json};
use tracing::info;

use super::OrderStore;
use crate::models::{Order, PENDING};

/// Order repository over the `orders` table
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `orders` table if it does not exist yet
    pub async fn init_schema(&self) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                status TEXT NOT NULL,
                items JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Schema)?;

        info!("Orders table ready");
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, user_id: i64, items: &[OrderItem]) -> DatabaseResult<Order> {
        let row = sqlx::query(
            r#"
            INSERT INTO orders (user_id, status, items)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(PENDING)
        .bind(Json(items))
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let order = Order {
            id: row.get("id"),
            user_id,
            status: PENDING.to_string(),
            items: items.to_vec(),
        };

        info!(order_id = order.id, user_id, "Order created");
        Ok(order)
    }

    async fn get(&self, order_id: i64) -> DatabaseResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, status, items
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        match row {
            Some(row) => {
                let Json(items): Json<Vec<OrderItem>> =
                    row.try_get("items").map_err(DatabaseError::Query)?;
                Ok(Some(Order {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    status: row.get("status"),
                    items,
                }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_create_then_get(pool: PgPool) {
        let store = PgOrderStore::new(pool);
        store.init_schema().await.unwrap();

        let items = vec![OrderItem {
            product_id: 10,
            quantity: 2,
            price: 4.5,
        }];
        let created = store.create(3, &items).await.unwrap();
        assert!(created.id > 0);

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(store.get(created.id + 1).await.unwrap().is_none());
    }
}
