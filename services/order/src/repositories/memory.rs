//! In-process order store for tests and local runs

use async_trait::async_trait;
use common::{error::DatabaseResult, rpc::OrderItem};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::OrderStore;
use crate::models::{Order, PENDING};

#[derive(Debug, Default)]
struct Entries {
    last_id: i64,
    orders: HashMap<i64, Order>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, user_id: i64, items: &[OrderItem]) -> DatabaseResult<Order> {
        let mut entries = self.entries.lock().await;
        entries.last_id += 1;

        let order = Order {
            id: entries.last_id,
            user_id,
            status: PENDING.to_string(),
            items: items.to_vec(),
        };
        entries.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn get(&self, order_id: i64) -> DatabaseResult<Option<Order>> {
        Ok(self.entries.lock().await.orders.get(&order_id).cloned())
    }
}
