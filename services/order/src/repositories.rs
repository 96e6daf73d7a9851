//! Order record store

use async_trait::async_trait;
use common::{error::DatabaseResult, rpc::OrderItem};

use crate::models::Order;

pub mod memory;
pub mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

/// Plain keyed record store for orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new pending order
    async fn create(&self, user_id: i64, items: &[OrderItem]) -> DatabaseResult<Order>;

    /// Get an order by ID
    async fn get(&self, order_id: i64) -> DatabaseResult<Option<Order>>;
}
