//! Order models

use common::rpc::{OrderItem, OrderView};

/// Status every new order starts in
pub const PENDING: &str = "PENDING";

/// Order record
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub items: Vec<OrderItem>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        OrderView {
            order_id: order.id,
            user_id: order.user_id,
            status: order.status,
            items: order.items,
        }
    }
}
