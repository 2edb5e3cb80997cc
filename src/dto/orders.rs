use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::{Order, OrderStatus, OrderType, TimelineStep};

/// Missing ids fall back to the customer's default address and payment method.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub order_type: OrderType,
    pub address_id: Option<String>,
    pub payment_method_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderTracking {
    pub order_id: String,
    pub status: OrderStatus,
    pub description: String,
    pub steps: Vec<TimelineStep>,
}

impl From<&Order> for OrderTracking {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            status: order.status,
            description: order.status.describe(order.order_type).to_string(),
            steps: order.timeline(),
        }
    }
}
