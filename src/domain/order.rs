//! The customer's view of an order: an immutable snapshot of the cart plus a
//! status that only ever moves forward.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{address::DeliveryAddress, cart::CartLineItem, payment::PaymentMethod},
    money::Money,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Delivery,
    Pickup,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "delivery",
            OrderType::Pickup => "pickup",
        }
    }
}

/// Customer-side tracking states. Pickup orders reuse `Delivering` for "ready
/// for pickup" and `Completed` for "picked up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Confirmed,
    Preparing,
    Delivering,
    Completed,
}

impl OrderStatus {
    pub const INITIAL: OrderStatus = OrderStatus::Pending;

    pub const SEQUENCE: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Completed,
    ];

    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn describe(self, order_type: OrderType) -> &'static str {
        match (self, order_type) {
            (OrderStatus::Pending, _) => "Your order has been placed",
            (OrderStatus::Processing, _) => "Your order has been received and is being processed",
            (OrderStatus::Confirmed, _) => "Restaurant has confirmed your order",
            (OrderStatus::Preparing, _) => "Your food is being prepared",
            (OrderStatus::Delivering, OrderType::Delivery) => "Your order is on the way",
            (OrderStatus::Delivering, OrderType::Pickup) => "Your order is ready for pickup",
            (OrderStatus::Completed, OrderType::Delivery) => "Your order has been delivered",
            (OrderStatus::Completed, OrderType::Pickup) => "Your order has been picked up",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartLineItem>,
    pub order_type: OrderType,
    /// Present for delivery orders, absent for pickup.
    pub delivery_address: Option<DeliveryAddress>,
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub description: String,
    pub completed: bool,
    pub current: bool,
}

impl Order {
    /// Tracking steps shown after checkout (everything past `pending`).
    pub fn timeline(&self) -> Vec<TimelineStep> {
        OrderStatus::SEQUENCE
            .iter()
            .copied()
            .filter(|status| *status != OrderStatus::Pending)
            .map(|status| TimelineStep {
                status,
                description: status.describe(self.order_type).to_string(),
                completed: status <= self.status,
                current: status == self.status,
            })
            .collect()
    }
}

/// `UFF-<unix millis>-<8 hex chars>`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("UFF-{}-{}", now.timestamp_millis(), &token[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_walks_forward_to_completed() {
        let mut status = OrderStatus::INITIAL;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            status = next;
            seen.push(status);
        }
        assert_eq!(seen, OrderStatus::SEQUENCE.to_vec());
        assert!(OrderStatus::Completed.is_terminal());
    }

    #[test]
    fn pickup_wording_differs_only_in_text() {
        assert_eq!(
            OrderStatus::Delivering.describe(OrderType::Pickup),
            "Your order is ready for pickup"
        );
        assert_eq!(OrderStatus::Delivering.next(), Some(OrderStatus::Completed));
    }

    #[test]
    fn order_numbers_are_unique() {
        let now = Utc::now();
        assert_ne!(generate_order_number(now), generate_order_number(now));
        assert!(generate_order_number(now).starts_with("UFF-"));
    }
}
