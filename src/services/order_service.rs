use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::CheckoutConfig,
    domain::{
        address::DeliveryAddress,
        order::{Order, OrderStatus, OrderType, generate_order_number},
        payment::PaymentMethod,
        pricing::{PriceBreakdown, quote},
    },
    error::{AppError, AppResult},
    services::cart_service::CartService,
    store::{KvStore, keys, read_list, write_json},
};

/// What the customer picked on the checkout screen.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub order_type: OrderType,
    pub address: Option<DeliveryAddress>,
    pub payment_method: PaymentMethod,
}

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn KvStore>,
    cart: CartService,
    checkout: CheckoutConfig,
}

impl OrderService {
    pub fn new(store: Arc<dyn KvStore>, cart: CartService, checkout: CheckoutConfig) -> Self {
        Self {
            store,
            cart,
            checkout,
        }
    }

    /// Most recent first.
    pub async fn list(&self) -> Vec<Order> {
        read_list(self.store.as_ref(), keys::ORDER_HISTORY).await
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        self.list()
            .await
            .into_iter()
            .find(|order| order.id == order_id)
            .ok_or_else(|| AppError::not_found("Order"))
    }

    /// Totals for the current cart, without placing anything.
    pub async fn quote(&self, order_type: OrderType) -> PriceBreakdown {
        quote(&self.cart.items().await, order_type, self.checkout.delivery_fee)
    }

    /// Turns the cart into an order at the head of history, then empties the
    /// cart. If the cart cannot be cleared the history write is undone.
    pub async fn place_order(&self, request: PlaceOrder) -> AppResult<Order> {
        let items = self.cart.items().await;
        if items.is_empty() {
            return Err(AppError::InvalidState("Your cart is empty".into()));
        }

        let delivery_address = match request.order_type {
            OrderType::Delivery => {
                let address = request.address.ok_or_else(|| {
                    AppError::Validation("Please select a delivery address".into())
                })?;
                address.validate()?;
                Some(address)
            }
            OrderType::Pickup => None,
        };

        let breakdown = quote(&items, request.order_type, self.checkout.delivery_fee);
        let now = Utc::now();
        let order = Order {
            id: generate_order_number(now),
            items,
            order_type: request.order_type,
            delivery_address,
            payment_method: request.payment_method,
            subtotal: breakdown.subtotal,
            delivery_fee: breakdown.delivery_fee,
            total: breakdown.total,
            status: OrderStatus::INITIAL,
            created_at: now,
        };

        let previous = self.list().await;
        let mut history = Vec::with_capacity(previous.len() + 1);
        history.push(order.clone());
        history.extend(previous.iter().cloned());
        history.truncate(self.checkout.order_history_limit);
        write_json(self.store.as_ref(), keys::ORDER_HISTORY, &history).await?;

        if let Err(err) = self.cart.clear().await {
            if let Err(restore_err) =
                write_json(self.store.as_ref(), keys::ORDER_HISTORY, &previous).await
            {
                tracing::error!(
                    order_id = %order.id,
                    error = %restore_err,
                    "could not roll back order history after failed cart clear"
                );
            }
            return Err(err);
        }

        tracing::info!(
            order_id = %order.id,
            order_type = order.order_type.as_str(),
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }

    /// Moves the order one step along its lifecycle and rewrites it in place.
    pub async fn advance_status(&self, order_id: &str) -> AppResult<Order> {
        let mut history = self.list().await;
        let order = history
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| AppError::not_found("Order"))?;

        let next = order.status.next().ok_or_else(|| {
            AppError::InvalidState(format!("Order is already {}", order.status))
        })?;
        let from = order.status;
        order.status = next;
        let updated = order.clone();

        write_json(self.store.as_ref(), keys::ORDER_HISTORY, &history).await?;
        tracing::info!(order_id, from = %from, to = %next, "order status advanced");
        Ok(updated)
    }
}
