mod common;

use std::sync::Arc;

use food_delivery_api::{
    config::CheckoutConfig,
    domain::{
        address::AddressForm,
        catalog::Catalog,
        order::{OrderStatus, OrderType},
    },
    error::AppError,
    money::Money,
    services::{CustomerServices, order_service::PlaceOrder},
    store::keys,
};

use common::{FlakyStore, customer, customer_with};

fn home() -> AddressForm {
    AddressForm {
        label: "Home".into(),
        street: "123 Ayala Ave".into(),
        city: "Makati".into(),
        state: "Metro Manila".into(),
        zip_code: "1226".into(),
        instructions: Some("Leave at the guard house".into()),
    }
}

async fn fill_cart(customer: &CustomerServices) -> anyhow::Result<()> {
    let catalog = Catalog::builtin();
    customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    let spaghetti = customer
        .cart
        .quick_add(&catalog, "jollibee", "Jolly Spaghetti")
        .await?;
    customer.cart.change_quantity(&spaghetti.id, 1).await?;
    Ok(())
}

async fn delivery(customer: &CustomerServices) -> anyhow::Result<PlaceOrder> {
    Ok(PlaceOrder {
        order_type: OrderType::Delivery,
        address: customer.addresses.default_address().await,
        payment_method: customer
            .payments
            .default_method()
            .await
            .expect("seeded default payment"),
    })
}

#[tokio::test]
async fn delivery_order_totals_and_clears_cart() -> anyhow::Result<()> {
    let customer = customer();
    customer.addresses.add(home()).await?;
    fill_cart(&customer).await?;

    let quote = customer.orders.quote(OrderType::Delivery).await;
    assert_eq!(quote.subtotal, Money::from_pesos(247));
    assert_eq!(quote.total, Money::from_pesos(297));

    let order = customer.orders.place_order(delivery(&customer).await?).await?;

    assert_eq!(order.subtotal, Money::from_pesos(247));
    assert_eq!(order.delivery_fee, Money::from_pesos(50));
    assert_eq!(order.total, Money::from_pesos(297));
    assert_eq!(order.status, OrderStatus::INITIAL);
    assert!(order.id.starts_with("UFF-"));
    assert!(customer.cart.items().await.is_empty());

    let history = customer.orders.list().await;
    assert_eq!(history[0].id, order.id);
    assert_eq!(history[0].status, OrderStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn pickup_has_no_delivery_fee() -> anyhow::Result<()> {
    let customer = customer();
    fill_cart(&customer).await?;

    let order = customer
        .orders
        .place_order(PlaceOrder {
            order_type: OrderType::Pickup,
            address: None,
            payment_method: customer.payments.find("gcash-1").await?,
        })
        .await?;

    assert_eq!(order.delivery_fee, Money::ZERO);
    assert_eq!(order.total, Money::from_pesos(247));
    assert!(order.delivery_address.is_none());
    Ok(())
}

#[tokio::test]
async fn configured_delivery_fee_is_used() -> anyhow::Result<()> {
    let checkout = CheckoutConfig {
        delivery_fee: Money::parse("₱5.99")?,
        ..CheckoutConfig::default()
    };
    let customer = customer_with(Arc::new(FlakyStore::default()), checkout);
    customer.addresses.add(home()).await?;
    fill_cart(&customer).await?;

    let order = customer.orders.place_order(delivery(&customer).await?).await?;
    assert_eq!(order.total.to_string(), "₱252.99");
    Ok(())
}

#[tokio::test]
async fn empty_cart_cannot_check_out() -> anyhow::Result<()> {
    let customer = customer();
    customer.addresses.add(home()).await?;

    let result = customer.orders.place_order(delivery(&customer).await?).await;

    assert!(matches!(result, Err(AppError::InvalidState(_))));
    assert!(customer.orders.list().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn delivery_without_address_keeps_cart() -> anyhow::Result<()> {
    let customer = customer();
    fill_cart(&customer).await?;

    let result = customer.orders.place_order(delivery(&customer).await?).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(customer.cart.items().await.len(), 2);
    assert!(customer.orders.list().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_cart_clear_rolls_back_history() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::default());
    let customer = customer_with(store.clone(), CheckoutConfig::default());
    customer.addresses.add(home()).await?;
    fill_cart(&customer).await?;
    let request = delivery(&customer).await?;

    store.fail_writes_to(keys::CART);
    let result = customer.orders.place_order(request).await;

    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(customer.orders.list().await.is_empty());
    assert_eq!(customer.cart.items().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn status_advances_to_completed_then_stops() -> anyhow::Result<()> {
    let customer = customer();
    customer.addresses.add(home()).await?;
    fill_cart(&customer).await?;
    let order = customer.orders.place_order(delivery(&customer).await?).await?;

    let mut seen = vec![order.status];
    for _ in 0..5 {
        seen.push(customer.orders.advance_status(&order.id).await?.status);
    }
    assert_eq!(seen, OrderStatus::SEQUENCE.to_vec());

    let stored = customer.orders.get(&order.id).await?;
    assert_eq!(stored.status, OrderStatus::Completed);
    assert!(stored.timeline().iter().all(|step| step.completed));

    let again = customer.orders.advance_status(&order.id).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));
    Ok(())
}

#[tokio::test]
async fn history_is_newest_first_and_capped() -> anyhow::Result<()> {
    let checkout = CheckoutConfig {
        order_history_limit: 2,
        ..CheckoutConfig::default()
    };
    let customer = customer_with(Arc::new(FlakyStore::default()), checkout);
    let catalog = Catalog::builtin();
    let payment = customer.payments.find("cash-1").await?;

    let mut placed = Vec::new();
    for _ in 0..3 {
        customer.cart.quick_add(&catalog, "mcdonalds", "Big Mac").await?;
        let order = customer
            .orders
            .place_order(PlaceOrder {
                order_type: OrderType::Pickup,
                address: None,
                payment_method: payment.clone(),
            })
            .await?;
        placed.push(order.id);
    }

    let ids: Vec<String> = customer
        .orders
        .list()
        .await
        .into_iter()
        .map(|order| order.id)
        .collect();
    assert_eq!(ids, vec![placed[2].clone(), placed[1].clone()]);
    assert!(matches!(
        customer.orders.get(&placed[0]).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn pickup_timeline_describes_pickup() -> anyhow::Result<()> {
    let customer = customer();
    fill_cart(&customer).await?;
    let order = customer
        .orders
        .place_order(PlaceOrder {
            order_type: OrderType::Pickup,
            address: None,
            payment_method: customer.payments.find("cash-1").await?,
        })
        .await?;

    let steps = order.timeline();
    assert_eq!(steps.len(), 5);
    assert!(steps.iter().all(|step| !step.completed));
    let delivering = steps
        .iter()
        .find(|step| step.status == OrderStatus::Delivering)
        .expect("delivering step");
    assert_eq!(
        delivering.description,
        OrderStatus::Delivering.describe(OrderType::Pickup)
    );
    Ok(())
}
