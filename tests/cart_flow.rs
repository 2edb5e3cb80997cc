mod common;

use std::{pin::pin, sync::Arc};

use food_delivery_api::{
    config::CheckoutConfig,
    domain::{cart::MAX_LINE_QUANTITY, catalog::Catalog},
    error::AppError,
    money::Money,
    services::{CustomerServices, cart_service::cart_events},
    store::{KvStore, MemoryStore, keys},
};
use futures::StreamExt;
use uuid::Uuid;

use common::{FlakyStore, customer, customer_with};

#[tokio::test]
async fn customized_adds_never_merge() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let product = catalog
        .product("jollibee-chicken-joy")
        .expect("chicken joy product");

    let plain = customer.cart.add_item(product, Vec::new()).await?;
    let with_rice = customer
        .cart
        .add_item(product, vec!["Extra Rice".into(), "Gravy".into()])
        .await?;

    assert_ne!(plain.id, with_rice.id);
    assert_eq!(plain.price, Money::from_pesos(89));
    assert_eq!(with_rice.price, Money::from_pesos(139));
    assert_eq!(customer.cart.items().await.len(), 2);
    assert_eq!(customer.cart.item_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn quick_add_merges_by_menu_item() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();

    customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    let line = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;

    assert_eq!(line.id, "jollibee-chicken-joy");
    assert_eq!(line.quantity, 2);
    assert_eq!(customer.cart.items().await.len(), 1);

    let missing = customer.cart.quick_add(&catalog, "jollibee", "Halo-Halo").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn unknown_option_is_rejected_without_touching_cart() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let product = catalog.product("mcdonalds-big-mac").expect("big mac");

    let result = customer
        .cart
        .add_item(product, vec!["Extra Pickles".into()])
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(customer.cart.items().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn unavailable_option_is_rejected() -> anyhow::Result<()> {
    let customer = customer();
    let mut catalog = Catalog::builtin();
    let product = catalog
        .products
        .iter_mut()
        .find(|product| product.id == "mcdonalds-big-mac")
        .expect("big mac");
    product.options[0].items[1].available = false;

    let result = customer
        .cart
        .add_item(product, vec!["Large Fries".into()])
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn quantity_never_drops_below_one() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let line = customer.cart.quick_add(&catalog, "greenwich", "Lasagna Supreme").await?;

    let mut quantity = line.quantity;
    for delta in [-1, -1, 1, 1, 1, -5, -1] {
        quantity = customer.cart.change_quantity(&line.id, delta).await?.quantity;
        assert!(quantity >= 1);
    }
    assert_eq!(quantity, 1);
    Ok(())
}

#[tokio::test]
async fn removing_an_unknown_line_is_not_found() -> anyhow::Result<()> {
    let customer = customer();
    let result = customer.cart.remove_item("nope").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn save_then_move_resets_quantity() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let line = customer.cart.quick_add(&catalog, "jollibee", "Jolly Spaghetti").await?;
    customer.cart.change_quantity(&line.id, 2).await?;

    let saved = customer.cart.save_for_later(&line.id).await?;
    assert_eq!(saved.item.quantity, 3);
    assert!(customer.cart.items().await.is_empty());

    let restored = customer.cart.move_to_cart(&saved.item.id).await?;
    assert_eq!(restored.product_id, line.product_id);
    assert_eq!(restored.price, line.price);
    assert_eq!(restored.quantity, 1);
    assert!(customer.cart.saved_items().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn moved_item_gets_fresh_id_on_collision() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let line = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    customer.cart.save_for_later(&line.id).await?;
    customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;

    let restored = customer.cart.move_to_cart(&line.id).await?;

    assert_ne!(restored.id, line.id);
    let items = customer.cart.items().await;
    assert_eq!(items.len(), 2);
    assert_ne!(items[0].id, items[1].id);
    Ok(())
}

#[tokio::test]
async fn delete_saved_and_clear() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let first = customer.cart.quick_add(&catalog, "mcdonalds", "Big Mac").await?;
    customer.cart.quick_add(&catalog, "greenwich", "Hawaiian Overload").await?;
    customer.cart.save_for_later(&first.id).await?;

    customer.cart.delete_saved(&first.id).await?;
    assert!(customer.cart.saved_items().await.is_empty());
    assert!(matches!(
        customer.cart.delete_saved(&first.id).await,
        Err(AppError::NotFound(_))
    ));

    customer.cart.clear().await?;
    assert_eq!(customer.cart.item_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn save_for_later_rolls_back_when_cart_write_fails() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::default());
    let customer = customer_with(store.clone(), CheckoutConfig::default());
    let catalog = Catalog::builtin();
    let line = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;

    store.fail_writes_to(keys::CART);
    let result = customer.cart.save_for_later(&line.id).await;

    assert!(matches!(result, Err(AppError::Storage(_))));
    assert_eq!(customer.cart.items().await, vec![line]);
    assert!(customer.cart.saved_items().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn move_to_cart_keeps_item_saved_when_a_write_fails() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::default());
    let customer = customer_with(store.clone(), CheckoutConfig::default());
    let catalog = Catalog::builtin();
    let line = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    customer.cart.save_for_later(&line.id).await?;

    store.fail_writes_to(keys::SAVED_ITEMS);
    let result = customer.cart.move_to_cart(&line.id).await;
    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(customer.cart.items().await.is_empty());
    assert_eq!(customer.cart.saved_items().await.len(), 1);

    store.heal();
    store.fail_writes_to(keys::CART);
    let result = customer.cart.move_to_cart(&line.id).await;
    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(customer.cart.items().await.is_empty());
    assert_eq!(customer.cart.saved_items().await.len(), 1);

    // A retry after the store recovers moves the item exactly once.
    store.heal();
    customer.cart.move_to_cart(&line.id).await?;
    assert_eq!(customer.cart.items().await.len(), 1);
    assert!(customer.cart.saved_items().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn huge_quantity_changes_stay_bounded() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let joy = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    let spaghetti = customer
        .cart
        .quick_add(&catalog, "jollibee", "Jolly Spaghetti")
        .await?;

    let joy = customer.cart.change_quantity(&joy.id, i64::MAX).await?;
    let spaghetti = customer.cart.change_quantity(&spaghetti.id, i64::MAX).await?;
    assert_eq!(joy.quantity, MAX_LINE_QUANTITY);
    assert_eq!(spaghetti.quantity, MAX_LINE_QUANTITY);

    assert_eq!(customer.cart.item_count().await, 2 * MAX_LINE_QUANTITY);
    assert_eq!(customer.cart.items().await.len(), 2);

    let joy = customer.cart.change_quantity(&joy.id, i64::MIN).await?;
    assert_eq!(joy.quantity, 1);
    Ok(())
}

#[tokio::test]
async fn event_stream_only_carries_own_cart() -> anyhow::Result<()> {
    let events = cart_events();
    let catalog = Arc::new(Catalog::builtin());
    let shopper = |owner: Uuid| {
        CustomerServices::new(
            Arc::new(MemoryStore::new()),
            owner,
            catalog.clone(),
            CheckoutConfig::default(),
            events.clone(),
        )
    };
    let alice = shopper(Uuid::new_v4());
    let bob = shopper(Uuid::new_v4());

    let mut stream = pin!(alice.cart.event_stream());
    bob.cart.quick_add(&catalog, "mcdonalds", "Big Mac").await?;
    alice.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    alice.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;

    let first = stream.next().await.expect("alice's first event");
    let second = stream.next().await.expect("alice's second event");
    assert_eq!(first.item_count, 1);
    assert_eq!(second.item_count, 2);
    Ok(())
}

#[tokio::test]
async fn corrupt_cart_reads_as_empty() -> anyhow::Result<()> {
    let store = Arc::new(FlakyStore::default());
    store.set(keys::CART, "{not json".into()).await?;
    let customer = customer_with(store, CheckoutConfig::default());

    assert!(customer.cart.items().await.is_empty());
    assert_eq!(customer.cart.item_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn mutations_publish_item_count() -> anyhow::Result<()> {
    let customer = customer();
    let catalog = Catalog::builtin();
    let mut events = customer.cart.subscribe();

    let line = customer.cart.quick_add(&catalog, "jollibee", "Chicken Joy").await?;
    customer.cart.change_quantity(&line.id, 2).await?;
    customer.cart.remove_item(&line.id).await?;

    let counts: Vec<u32> = vec![
        events.recv().await?.item_count,
        events.recv().await?.item_count,
        events.recv().await?.item_count,
    ];
    assert_eq!(counts, vec![1, 3, 0]);
    Ok(())
}
