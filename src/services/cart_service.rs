//! The customer's working cart and saved-for-later list.
//!
//! Every successful mutation publishes a [`CartEvent`] so badge counts can
//! refresh without polling.

use std::sync::Arc;

use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        cart::{CartLineItem, SavedItem, item_count},
        catalog::{Catalog, Product, menu_item_id},
        pricing::line_item_unit_price,
    },
    error::{AppError, AppResult},
    store::{KvStore, keys, read_list, write_json},
};

const CART_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEvent {
    pub owner: Uuid,
    pub item_count: u32,
}

pub type CartEvents = broadcast::Sender<CartEvent>;

pub fn cart_events() -> CartEvents {
    broadcast::channel(CART_EVENT_CAPACITY).0
}

/// `owner`'s events from a shared channel. A lagging receiver skips ahead to
/// the newest event; the stream ends when every sender is gone.
pub fn owner_events(
    mut receiver: broadcast::Receiver<CartEvent>,
    owner: Uuid,
) -> impl Stream<Item = CartEvent> {
    async_stream::stream! {
        loop {
            match receiver.recv().await {
                Ok(event) if event.owner == owner => yield event,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(%owner, skipped, "cart event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn KvStore>,
    owner: Uuid,
    events: CartEvents,
}

impl CartService {
    pub fn new(store: Arc<dyn KvStore>, owner: Uuid, events: CartEvents) -> Self {
        Self {
            store,
            owner,
            events,
        }
    }

    pub async fn items(&self) -> Vec<CartLineItem> {
        read_list(self.store.as_ref(), keys::CART).await
    }

    pub async fn saved_items(&self) -> Vec<SavedItem> {
        read_list(self.store.as_ref(), keys::SAVED_ITEMS).await
    }

    pub async fn item_count(&self) -> u32 {
        item_count(&self.items().await)
    }

    /// Subscribes immediately; only this owner's events come through.
    pub fn event_stream(&self) -> impl Stream<Item = CartEvent> + use<> {
        owner_events(self.events.subscribe(), self.owner)
    }

    /// Receives an event for every mutation of any cart sharing this channel;
    /// filter on `owner`.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Customized add from a product page. Always appends a new line, even when
    /// the same product is already in the cart.
    pub async fn add_item(
        &self,
        product: &Product,
        selected_options: Vec<String>,
    ) -> AppResult<CartLineItem> {
        for name in &selected_options {
            match product.find_option(name) {
                None => {
                    return Err(AppError::Validation(format!(
                        "{name} is not an option for {}",
                        product.name
                    )));
                }
                Some(option) if !option.available => {
                    return Err(AppError::Validation(format!(
                        "{name} is currently unavailable"
                    )));
                }
                Some(_) => {}
            }
        }

        let line = CartLineItem {
            id: format!("{}-{}", product.id, Uuid::new_v4().simple()),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: line_item_unit_price(product.base_price, &product.options, &selected_options),
            quantity: 1,
            restaurant: product.restaurant.clone(),
            selected_options,
        };

        let mut items = self.items().await;
        items.push(line.clone());
        self.write_cart(&items).await?;
        tracing::debug!(owner = %self.owner, line_id = %line.id, "cart line added");
        Ok(line)
    }

    /// Add straight from a shop menu. Merges into the existing line for the
    /// same menu item.
    pub async fn quick_add(
        &self,
        catalog: &Catalog,
        shop_id: &str,
        item_name: &str,
    ) -> AppResult<CartLineItem> {
        let (shop, item) = catalog
            .menu_item(shop_id, item_name)
            .ok_or_else(|| AppError::not_found("Menu item"))?;
        let id = menu_item_id(&shop.id, &item.name);

        self.add_snapshot(CartLineItem {
            product_id: id.clone(),
            id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            restaurant: shop.name.clone(),
            selected_options: Vec::new(),
        })
        .await
    }

    /// Merge-by-id add: bumps the quantity of a line with the same id, or
    /// appends `line` as given.
    pub async fn add_snapshot(&self, line: CartLineItem) -> AppResult<CartLineItem> {
        let mut items = self.items().await;
        let merged = match items.iter_mut().find(|existing| existing.id == line.id) {
            Some(existing) => {
                existing.adjust_quantity(i64::from(line.quantity));
                existing.clone()
            }
            None => {
                items.push(line.clone());
                line
            }
        };
        self.write_cart(&items).await?;
        Ok(merged)
    }

    pub async fn remove_item(&self, line_id: &str) -> AppResult<CartLineItem> {
        let mut items = self.items().await;
        let index = position(&items, line_id)?;
        let removed = items.remove(index);
        self.write_cart(&items).await?;
        Ok(removed)
    }

    pub async fn change_quantity(&self, line_id: &str, delta: i64) -> AppResult<CartLineItem> {
        let mut items = self.items().await;
        let index = position(&items, line_id)?;
        items[index].adjust_quantity(delta);
        let updated = items[index].clone();
        self.write_cart(&items).await?;
        Ok(updated)
    }

    /// Moves a line to the saved list. The saved list is written first; if the
    /// cart write then fails, the saved list is put back and the error is
    /// returned.
    pub async fn save_for_later(&self, line_id: &str) -> AppResult<SavedItem> {
        let mut items = self.items().await;
        let index = position(&items, line_id)?;
        let line = items.remove(index);

        let previous_saved = self.saved_items().await;
        let saved = SavedItem::new(line);
        let mut next_saved = previous_saved.clone();
        next_saved.push(saved.clone());
        write_json(self.store.as_ref(), keys::SAVED_ITEMS, &next_saved).await?;

        if let Err(err) = self.write_cart(&items).await {
            self.restore_saved(&previous_saved).await;
            return Err(err);
        }
        Ok(saved)
    }

    /// Restores a saved item with quantity 1. A fresh id is assigned if the
    /// saved id is already used by a cart line. Same write order as
    /// [`CartService::save_for_later`]: saved list first, put back if the cart
    /// write fails.
    pub async fn move_to_cart(&self, saved_id: &str) -> AppResult<CartLineItem> {
        let previous_saved = self.saved_items().await;
        let index = previous_saved
            .iter()
            .position(|entry| entry.item.id == saved_id)
            .ok_or_else(|| AppError::not_found("Saved item"))?;

        let mut items = self.items().await;
        let mut line = previous_saved[index].clone().restore();
        if items.iter().any(|existing| existing.id == line.id) {
            line.id = format!("{}-{}", line.product_id, Uuid::new_v4().simple());
        }
        items.push(line.clone());

        let mut next_saved = previous_saved.clone();
        next_saved.remove(index);
        write_json(self.store.as_ref(), keys::SAVED_ITEMS, &next_saved).await?;

        if let Err(err) = self.write_cart(&items).await {
            self.restore_saved(&previous_saved).await;
            return Err(err);
        }
        Ok(line)
    }

    pub async fn delete_saved(&self, saved_id: &str) -> AppResult<SavedItem> {
        let mut saved = self.saved_items().await;
        let index = saved
            .iter()
            .position(|entry| entry.item.id == saved_id)
            .ok_or_else(|| AppError::not_found("Saved item"))?;
        let removed = saved.remove(index);
        write_json(self.store.as_ref(), keys::SAVED_ITEMS, &saved).await?;
        Ok(removed)
    }

    pub async fn clear(&self) -> AppResult<()> {
        self.write_cart(&[]).await
    }

    async fn restore_saved(&self, previous: &[SavedItem]) {
        if let Err(err) = write_json(self.store.as_ref(), keys::SAVED_ITEMS, previous).await {
            tracing::error!(
                owner = %self.owner,
                error = %err,
                "could not restore saved items after failed cart write"
            );
        }
    }

    async fn write_cart(&self, items: &[CartLineItem]) -> AppResult<()> {
        write_json(self.store.as_ref(), keys::CART, items).await?;
        let event = CartEvent {
            owner: self.owner,
            item_count: item_count(items),
        };
        // No subscribers is fine.
        let _ = self.events.send(event);
        Ok(())
    }
}

fn position(items: &[CartLineItem], line_id: &str) -> AppResult<usize> {
    items
        .iter()
        .position(|item| item.id == line_id)
        .ok_or_else(|| AppError::not_found("Cart item"))
}
