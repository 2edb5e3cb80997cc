use std::sync::Arc;

use crate::{
    domain::{cart::CartLineItem, favorite::FavoriteItem},
    error::{AppError, AppResult},
    services::cart_service::CartService,
    store::{KvStore, keys, read_list, write_json},
};

#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn KvStore>,
    cart: CartService,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn KvStore>, cart: CartService) -> Self {
        Self { store, cart }
    }

    pub async fn list(&self) -> Vec<FavoriteItem> {
        read_list(self.store.as_ref(), keys::FAVORITES).await
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.list().await.iter().any(|favorite| favorite.id == id)
    }

    /// Adding a product that is already a favorite leaves the list as is.
    pub async fn add(&self, item: FavoriteItem) -> AppResult<FavoriteItem> {
        let mut favorites = self.list().await;
        if let Some(existing) = favorites.iter().find(|favorite| favorite.id == item.id) {
            return Ok(existing.clone());
        }
        favorites.push(item.clone());
        write_json(self.store.as_ref(), keys::FAVORITES, &favorites).await?;
        Ok(item)
    }

    pub async fn remove(&self, id: &str) -> AppResult<FavoriteItem> {
        let mut favorites = self.list().await;
        let index = favorites
            .iter()
            .position(|favorite| favorite.id == id)
            .ok_or_else(|| AppError::not_found("Favorite"))?;
        let removed = favorites.remove(index);
        write_json(self.store.as_ref(), keys::FAVORITES, &favorites).await?;
        Ok(removed)
    }

    pub async fn add_to_cart(&self, id: &str) -> AppResult<CartLineItem> {
        let favorite = self
            .list()
            .await
            .into_iter()
            .find(|favorite| favorite.id == id)
            .ok_or_else(|| AppError::not_found("Favorite"))?;
        self.cart.add_snapshot(favorite.to_line_item()).await
    }
}
