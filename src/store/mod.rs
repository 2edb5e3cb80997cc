//! Async key-value storage for the customer's on-device state.
//!
//! Values are JSON documents under fixed keys. Reads are forgiving: a backend
//! failure or an unreadable payload is logged and treated as "nothing stored"
//! so first runs and corrupt caches never block the app. Writes report their
//! failures to the caller.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod db;
mod memory;

pub use db::DbStore;
pub use memory::MemoryStore;

pub mod keys {
    pub const CART: &str = "cart";
    pub const SAVED_ITEMS: &str = "savedItems";
    pub const FAVORITES: &str = "favorites";
    pub const ADDRESSES: &str = "addresses";
    pub const PAYMENT_METHODS: &str = "paymentMethods";
    pub const ORDER_HISTORY: &str = "orderHistory";
    pub const SEARCH_HISTORY: &str = "searchHistory";
    pub const USER_TOKEN: &str = "userToken";
    pub const USER_DATA: &str = "userData";
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    async fn remove(&self, key: &str) -> StoreResult<()>;
}

pub async fn read_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "store read failed, treating as empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored value unreadable, treating as empty");
            None
        }
    }
}

/// Absent or unreadable lists read as empty.
pub async fn read_list<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Vec<T> {
    read_json(store, key).await.unwrap_or_default()
}

pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}
