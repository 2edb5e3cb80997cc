#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use food_delivery_api::{
    config::CheckoutConfig,
    domain::catalog::Catalog,
    services::{CustomerServices, cart_service::cart_events},
    store::{KvStore, MemoryStore, StoreError, StoreResult},
};
use uuid::Uuid;

pub fn customer() -> CustomerServices {
    customer_with(Arc::new(MemoryStore::new()), CheckoutConfig::default())
}

pub fn customer_with(store: Arc<dyn KvStore>, checkout: CheckoutConfig) -> CustomerServices {
    CustomerServices::new(
        store,
        Uuid::new_v4(),
        Arc::new(Catalog::builtin()),
        checkout,
        cart_events(),
    )
}

/// Memory store whose writes to chosen keys can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn fail_writes_to(&self, key: &str) {
        self.failing
            .lock()
            .expect("failing keys lock")
            .insert(key.to_string());
    }

    pub fn heal(&self) {
        self.failing.lock().expect("failing keys lock").clear();
    }

    fn check(&self, key: &str) -> StoreResult<()> {
        if self.failing.lock().expect("failing keys lock").contains(key) {
            return Err(StoreError::Backend(format!("disk full writing {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(key)?;
        self.inner.remove(key).await
    }
}
