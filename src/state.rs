use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    domain::catalog::Catalog,
    services::{
        CustomerServices,
        cart_service::{CartEvents, cart_events},
    },
    store::DbStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub cart_events: CartEvents,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, config: AppConfig, catalog: Catalog) -> Self {
        Self {
            pool,
            orm,
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            cart_events: cart_events(),
        }
    }

    /// Customer services backed by `user_id`'s namespace in `kv_entries`.
    pub fn customer(&self, user_id: Uuid) -> CustomerServices {
        CustomerServices::new(
            Arc::new(DbStore::new(self.orm.clone(), user_id)),
            user_id,
            self.catalog.clone(),
            self.config.checkout,
            self.cart_events.clone(),
        )
    }
}
