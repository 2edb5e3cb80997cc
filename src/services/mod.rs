pub mod address_service;
pub mod auth_service;
pub mod cart_service;
pub mod favorite_service;
pub mod merchant_service;
pub mod order_service;
pub mod payment_service;
pub mod search_service;
pub mod session_service;

use std::sync::Arc;

use uuid::Uuid;

use crate::{config::CheckoutConfig, domain::catalog::Catalog, store::KvStore};

use self::{
    address_service::AddressService,
    cart_service::{CartEvents, CartService},
    favorite_service::FavoriteService,
    order_service::OrderService,
    payment_service::PaymentService,
    search_service::SearchService,
    session_service::SessionService,
};

/// Every customer-side service, wired to one owner's store.
#[derive(Clone)]
pub struct CustomerServices {
    pub cart: CartService,
    pub orders: OrderService,
    pub addresses: AddressService,
    pub payments: PaymentService,
    pub favorites: FavoriteService,
    pub search: SearchService,
    pub session: SessionService,
}

impl CustomerServices {
    pub fn new(
        store: Arc<dyn KvStore>,
        owner: Uuid,
        catalog: Arc<Catalog>,
        checkout: CheckoutConfig,
        events: CartEvents,
    ) -> Self {
        let cart = CartService::new(store.clone(), owner, events);
        Self {
            orders: OrderService::new(store.clone(), cart.clone(), checkout),
            addresses: AddressService::new(store.clone()),
            payments: PaymentService::new(store.clone()),
            favorites: FavoriteService::new(store.clone(), cart.clone()),
            search: SearchService::new(store.clone(), catalog),
            session: SessionService::new(store),
            cart,
        }
    }
}
