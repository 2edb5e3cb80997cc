use axum::Router;

use crate::state::AppState;

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod merchant;
pub mod orders;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", account::user_router())
        .nest("/addresses", account::address_router())
        .nest("/payment-methods", account::payment_router())
        .nest("/favorites", account::favorite_router())
        .nest("/catalog", catalog::router())
        .nest("/search", catalog::search_router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/merchant", merchant::router())
}
