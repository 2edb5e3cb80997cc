use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{delete, get, patch, post},
};
use futures::{Stream, StreamExt, stream};

use crate::{
    audit::{self, AuditAction},
    domain::{
        cart::{CartLineItem, SavedItem, item_count},
        order::OrderType,
        pricing::{PriceBreakdown, cart_subtotal},
    },
    dto::cart::{AddItemRequest, CartCount, CartView, QuantityChange, QuickAddRequest, QuoteQuery, SavedList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    money::Money,
    response::{ApiResponse, Meta},
    services::cart_service::CartEvent,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).delete(clear_cart))
        .route("/count", get(cart_count))
        .route("/events", get(cart_event_stream))
        .route("/quote", get(cart_quote))
        .route("/items", post(add_item))
        .route("/quick-add", post(quick_add))
        .route("/items/{id}", patch(change_quantity).delete(remove_item))
        .route("/items/{id}/save", post(save_for_later))
        .route("/saved", get(saved_list))
        .route("/saved/{id}", delete(delete_saved))
        .route("/saved/{id}/move", post(move_to_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines with badge count and subtotal", body = ApiResponse<CartView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let items = state.customer(user.user_id).cart.items().await;
    let meta = Meta::all(items.len());
    let data = CartView {
        item_count: item_count(&items),
        subtotal: cart_subtotal(&items),
        items,
    };
    Ok(Json(ApiResponse::success("OK", data, Some(meta))))
}

/// Polling fallback for clients that cannot subscribe to cart events.
#[utoipa::path(
    get,
    path = "/api/cart/count",
    responses(
        (status = 200, description = "Total quantity in the cart", body = ApiResponse<CartCount>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartCount>>> {
    let item_count = state.customer(user.user_id).cart.item_count().await;
    Ok(Json(ApiResponse::ok(CartCount { item_count })))
}

/// Server-sent `cart` events carrying the badge count: the current count
/// first, then one per cart mutation.
#[utoipa::path(
    get,
    path = "/api/cart/events",
    responses(
        (status = 200, description = "Stream of cart events", body = CartEvent, content_type = "text/event-stream")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_event_stream(
    State(state): State<AppState>,
    user: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let cart = state.customer(user.user_id).cart;
    let updates = cart.event_stream();
    let current = CartEvent {
        owner: user.user_id,
        item_count: cart.item_count().await,
    };

    let events = stream::once(async move { current })
        .chain(updates)
        .map(|event| {
            let json = serde_json::to_string(&event)
                .unwrap_or_else(|_| r#"{"error":"unserializable cart event"}"#.to_string());
            Ok(Event::default().event("cart").data(json))
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[utoipa::path(
    get,
    path = "/api/cart/quote",
    params(QuoteQuery),
    responses(
        (status = 200, description = "Subtotal, delivery fee and total", body = ApiResponse<PriceBreakdown>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_quote(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<ApiResponse<PriceBreakdown>>> {
    let order_type = query.order_type.unwrap_or(OrderType::Delivery);
    let breakdown = state
        .customer(user.user_id)
        .orders
        .quote(order_type)
        .await;
    Ok(Json(ApiResponse::ok(breakdown)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "New cart line", body = ApiResponse<CartLineItem>),
        (status = 400, description = "Unknown or unavailable option"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let product = state
        .catalog
        .product(&payload.product_id)
        .ok_or_else(|| AppError::not_found("Product"))?;
    let line = state
        .customer(user.user_id)
        .cart
        .add_item(product, payload.selected_options)
        .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CartAdd,
        serde_json::json!({ "line_id": line.id, "product_id": line.product_id }),
    )
    .await;
    Ok(Json(ApiResponse::success("Added to cart", line, None)))
}

#[utoipa::path(
    post,
    path = "/api/cart/quick-add",
    request_body = QuickAddRequest,
    responses(
        (status = 200, description = "Merged or new cart line", body = ApiResponse<CartLineItem>),
        (status = 404, description = "Menu item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn quick_add(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<QuickAddRequest>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let line = state
        .customer(user.user_id)
        .cart
        .quick_add(&state.catalog, &payload.shop_id, &payload.item_name)
        .await?;
    Ok(Json(ApiResponse::success("Added to cart", line, None)))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(("id" = String, Path, description = "Cart line ID")),
    request_body = QuantityChange,
    responses(
        (status = 200, description = "Quantity changed, never below 1", body = ApiResponse<CartLineItem>),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<QuantityChange>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let line = state
        .customer(user.user_id)
        .cart
        .change_quantity(&id, payload.delta)
        .await?;
    Ok(Json(ApiResponse::ok(line)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = String, Path, description = "Cart line ID")),
    responses(
        (status = 200, description = "Removed from cart", body = ApiResponse<CartLineItem>),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let removed = state.customer(user.user_id).cart.remove_item(&id).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CartRemove,
        serde_json::json!({ "line_id": removed.id }),
    )
    .await;
    Ok(Json(ApiResponse::success(
        "Removed from cart",
        removed,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    state.customer(user.user_id).cart.clear().await?;
    let data = CartView {
        items: Vec::new(),
        item_count: 0,
        subtotal: Money::ZERO,
    };
    Ok(Json(ApiResponse::success("Cart cleared", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/cart/items/{id}/save",
    params(("id" = String, Path, description = "Cart line ID")),
    responses(
        (status = 200, description = "Moved to saved for later", body = ApiResponse<SavedItem>),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Could not save your changes")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn save_for_later(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SavedItem>>> {
    let saved = state
        .customer(user.user_id)
        .cart
        .save_for_later(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Saved for later",
        saved,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/cart/saved",
    responses(
        (status = 200, description = "Saved for later", body = ApiResponse<SavedList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn saved_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SavedList>>> {
    let items = state.customer(user.user_id).cart.saved_items().await;
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success("OK", SavedList { items }, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/cart/saved/{id}/move",
    params(("id" = String, Path, description = "Saved item ID")),
    responses(
        (status = 200, description = "Back in the cart with quantity 1", body = ApiResponse<CartLineItem>),
        (status = 404, description = "Saved item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn move_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let line = state
        .customer(user.user_id)
        .cart
        .move_to_cart(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Moved to cart",
        line,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart/saved/{id}",
    params(("id" = String, Path, description = "Saved item ID")),
    responses(
        (status = 200, description = "Saved item deleted", body = ApiResponse<SavedItem>),
        (status = 404, description = "Saved item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn delete_saved(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SavedItem>>> {
    let removed = state
        .customer(user.user_id)
        .cart
        .delete_saved(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Saved item deleted",
        removed,
        Some(Meta::empty()),
    )))
}
