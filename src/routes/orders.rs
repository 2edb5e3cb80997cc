use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    audit::{self, AuditAction},
    domain::order::{Order, OrderType},
    dto::orders::{CheckoutRequest, OrderList, OrderTracking},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::order_service::PlaceOrder,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/checkout", post(checkout))
        .route("/{id}", get(get_order))
        .route("/{id}/advance", post(advance_order))
        .route("/{id}/timeline", get(order_timeline))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Order history, most recent first", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let items = state.customer(user.user_id).orders.list().await;
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success("Ok", OrderList { items }, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed and cart cleared", body = ApiResponse<Order>),
        (status = 400, description = "No delivery address or payment method"),
        (status = 409, description = "Cart is empty")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let customer = state.customer(user.user_id);

    let address = match (payload.order_type, payload.address_id.as_deref()) {
        (OrderType::Pickup, _) => None,
        (OrderType::Delivery, Some(id)) => Some(customer.addresses.find(id).await?),
        (OrderType::Delivery, None) => customer.addresses.default_address().await,
    };
    let payment_method = match payload.payment_method_id.as_deref() {
        Some(id) => customer.payments.find(id).await?,
        None => customer
            .payments
            .default_method()
            .await
            .ok_or_else(|| AppError::Validation("Please select a payment method".into()))?,
    };

    let order = customer
        .orders
        .place_order(PlaceOrder {
            order_type: payload.order_type,
            address,
            payment_method,
        })
        .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::Checkout,
        serde_json::json!({
            "order_id": order.id,
            "total": order.total.to_string(),
            "deliver_to": order.delivery_address.as_ref().map(|a| a.one_line()),
        }),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Checkout success",
        order,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<Order>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.customer(user.user_id).orders.get(&id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/advance",
    params(("id" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "Order moved to its next status", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already completed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn advance_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .customer(user.user_id)
        .orders
        .advance_status(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/timeline",
    params(("id" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "Tracking steps", body = ApiResponse<OrderTracking>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_timeline(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderTracking>>> {
    let order = state.customer(user.user_id).orders.get(&id).await?;
    Ok(Json(ApiResponse::ok(OrderTracking::from(&order))))
}
