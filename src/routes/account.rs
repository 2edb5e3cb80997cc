use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};

use crate::{
    audit::{self, AuditAction},
    domain::{
        address::{AddressForm, DeliveryAddress},
        cart::CartLineItem,
        favorite::FavoriteItem,
    },
    dto::{
        account::{AddressList, FavoriteList, PaymentMethodList, PaymentMethodView},
        auth::UpdateUserRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service::{current_user, update_current_user},
    state::AppState,
};

pub fn user_router() -> Router<AppState> {
    Router::new().route("/", get(get_user).put(update_user))
}

pub fn address_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(add_address))
        .route("/{id}", put(update_address).delete(delete_address))
        .route("/{id}/default", post(set_default_address))
}

pub fn payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods))
        .route("/{id}", delete(remove_payment_method))
        .route("/{id}/default", post(set_default_payment_method))
}

pub fn favorite_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{id}", delete(remove_favorite))
        .route("/{id}/cart", post(favorite_to_cart))
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(current_user(&state, &user).await?))
}

#[utoipa::path(
    put,
    path = "/api/user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 400, description = "Invalid name or email")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(update_current_user(&state, &user, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/addresses",
    responses(
        (status = 200, description = "Saved delivery addresses", body = ApiResponse<AddressList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AddressList>>> {
    let items = state.customer(user.user_id).addresses.list().await;
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success("OK", AddressList { items }, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = AddressForm,
    responses(
        (status = 200, description = "Address added", body = ApiResponse<DeliveryAddress>),
        (status = 400, description = "Missing address fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn add_address(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<AddressForm>,
) -> AppResult<Json<ApiResponse<DeliveryAddress>>> {
    let address = state.customer(user.user_id).addresses.add(form).await?;
    Ok(Json(ApiResponse::success(
        "Address added",
        address,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    params(("id" = String, Path, description = "Address ID")),
    request_body = AddressForm,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<DeliveryAddress>),
        (status = 404, description = "Address not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(form): Json<AddressForm>,
) -> AppResult<Json<ApiResponse<DeliveryAddress>>> {
    let address = state
        .customer(user.user_id)
        .addresses
        .update(&id, form)
        .await?;
    Ok(Json(ApiResponse::success(
        "Address updated",
        address,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    params(("id" = String, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address removed", body = ApiResponse<DeliveryAddress>),
        (status = 404, description = "Address not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeliveryAddress>>> {
    let removed = state.customer(user.user_id).addresses.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        "Address removed",
        removed,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/addresses/{id}/default",
    params(("id" = String, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Default address set", body = ApiResponse<DeliveryAddress>),
        (status = 404, description = "Address not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn set_default_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeliveryAddress>>> {
    let address = state
        .customer(user.user_id)
        .addresses
        .set_default(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Default address set",
        address,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/payment-methods",
    responses(
        (status = 200, description = "Payment methods, seeded on first access", body = ApiResponse<PaymentMethodList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let items: Vec<PaymentMethodView> = state
        .customer(user.user_id)
        .payments
        .list()
        .await
        .into_iter()
        .map(PaymentMethodView::from)
        .collect();
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success(
        "OK",
        PaymentMethodList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/payment-methods/{id}/default",
    params(("id" = String, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Default payment method set", body = ApiResponse<PaymentMethodView>),
        (status = 404, description = "Payment method not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn set_default_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<PaymentMethodView>>> {
    let method = state
        .customer(user.user_id)
        .payments
        .set_default(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Default payment method set",
        method.into(),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/payment-methods/{id}",
    params(("id" = String, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Payment method removed", body = ApiResponse<PaymentMethodView>),
        (status = 404, description = "Payment method not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn remove_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<PaymentMethodView>>> {
    let method = state.customer(user.user_id).payments.remove(&id).await?;
    Ok(Json(ApiResponse::success(
        "Payment method removed",
        method.into(),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "Favorite products", body = ApiResponse<FavoriteList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoriteList>>> {
    let items = state.customer(user.user_id).favorites.list().await;
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success(
        "OK",
        FavoriteList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = FavoriteItem,
    responses(
        (status = 200, description = "Added to favorites", body = ApiResponse<FavoriteItem>)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(item): Json<FavoriteItem>,
) -> AppResult<Json<ApiResponse<FavoriteItem>>> {
    let favorite = state.customer(user.user_id).favorites.add(item).await?;
    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::FavoriteAdd,
        serde_json::json!({ "id": favorite.id }),
    )
    .await;
    Ok(Json(ApiResponse::success(
        "Added to favorites",
        favorite,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(("id" = String, Path, description = "Favorite product ID")),
    responses(
        (status = 200, description = "Removed from favorites", body = ApiResponse<FavoriteItem>),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<FavoriteItem>>> {
    let removed = state.customer(user.user_id).favorites.remove(&id).await?;
    Ok(Json(ApiResponse::success(
        "Removed from favorites",
        removed,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/favorites/{id}/cart",
    params(("id" = String, Path, description = "Favorite product ID")),
    responses(
        (status = 200, description = "Favorite added to cart", body = ApiResponse<CartLineItem>),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn favorite_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartLineItem>>> {
    let line = state
        .customer(user.user_id)
        .favorites
        .add_to_cart(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Added to cart",
        line,
        Some(Meta::empty()),
    )))
}
