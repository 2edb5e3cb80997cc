use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::merchant::{
        CreateMerchantOrderRequest, CreateProductRequest, MerchantOrderList,
        MerchantOrderWithItems, MerchantRegistered, OrderStatusQuery, ProductList,
        RegisterMerchantRequest, ReportList, ReportQuery, UpdateOrderStatusRequest,
        UpdateProductRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::MerchantProduct,
    response::ApiResponse,
    services::merchant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_merchant))
        .route("/products", post(create_product))
        .route("/products/{id}", patch(update_product))
        .route("/orders", post(create_order))
        .route("/orders/{id}", put(update_order_status))
        .route("/orders/{id}/cancel", post(cancel_order))
        .route("/{merchant_id}/products", get(list_products))
        .route("/{merchant_id}/orders", get(list_orders))
        .route("/{merchant_id}/reports", get(sales_reports))
}

#[utoipa::path(
    post,
    path = "/api/merchant/register",
    request_body = RegisterMerchantRequest,
    responses(
        (status = 200, description = "Merchant profile and a token carrying the merchant role", body = ApiResponse<MerchantRegistered>),
        (status = 409, description = "Already a merchant")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn register_merchant(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RegisterMerchantRequest>,
) -> AppResult<Json<ApiResponse<MerchantRegistered>>> {
    let resp = merchant_service::register_merchant(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/merchant/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<MerchantProduct>),
        (status = 403, description = "Not a merchant")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<MerchantProduct>>> {
    let resp = merchant_service::create_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/merchant/{merchant_id}/products",
    params(("merchant_id" = Uuid, Path, description = "Merchant ID")),
    responses(
        (status = 200, description = "Merchant products", body = ApiResponse<ProductList>)
    ),
    tag = "Merchant"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Path(merchant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = merchant_service::list_products(&state, merchant_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/merchant/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<MerchantProduct>),
        (status = 403, description = "Product belongs to another merchant"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<MerchantProduct>>> {
    let resp = merchant_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/merchant/orders",
    request_body = CreateMerchantOrderRequest,
    responses(
        (status = 200, description = "Order submitted to the merchant", body = ApiResponse<MerchantOrderWithItems>),
        (status = 404, description = "Merchant or product not found"),
        (status = 409, description = "Order has no items")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMerchantOrderRequest>,
) -> AppResult<Json<ApiResponse<MerchantOrderWithItems>>> {
    let resp = merchant_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/merchant/{merchant_id}/orders",
    params(
        ("merchant_id" = Uuid, Path, description = "Merchant ID"),
        OrderStatusQuery
    ),
    responses(
        (status = 200, description = "Merchant orders, newest first", body = ApiResponse<MerchantOrderList>),
        (status = 403, description = "Not this merchant")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Path(merchant_id): Path<Uuid>,
    Query(query): Query<OrderStatusQuery>,
) -> AppResult<Json<ApiResponse<MerchantOrderList>>> {
    let resp = merchant_service::list_orders(&state, &user, merchant_id, query.status).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/merchant/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<MerchantOrderWithItems>),
        (status = 400, description = "Unknown status"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<MerchantOrderWithItems>>> {
    let resp = merchant_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/merchant/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<MerchantOrderWithItems>),
        (status = 409, description = "Order is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MerchantOrderWithItems>>> {
    let resp = merchant_service::cancel_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/merchant/{merchant_id}/reports",
    params(
        ("merchant_id" = Uuid, Path, description = "Merchant ID"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "Sales per period, most recent first", body = ApiResponse<ReportList>),
        (status = 403, description = "Not this merchant")
    ),
    security(("bearer_auth" = [])),
    tag = "Merchant"
)]
pub async fn sales_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Path(merchant_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<ReportList>>> {
    let resp = merchant_service::sales_reports(&state, &user, merchant_id, query).await?;
    Ok(Json(resp))
}
