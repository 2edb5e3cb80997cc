use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    domain::{catalog::Product, pricing::line_item_unit_price},
    dto::catalog::{ProductQuote, ProductQuoteRequest, SearchHistory, SearchResults, ShopDetail, ShopList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::search_service::SearchQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shops", get(list_shops))
        .route("/shops/{id}", get(get_shop))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}/quote", post(quote_product))
}

pub fn search_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/history", get(search_history).delete(clear_search_history))
}

#[utoipa::path(
    get,
    path = "/api/catalog/shops",
    responses(
        (status = 200, description = "All shops in catalog order", body = ApiResponse<ShopList>)
    ),
    tag = "Catalog"
)]
pub async fn list_shops(State(state): State<AppState>) -> Json<ApiResponse<ShopList>> {
    let items = state.catalog.shops.clone();
    let meta = Meta::all(items.len());
    Json(ApiResponse::success("OK", ShopList { items }, Some(meta)))
}

#[utoipa::path(
    get,
    path = "/api/catalog/shops/{id}",
    params(("id" = String, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop with its customizable products", body = ApiResponse<ShopDetail>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Catalog"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ShopDetail>>> {
    let shop = state
        .catalog
        .shop(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Shop"))?;
    let products = state
        .catalog
        .products
        .iter()
        .filter(|product| product.shop_id == shop.id)
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(ShopDetail { shop, products })))
}

#[utoipa::path(
    get,
    path = "/api/catalog/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with option groups", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state
        .catalog
        .product(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(ApiResponse::ok(product)))
}

#[utoipa::path(
    post,
    path = "/api/catalog/products/{id}/quote",
    params(("id" = String, Path, description = "Product ID")),
    request_body = ProductQuoteRequest,
    responses(
        (status = 200, description = "Unit price with the selected options", body = ApiResponse<ProductQuote>),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn quote_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductQuoteRequest>,
) -> AppResult<Json<ApiResponse<ProductQuote>>> {
    let product = state
        .catalog
        .product(&id)
        .ok_or_else(|| AppError::not_found("Product"))?;
    let unit_price =
        line_item_unit_price(product.base_price, &product.options, &payload.selected_options);
    Ok(Json(ApiResponse::ok(ProductQuote {
        product_id: product.id.clone(),
        unit_price,
    })))
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Filtered and sorted results", body = ApiResponse<SearchResults>)
    ),
    security(("bearer_auth" = [])),
    tag = "Search"
)]
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let items = state.customer(user.user_id).search.search(&query).await;
    let meta = Meta::all(items.len());
    Ok(Json(ApiResponse::success(
        "OK",
        SearchResults { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/search/history",
    responses(
        (status = 200, description = "Recent searches, newest first", body = ApiResponse<SearchHistory>)
    ),
    security(("bearer_auth" = [])),
    tag = "Search"
)]
pub async fn search_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SearchHistory>>> {
    let items = state.customer(user.user_id).search.history().await;
    Ok(Json(ApiResponse::ok(SearchHistory { items })))
}

#[utoipa::path(
    delete,
    path = "/api/search/history",
    responses(
        (status = 200, description = "History cleared", body = ApiResponse<SearchHistory>)
    ),
    security(("bearer_auth" = [])),
    tag = "Search"
)]
pub async fn clear_search_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SearchHistory>>> {
    state.customer(user.user_id).search.clear_history().await?;
    Ok(Json(ApiResponse::success(
        "Search history cleared",
        SearchHistory { items: Vec::new() },
        Some(Meta::empty()),
    )))
}
