use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    domain::{order::OrderType, report::{SalesReport, Timeframe}},
    models::{Merchant, MerchantOrder, MerchantOrderItem, MerchantProduct},
    money::Money,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterMerchantRequest {
    pub business_name: String,
    pub business_type: String,
    pub address: String,
    pub phone: String,
    pub logo: Option<String>,
}

/// The role in the caller's old token is stale after registering, so a fresh
/// token is issued.
#[derive(Debug, Serialize, ToSchema)]
pub struct MerchantRegistered {
    pub merchant: Merchant,
    pub token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

fn available() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<MerchantProduct>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMerchantOrderRequest {
    pub merchant_id: Uuid,
    /// Customer-side order number, when the order mirrors a checkout.
    pub order_number: Option<String>,
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderStatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    #[serde(default)]
    #[param(value_type = Option<Timeframe>)]
    pub timeframe: Timeframe,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchantOrderWithItems {
    pub order: MerchantOrder,
    pub items: Vec<MerchantOrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchantOrderList {
    pub items: Vec<MerchantOrderWithItems>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportList {
    pub timeframe: Timeframe,
    pub reports: Vec<SalesReport>,
}
