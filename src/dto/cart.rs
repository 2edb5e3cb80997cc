use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::{
        cart::{CartLineItem, SavedItem},
        order::OrderType,
    },
    money::Money,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuickAddRequest {
    pub shop_id: String,
    pub item_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantityChange {
    pub delta: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub item_count: u32,
    pub subtotal: Money,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedList {
    pub items: Vec<SavedItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartCount {
    pub item_count: u32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    #[param(value_type = Option<OrderType>)]
    pub order_type: Option<OrderType>,
}
