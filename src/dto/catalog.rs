use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{catalog::{Product, Shop}, search::SearchResult},
    money::Money,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopList {
    pub items: Vec<Shop>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopDetail {
    pub shop: Shop,
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuoteRequest {
    #[serde(default)]
    pub selected_options: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductQuote {
    pub product_id: String,
    pub unit_price: Money,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchHistory {
    pub items: Vec<String>,
}
