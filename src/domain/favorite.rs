use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::cart::CartLineItem;
use crate::money::Money;

/// Snapshot of a product the customer starred. Price is frozen at the time
/// it was favorited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub restaurant: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FavoriteItem {
    /// A single-quantity cart line whose id is the favorite's id, so repeated
    /// adds merge into one line.
    pub fn to_line_item(&self) -> CartLineItem {
        CartLineItem {
            id: self.id.clone(),
            product_id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity: 1,
            restaurant: self.restaurant.clone(),
            selected_options: Vec::new(),
        }
    }
}
