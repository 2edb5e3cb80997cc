use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::money::Money;

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One product entry in the cart. `price` is the unit price with the selected
/// options already folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub restaurant: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Applies `delta`, clamped to `1..=MAX_LINE_QUANTITY`.
    pub fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_LINE_QUANTITY));
        self.quantity = u32::try_from(next).unwrap_or(MAX_LINE_QUANTITY);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    #[serde(flatten)]
    pub item: CartLineItem,
    pub saved_at: DateTime<Utc>,
}

impl SavedItem {
    pub fn new(item: CartLineItem) -> Self {
        Self {
            item,
            saved_at: Utc::now(),
        }
    }

    /// The cart line restored by "move to cart". Quantity always restarts at one.
    pub fn restore(self) -> CartLineItem {
        CartLineItem {
            quantity: 1,
            ..self.item
        }
    }
}

/// Sum of quantities; what the cart badge shows.
pub fn item_count(items: &[CartLineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |count, item| count.saturating_add(item.quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32) -> CartLineItem {
        CartLineItem {
            id: "jollibee-chicken-joy".into(),
            product_id: "jollibee-chicken-joy".into(),
            name: "Chicken Joy".into(),
            price: Money::from_pesos(89),
            quantity,
            restaurant: "Jollibee".into(),
            selected_options: vec![],
        }
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut item = line(2);
        for delta in [-1, -1, -1, -5, 3, -10] {
            item.adjust_quantity(delta);
            assert!(item.quantity >= 1);
        }
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn quantity_is_capped_and_count_saturates() {
        let mut item = line(1);
        item.adjust_quantity(i64::MAX);
        assert_eq!(item.quantity, MAX_LINE_QUANTITY);
        item.adjust_quantity(i64::MIN);
        assert_eq!(item.quantity, 1);

        let stored = vec![line(u32::MAX), line(u32::MAX)];
        assert_eq!(item_count(&stored), u32::MAX);
    }

    #[test]
    fn restore_resets_quantity() {
        let restored = SavedItem::new(line(4)).restore();
        assert_eq!(restored.quantity, 1);
        assert_eq!(restored.price, Money::from_pesos(89));
    }

    #[test]
    fn saved_item_flattens_line_fields() {
        let json = serde_json::to_value(SavedItem::new(line(1))).unwrap();
        assert_eq!(json["name"], "Chicken Joy");
        assert!(json.get("savedAt").is_some());
    }
}
