//! Side-effect free price computation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{cart::CartLineItem, catalog::OptionGroup, order::OrderType},
    money::Money,
};

/// Base price plus the price of each selected option. Each name resolves to the
/// first matching option, groups in catalog order then items in group order.
/// Names with no match add nothing.
pub fn line_item_unit_price(
    base_price: Money,
    option_groups: &[OptionGroup],
    selected_options: &[String],
) -> Money {
    let add_ons: Money = selected_options
        .iter()
        .filter_map(|selected| {
            option_groups
                .iter()
                .flat_map(|group| group.items.iter())
                .find(|option| &option.name == selected)
                .map(|option| option.price)
        })
        .sum();
    base_price + add_ons
}

pub fn cart_subtotal(items: &[CartLineItem]) -> Money {
    items.iter().map(CartLineItem::line_total).sum()
}

pub fn delivery_fee(order_type: OrderType, configured_fee: Money) -> Money {
    match order_type {
        OrderType::Delivery => configured_fee,
        OrderType::Pickup => Money::ZERO,
    }
}

pub fn order_total(subtotal: Money, delivery_fee: Money) -> Money {
    subtotal + delivery_fee
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

pub fn quote(items: &[CartLineItem], order_type: OrderType, configured_fee: Money) -> PriceBreakdown {
    let subtotal = cart_subtotal(items);
    let delivery_fee = delivery_fee(order_type, configured_fee);
    PriceBreakdown {
        subtotal,
        delivery_fee,
        total: order_total(subtotal, delivery_fee),
    }
}
