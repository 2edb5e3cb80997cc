//! Static shop and product data the customer app browses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: Money,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub delivery_time: String,
    pub description: String,
    #[serde(default)]
    pub special_offers: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    /// Kilometres from the customer.
    pub distance: Option<f64>,
    /// 0-100.
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub name: String,
    pub price: Money,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroup {
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<OptionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub base_price: Money,
    pub description: String,
    pub restaurant: String,
    #[serde(default)]
    pub options: Vec<OptionGroup>,
}

impl Product {
    /// First option with this name, walking groups then items in order.
    pub fn find_option(&self, name: &str) -> Option<&OptionItem> {
        self.options
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|item| item.name == name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Catalog {
    pub shops: Vec<Shop>,
    pub products: Vec<Product>,
}

/// Lower-cases a display name and joins its words with `-`.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Line/product id used by the shop quick-add button: `shopId-slug(name)`.
pub fn menu_item_id(shop_id: &str, item_name: &str) -> String {
    format!("{shop_id}-{}", slug(item_name))
}

impl Catalog {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn shop(&self, id: &str) -> Option<&Shop> {
        self.shops.iter().find(|shop| shop.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn menu_item(&self, shop_id: &str, item_name: &str) -> Option<(&Shop, &MenuItem)> {
        let shop = self.shop(shop_id)?;
        let item = shop.menu.iter().find(|item| item.name == item_name)?;
        Some((shop, item))
    }

    /// The catalog shipped with the app.
    pub fn builtin() -> Self {
        let shops = vec![
            shop(
                "jollibee",
                "Jollibee",
                4.8,
                "20-30 min",
                "The Philippines' largest fast-food chain brand. Bringing great tasting food to the Filipino people for over 40 years.",
                &[
                    "Free Delivery on orders above ₱500",
                    "Get a FREE Peach Mango Pie on orders above ₱1000",
                ],
                &["Chicken Joy", "Burgers", "Spaghetti", "Rice Meals", "Breakfast", "Desserts"],
                vec![
                    menu("Chicken Joy", 8900, "Crispylicious, Juicylicious Chicken Joy"),
                    menu(
                        "Jolly Spaghetti",
                        7900,
                        "Sweet-style spaghetti with ground meat and hotdog",
                    ),
                ],
                0.8,
                95,
            ),
            shop(
                "mcdonalds",
                "McDonald's",
                4.7,
                "15-25 min",
                "Quality food, quick service, and friendly staff - all at McDonald's. Serving happiness to Filipinos since 1981.",
                &["₱50 OFF on orders above ₱500", "Free McFlurry on orders above ₱800"],
                &["Burgers", "Chicken", "Rice Meals", "Breakfast", "Desserts", "Beverages"],
                vec![menu(
                    "Big Mac",
                    16900,
                    "Iconic burger with two all-beef patties",
                )],
                1.2,
                92,
            ),
            shop(
                "greenwich",
                "Greenwich",
                4.6,
                "25-35 min",
                "The Philippines' favorite pizza chain. Best pizza and pasta for sharing with family and friends.",
                &["20% OFF on all Pizzas every Monday", "Free Lasagna on orders above ₱1000"],
                &["Pizza", "Pasta", "Chicken", "Rice Meals", "Appetizers", "Beverages"],
                vec![
                    menu(
                        "Hawaiian Overload",
                        29900,
                        "Pizza loaded with ham, pineapple, and cheese",
                    ),
                    menu("Lasagna Supreme", 12900, "Rich and creamy lasagna with meat sauce"),
                ],
                1.5,
                88,
            ),
            shop(
                "manginasal",
                "Mang Inasal",
                4.5,
                "20-30 min",
                "Home of the best-tasting chicken inasal. Filipino favorite with unlimited rice.",
                &["Extra Unlimited Rice on all Chicken Meals", "Free Soup with every order"],
                &["Chicken Inasal", "Paa", "Pecho", "Rice Meals", "Soups", "Beverages"],
                vec![
                    menu(
                        "Chicken Inasal Paa",
                        12900,
                        "Grilled chicken leg quarter with unlimited rice",
                    ),
                    menu(
                        "Chicken Inasal Pecho",
                        13900,
                        "Grilled chicken breast with unlimited rice",
                    ),
                ],
                2.1,
                85,
            ),
        ];

        let add_ons = "Optional Add-ons";
        let products = vec![
            product(
                &shops[0],
                "Chicken Joy",
                vec![group(add_ons, &[("Extra Rice", 3500), ("Gravy", 1500)])],
            ),
            product(
                &shops[0],
                "Jolly Spaghetti",
                vec![group(add_ons, &[("Extra Cheese", 2000)])],
            ),
            product(
                &shops[1],
                "Big Mac",
                vec![group(add_ons, &[("Extra Cheese", 2500), ("Large Fries", 6500)])],
            ),
            product(
                &shops[2],
                "Hawaiian Overload",
                vec![
                    group("Size Options", &[("Large Size", 15000)]),
                    group("Extra Toppings", &[("Extra Cheese", 5000), ("Extra Ham", 4500)]),
                ],
            ),
            product(
                &shops[2],
                "Lasagna Supreme",
                vec![group(add_ons, &[("Extra Cheese", 3500)])],
            ),
            product(
                &shops[3],
                "Chicken Inasal Paa",
                vec![group(
                    add_ons,
                    &[("Extra Chicken Oil", 1500), ("Extra Sauce", 1000)],
                )],
            ),
            product(
                &shops[3],
                "Chicken Inasal Pecho",
                vec![group(
                    add_ons,
                    &[("Extra Chicken Oil", 1500), ("Extra Sauce", 1000)],
                )],
            ),
        ];

        Self { shops, products }
    }
}

#[allow(clippy::too_many_arguments)]
fn shop(
    id: &str,
    name: &str,
    rating: f32,
    delivery_time: &str,
    description: &str,
    special_offers: &[&str],
    categories: &[&str],
    menu: Vec<MenuItem>,
    distance: f64,
    popularity: u32,
) -> Shop {
    Shop {
        id: id.to_string(),
        name: name.to_string(),
        rating,
        delivery_time: delivery_time.to_string(),
        description: description.to_string(),
        special_offers: special_offers.iter().map(|s| s.to_string()).collect(),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        menu,
        distance: Some(distance),
        popularity: Some(popularity),
    }
}

fn menu(name: &str, centavos: i64, description: &str) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        price: Money::from_centavos(centavos),
        description: description.to_string(),
    }
}

fn group(title: &str, items: &[(&str, i64)]) -> OptionGroup {
    OptionGroup {
        title: title.to_string(),
        subtitle: None,
        items: items
            .iter()
            .map(|(name, centavos)| OptionItem {
                name: name.to_string(),
                price: Money::from_centavos(*centavos),
                available: true,
            })
            .collect(),
    }
}

// Products reuse the menu entry's price and description.
fn product(shop: &Shop, name: &str, options: Vec<OptionGroup>) -> Product {
    let (base_price, description) = shop
        .menu
        .iter()
        .find(|item| item.name == name)
        .map(|item| (item.price, item.description.clone()))
        .unwrap_or_default();

    Product {
        id: menu_item_id(&shop.id, name),
        shop_id: shop.id.clone(),
        name: name.to_string(),
        base_price,
        description,
        restaurant: shop.name.clone(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_joins_words_with_dashes() {
        assert_eq!(slug("Chicken Inasal  Paa"), "chicken-inasal-paa");
        assert_eq!(menu_item_id("jollibee", "Chicken Joy"), "jollibee-chicken-joy");
    }

    #[test]
    fn builtin_products_resolve_through_their_shop() {
        let catalog = Catalog::builtin();
        let product = catalog.product("manginasal-chicken-inasal-paa").unwrap();
        assert_eq!(product.restaurant, "Mang Inasal");
        assert_eq!(product.base_price, Money::from_pesos(129));
        assert!(catalog.menu_item("greenwich", "Lasagna Supreme").is_some());
    }
}
