//! Text search, filtering and sorting over the catalog. Nothing here keeps
//! state; history persistence lives in the search service.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::catalog::{Catalog, menu_item_id},
    money::Money,
};

pub const SEARCH_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Restaurant,
    Food,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub restaurant: Option<String>,
    pub distance: Option<f64>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Restaurant,
    Food,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    #[default]
    All,
    Under100,
    Under200,
    Under300,
    Above300,
}

impl PriceRange {
    fn admits(self, price: Money) -> bool {
        let limit = |pesos| Money::from_pesos(pesos);
        match self {
            PriceRange::All => true,
            PriceRange::Under100 => price < limit(100),
            PriceRange::Under200 => price < limit(200),
            PriceRange::Under300 => price < limit(300),
            PriceRange::Above300 => price >= limit(300),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Relevance,
    PriceLowHigh,
    PriceHighLow,
    Distance,
    Popularity,
}

/// Case-insensitive substring match on shop names, then on each menu item's
/// name and description. Results keep catalog order: a shop hit is followed by
/// that shop's food hits.
pub fn search(catalog: &Catalog, text: &str) -> Vec<SearchResult> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for shop in &catalog.shops {
        if shop.name.to_lowercase().contains(&needle) {
            results.push(SearchResult {
                id: shop.id.clone(),
                kind: ResultKind::Restaurant,
                name: shop.name.clone(),
                description: Some(shop.description.clone()),
                price: None,
                restaurant: None,
                distance: shop.distance,
                popularity: shop.popularity,
            });
        }

        for item in &shop.menu {
            let hit = item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle);
            if hit {
                results.push(SearchResult {
                    id: menu_item_id(&shop.id, &item.name),
                    kind: ResultKind::Food,
                    name: item.name.clone(),
                    description: Some(item.description.clone()),
                    price: Some(item.price),
                    restaurant: Some(shop.name.clone()),
                    distance: shop.distance,
                    popularity: shop.popularity,
                });
            }
        }
    }
    results
}

/// Any price filter other than `All` drops results without a price, which
/// means every restaurant result.
pub fn filter(
    results: Vec<SearchResult>,
    kind: TypeFilter,
    price_range: PriceRange,
) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|result| match kind {
            TypeFilter::All => true,
            TypeFilter::Restaurant => result.kind == ResultKind::Restaurant,
            TypeFilter::Food => result.kind == ResultKind::Food,
        })
        .filter(|result| match (price_range, result.price) {
            (PriceRange::All, _) => true,
            (range, Some(price)) => range.admits(price),
            (_, None) => false,
        })
        .collect()
}

/// Stable sort; missing price, distance and popularity count as zero.
pub fn sort(mut results: Vec<SearchResult>, option: SortOption) -> Vec<SearchResult> {
    let price = |r: &SearchResult| r.price.unwrap_or(Money::ZERO);
    let distance = |r: &SearchResult| r.distance.unwrap_or(0.0);
    let popularity = |r: &SearchResult| r.popularity.unwrap_or(0);

    match option {
        SortOption::Relevance => {}
        SortOption::PriceLowHigh => results.sort_by_key(price),
        SortOption::PriceHighLow => results.sort_by(|a, b| price(b).cmp(&price(a))),
        SortOption::Distance => results.sort_by(|a, b| {
            distance(a)
                .partial_cmp(&distance(b))
                .unwrap_or(Ordering::Equal)
        }),
        SortOption::Popularity => results.sort_by(|a, b| popularity(b).cmp(&popularity(a))),
    }
    results
}

/// New query goes first; an identical earlier entry is dropped; at most
/// [`SEARCH_HISTORY_LIMIT`] entries survive.
pub fn record_query(history: Vec<String>, query: &str) -> Vec<String> {
    std::iter::once(query.to_string())
        .chain(history.into_iter().filter(|entry| entry != query))
        .take(SEARCH_HISTORY_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_dedupes_and_caps() {
        let mut history = Vec::new();
        for n in 0..12 {
            history = record_query(history, &format!("q{n}"));
        }
        history = record_query(history, "q5");
        assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
        assert_eq!(history[0], "q5");
        assert_eq!(history.iter().filter(|q| *q == "q5").count(), 1);
    }

    #[test]
    fn blank_query_finds_nothing() {
        assert!(search(&Catalog::builtin(), "   ").is_empty());
    }
}
