mod common;

use food_delivery_api::{
    domain::search::{PriceRange, ResultKind, SortOption, TypeFilter},
    money::Money,
    services::search_service::SearchQuery,
};

use common::customer;

fn query(text: &str) -> SearchQuery {
    SearchQuery {
        q: text.into(),
        ..SearchQuery::default()
    }
}

#[tokio::test]
async fn chicken_matches_food_only_in_catalog_order() {
    let customer = customer();

    let results = customer.search.search(&query("chicken")).await;
    let names: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["Chicken Joy", "Chicken Inasal Paa", "Chicken Inasal Pecho"]
    );
    assert!(results.iter().all(|result| result.kind == ResultKind::Food));
    assert_eq!(results[0].restaurant.as_deref(), Some("Jollibee"));
}

#[tokio::test]
async fn restaurant_name_match_is_case_insensitive() {
    let customer = customer();

    let results = customer.search.search(&query("JOLLI")).await;

    assert_eq!(results[0].kind, ResultKind::Restaurant);
    assert_eq!(results[0].name, "Jollibee");
}

#[tokio::test]
async fn under100_drops_restaurants_and_pricier_food() {
    let customer = customer();

    let results = customer
        .search
        .search(&SearchQuery {
            q: "j".into(),
            price_range: PriceRange::Under100,
            ..SearchQuery::default()
        })
        .await;

    assert!(!results.is_empty());
    for result in &results {
        assert_eq!(result.kind, ResultKind::Food);
        let price = result.price.expect("food results carry a price");
        assert!(price < Money::from_pesos(100));
    }
}

#[tokio::test]
async fn sorts_by_price_descending() {
    let customer = customer();

    let results = customer
        .search
        .search(&SearchQuery {
            q: "a".into(),
            kind: TypeFilter::Food,
            sort: SortOption::PriceHighLow,
            ..SearchQuery::default()
        })
        .await;

    let prices: Vec<Money> = results.iter().filter_map(|result| result.price).collect();
    assert!(prices.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(prices.first(), Some(&Money::from_pesos(299)));
}

#[tokio::test]
async fn history_is_recent_first_deduped_and_clearable() -> anyhow::Result<()> {
    let customer = customer();

    for text in ["pizza", "chicken", "  ", "pizza"] {
        customer.search.search(&query(text)).await;
    }
    assert_eq!(customer.search.history().await, vec!["pizza", "chicken"]);

    customer.search.clear_history().await?;
    assert!(customer.search.history().await.is_empty());
    Ok(())
}
