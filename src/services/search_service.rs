use std::sync::Arc;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    domain::{
        catalog::Catalog,
        search::{self, PriceRange, SearchResult, SortOption, TypeFilter, record_query},
    },
    error::AppResult,
    store::{KvStore, keys, read_list, write_json},
};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
    #[serde(rename = "type")]
    #[param(value_type = Option<TypeFilter>)]
    pub kind: TypeFilter,
    #[param(value_type = Option<PriceRange>)]
    pub price_range: PriceRange,
    #[param(value_type = Option<SortOption>)]
    pub sort: SortOption,
}

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn KvStore>,
    catalog: Arc<Catalog>,
}

impl SearchService {
    pub fn new(store: Arc<dyn KvStore>, catalog: Arc<Catalog>) -> Self {
        Self { store, catalog }
    }

    /// Runs the query against the catalog and remembers non-blank queries.
    /// Losing a history entry does not fail the search.
    pub async fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let text = query.q.trim();
        if !text.is_empty() {
            let history = record_query(self.history().await, text);
            if let Err(err) = write_json(self.store.as_ref(), keys::SEARCH_HISTORY, &history).await {
                tracing::warn!(error = %err, "could not record search history");
            }
        }

        let results = search::search(&self.catalog, text);
        let results = search::filter(results, query.kind, query.price_range);
        search::sort(results, query.sort)
    }

    /// Most recent first.
    pub async fn history(&self) -> Vec<String> {
        read_list(self.store.as_ref(), keys::SEARCH_HISTORY).await
    }

    pub async fn clear_history(&self) -> AppResult<()> {
        self.store.remove(keys::SEARCH_HISTORY).await?;
        Ok(())
    }
}
