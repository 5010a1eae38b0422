//! Search route handlers.
//!
//! Search is a passthrough to the backend search endpoint; no index lives
//! in this process.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::backend::types::SearchFilters;
use crate::error::Result;
use crate::filters;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::Pager;
use super::products::ProductCardView;

/// Deserialize empty strings as None for optional price fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    /// Min price filter (rupees)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Decimal>,
    /// Max price filter (rupees)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Decimal>,
    /// Availability filter: "1" for in-stock only
    pub in_stock: Option<String>,
}

impl SearchQuery {
    fn into_filters(self) -> SearchFilters {
        SearchFilters {
            query: self.q.trim().to_string(),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock_only: self.in_stock.as_deref() == Some("1"),
            page: self.page.unwrap_or(1).max(1),
        }
    }
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search/results.html")]
pub struct SearchResultsTemplate {
    pub meta: PageMeta,
    pub query: String,
    pub products: Vec<ProductCardView>,
    pub total: u64,
    pub pager: Pager,
    pub searched: bool,
}

/// Display search results.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<SearchResultsTemplate> {
    let filters = query.into_filters();
    let base_url = &state.config().base_url;

    let meta = PageMeta::page(
        "Search",
        "Search the Azlok catalog.",
        format!("{base_url}/search"),
    );

    // An empty query renders the search form without hitting the backend
    if filters.query.is_empty() {
        return Ok(SearchResultsTemplate {
            meta,
            query: String::new(),
            products: Vec::new(),
            total: 0,
            pager: Pager::new(1, 1),
            searched: false,
        });
    }

    let results = state.backend().search_products(&filters).await?;

    Ok(SearchResultsTemplate {
        meta,
        query: filters.query,
        products: results.items.iter().map(ProductCardView::from).collect(),
        total: results.total,
        pager: Pager::new(results.page, results.total_pages()),
        searched: true,
    })
}
