//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::seo::{PageMeta, structured_data};
use crate::state::AppState;

use super::categories::CategoryCardView;
use super::products::ProductCardView;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub meta: PageMeta,
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<CategoryCardView>,
    pub organization_json: String,
    pub website_json: String,
}

/// Display the home page.
///
/// Catalog fetch failures degrade to empty sections; the home page always
/// renders.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let featured = match state.backend().featured_products().await {
        Ok(products) => products.iter().map(ProductCardView::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch featured products: {e}");
            Vec::new()
        }
    };

    let categories = match state.backend().list_categories().await {
        Ok(categories) => categories.iter().map(CategoryCardView::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        }
    };

    let base_url = &state.config().base_url;
    HomeTemplate {
        meta: PageMeta::home(base_url),
        featured,
        categories,
        organization_json: structured_data::to_script_content(&structured_data::organization(
            base_url,
        )),
        website_json: structured_data::to_script_content(&structured_data::website(base_url)),
    }
}
