//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use azlok_core::Slug;

use crate::backend::types::{Category, ProductSort};
use crate::error::{AppError, Result};
use crate::filters;
use crate::seo::{PageMeta, structured_data};
use crate::state::AppState;

use super::Pager;
use super::products::{PaginationQuery, ProductCardView};

/// Category card data for the category index.
#[derive(Debug, Clone)]
pub struct CategoryCardView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub product_count: i64,
}

impl From<&Category> for CategoryCardView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.to_string(),
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            product_count: category.product_count,
        }
    }
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub meta: PageMeta,
    pub categories: Vec<CategoryCardView>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub meta: PageMeta,
    pub category: CategoryCardView,
    pub products: Vec<ProductCardView>,
    pub pager: Pager,
    pub breadcrumbs_json: String,
}

/// Display category listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<CategoriesIndexTemplate> {
    let categories = state.backend().list_categories().await?;

    let base_url = &state.config().base_url;
    Ok(CategoriesIndexTemplate {
        meta: PageMeta::page(
            "Categories",
            "Shop by category on Azlok.",
            format!("{base_url}/categories"),
        ),
        categories: categories.iter().map(CategoryCardView::from).collect(),
    })
}

/// Display category detail page with its products.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<CategoryShowTemplate> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("category {slug}")))?;

    let category = state.backend().get_category_by_slug(&slug).await?;

    let page = query.page.unwrap_or(1).max(1);
    let sort = ProductSort::from_query_value(query.sort.as_deref().unwrap_or(""));
    let listing = state
        .backend()
        .list_products(page, Some(&category.slug), sort)
        .await?;

    let base_url = &state.config().base_url;
    let crumbs = vec![
        ("Home".to_string(), base_url.to_string()),
        (
            category.name.clone(),
            format!("{base_url}/categories/{}", category.slug),
        ),
    ];
    let breadcrumbs_json =
        structured_data::to_script_content(&structured_data::breadcrumbs(&crumbs));

    Ok(CategoryShowTemplate {
        meta: PageMeta::category(&category, base_url),
        category: CategoryCardView::from(&category),
        products: listing.items.iter().map(ProductCardView::from).collect(),
        pager: Pager::new(listing.page, listing.total_pages()),
        breadcrumbs_json,
    })
}
