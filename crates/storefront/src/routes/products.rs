//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use azlok_core::{CurrencyCode, Price, Slug};

use crate::backend::types::{Product, ProductSort};
use crate::error::{AppError, Result};
use crate::filters;
use crate::seo::{PageMeta, structured_data};
use crate::state::AppState;

use super::Pager;

/// How many related products to show under a product page.
const RELATED_PRODUCT_COUNT: usize = 4;

/// Format a backend decimal amount for display.
pub fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Product card data for listing grids.
///
/// All fields are plain strings; an empty string means the field is absent.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub title: String,
    pub price: String,
    pub compare_at_price: String,
    pub image_url: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.to_string(),
            title: product.title.clone(),
            price: format_price(product.price, product.currency),
            compare_at_price: product
                .compare_at_price
                .map(|p| format_price(p, product.currency))
                .unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
            in_stock: product.in_stock,
        }
    }
}

/// Image display data for the product page gallery.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Full product data for the detail page.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: String,
    pub images: Vec<ImageView>,
    pub category_name: String,
    pub category_slug: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let mut images: Vec<ImageView> = product
            .images
            .iter()
            .map(|img| ImageView {
                url: img.url.clone(),
                alt: img.alt.clone().unwrap_or_else(|| product.title.clone()),
            })
            .collect();
        // Fall back to the primary image when the gallery is empty
        if images.is_empty()
            && let Some(url) = &product.image_url
        {
            images.push(ImageView {
                url: url.clone(),
                alt: product.title.clone(),
            });
        }

        Self {
            id: product.id.to_string(),
            slug: product.slug.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_price(product.price, product.currency),
            compare_at_price: product
                .compare_at_price
                .map(|p| format_price(p, product.currency))
                .unwrap_or_default(),
            images,
            category_name: product
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            category_slug: product
                .category
                .as_ref()
                .map(|c| c.slug.to_string())
                .unwrap_or_default(),
            in_stock: product.in_stock,
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub sort: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub meta: PageMeta,
    pub products: Vec<ProductCardView>,
    pub pager: Pager,
    pub sort: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub meta: PageMeta,
    pub product: ProductDetailView,
    pub related: Vec<ProductCardView>,
    pub product_json: String,
    pub breadcrumbs_json: String,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<ProductsIndexTemplate> {
    let page = query.page.unwrap_or(1).max(1);
    let sort = ProductSort::from_query_value(query.sort.as_deref().unwrap_or(""));

    let listing = state.backend().list_products(page, None, sort).await?;

    let products = listing.items.iter().map(ProductCardView::from).collect();
    let pager = Pager::new(listing.page, listing.total_pages());

    // TODO: mark the active sort option as selected in the template

    let base_url = &state.config().base_url;
    Ok(ProductsIndexTemplate {
        meta: PageMeta::page(
            "All Products",
            "Browse the full Azlok catalog.",
            format!("{base_url}/products"),
        ),
        products,
        pager,
        sort: sort.as_query_value().to_string(),
    })
}

/// Display product detail page.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    // Reject junk before it reaches the backend
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("product {slug}")))?;

    let product = state.backend().get_product_by_slug(&slug).await?;

    let related = related_products(&state, &product).await;

    let base_url = &state.config().base_url;
    let product_json =
        structured_data::to_script_content(&structured_data::product(&product, base_url));

    let mut crumbs = vec![("Home".to_string(), base_url.to_string())];
    if let Some(category) = &product.category {
        crumbs.push((
            category.name.clone(),
            format!("{base_url}/categories/{}", category.slug),
        ));
    }
    crumbs.push((
        product.title.clone(),
        format!("{base_url}/products/{}", product.slug),
    ));
    let breadcrumbs_json =
        structured_data::to_script_content(&structured_data::breadcrumbs(&crumbs));

    Ok(ProductShowTemplate {
        meta: PageMeta::product(&product, base_url),
        product: ProductDetailView::from(&product),
        related,
        product_json,
        breadcrumbs_json,
    })
}

/// Fetch products from the same category, excluding the product itself.
///
/// Failures degrade to an empty strip rather than failing the page.
async fn related_products(state: &AppState, product: &Product) -> Vec<ProductCardView> {
    let Some(category) = &product.category else {
        return Vec::new();
    };

    match state
        .backend()
        .list_products(1, Some(&category.slug), ProductSort::Newest)
        .await
    {
        Ok(listing) => listing
            .items
            .iter()
            .filter(|p| p.id != product.id)
            .take(RELATED_PRODUCT_COUNT)
            .map(ProductCardView::from)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch related products: {e}");
            Vec::new()
        }
    }
}
