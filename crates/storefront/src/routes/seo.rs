//! SEO artifact route handlers (robots.txt, sitemap.xml).

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::seo::sitemap;
use crate::state::AppState;

/// Serve robots.txt.
#[instrument(skip(state))]
pub async fn robots(State(state): State<AppState>) -> Response {
    let body = sitemap::robots_txt(&state.config().base_url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// Serve sitemap.xml.
///
/// The rendered XML is cached for an hour; a cold cache walks the whole
/// catalog through the backend API.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Response {
    if let Some(xml) = state.backend().cached_sitemap().await {
        return xml_response(xml);
    }

    let products = match state.backend().all_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to fetch products for sitemap: {e}");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let categories = match state.backend().list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to fetch categories for sitemap: {e}");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let xml = sitemap::build_sitemap(&state.config().base_url, &products, &categories);
    state.backend().store_sitemap(xml.clone()).await;

    xml_response(xml)
}

fn xml_response(xml: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response()
}
