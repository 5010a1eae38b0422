//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use azlok_core::OrderStatus;

use crate::backend::InventoryFilter;
use crate::db::DeletionReviewRepository;
use crate::error::Result;
use crate::middleware::RequireSellerAuth;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub seller_name: String,
    pub pending_orders: u64,
    pub low_stock_items: u64,
    pub pending_deletions: i64,
}

/// Display the dashboard with headline counts.
///
/// Backend counts degrade to zero on error; the pending-deletion count is
/// local and failing to read it fails the page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
) -> Result<DashboardTemplate> {
    let pending_orders = match state.api().list_orders(Some(OrderStatus::Pending), 1).await {
        Ok(page) => page.total,
        Err(e) => {
            tracing::warn!("Failed to count pending orders: {e}");
            0
        }
    };

    let low_stock_filter = InventoryFilter {
        low_stock_only: true,
        page: 1,
        ..InventoryFilter::default()
    };
    let low_stock_items = match state.api().list_inventory(&low_stock_filter).await {
        Ok(page) => page.total,
        Err(e) => {
            tracing::warn!("Failed to count low-stock items: {e}");
            0
        }
    };

    let pending_deletions = DeletionReviewRepository::new(state.pool())
        .pending_count()
        .await?;

    Ok(DashboardTemplate {
        title: "Dashboard".to_string(),
        seller_name: seller.display_name,
        pending_orders,
        low_stock_items,
        pending_deletions,
    })
}
