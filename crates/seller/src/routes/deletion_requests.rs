//! Account-deletion request review handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use azlok_core::DeletionRequestId;

use crate::db::DeletionReviewRepository;
use crate::error::Result;
use crate::middleware::RequireSellerAuth;
use crate::models::DeletionRequestSummary;
use crate::state::AppState;

/// How many requests the review page shows.
const REVIEW_PAGE_LIMIT: i64 = 100;

/// Date format for the review table.
const DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// Deletion request row for templates.
#[derive(Debug, Clone)]
pub struct RequestRowView {
    pub id: i32,
    pub user_email: String,
    pub reason: String,
    pub status: String,
    pub is_pending: bool,
    pub requested_on: String,
    pub resolved_on: String,
    pub resolved_by: String,
}

impl From<&DeletionRequestSummary> for RequestRowView {
    fn from(request: &DeletionRequestSummary) -> Self {
        Self {
            id: request.id.as_i32(),
            user_email: request.user_email.clone(),
            reason: request.reason.clone().unwrap_or_default(),
            status: request.status.as_str().to_string(),
            is_pending: request.status.is_pending(),
            requested_on: request.requested_at.format(DATE_FORMAT).to_string(),
            resolved_on: request
                .resolved_at
                .map(|ts| ts.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            resolved_by: request.resolved_by.clone().unwrap_or_default(),
        }
    }
}

/// Review page template.
#[derive(Template, WebTemplate)]
#[template(path = "deletion/index.html")]
pub struct DeletionReviewTemplate {
    pub title: String,
    pub seller_name: String,
    pub requests: Vec<RequestRowView>,
    pub pending_count: i64,
}

/// Display the review queue.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
) -> Result<DeletionReviewTemplate> {
    let repo = DeletionReviewRepository::new(state.pool());
    let requests = repo.list(REVIEW_PAGE_LIMIT).await?;
    let pending_count = repo.pending_count().await?;

    Ok(DeletionReviewTemplate {
        title: "Deletion Requests".to_string(),
        seller_name: seller.display_name,
        requests: requests.iter().map(RequestRowView::from).collect(),
        pending_count,
    })
}

/// Approve a pending request.
#[instrument(skip(state), fields(request_id = id))]
pub async fn approve(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let request = DeletionReviewRepository::new(state.pool())
        .resolve(DeletionRequestId::new(id), true, seller.email.as_str())
        .await?;

    tracing::info!(
        request_id = %request.id,
        user_email = %request.user_email,
        resolved_by = %seller.email,
        "Deletion request approved"
    );

    Ok(Redirect::to("/deletion-requests"))
}

/// Reject a pending request.
#[instrument(skip(state), fields(request_id = id))]
pub async fn reject(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let request = DeletionReviewRepository::new(state.pool())
        .resolve(DeletionRequestId::new(id), false, seller.email.as_str())
        .await?;

    tracing::info!(
        request_id = %request.id,
        user_email = %request.user_email,
        resolved_by = %seller.email,
        "Deletion request rejected"
    );

    Ok(Redirect::to("/deletion-requests"))
}
