//! Account API routes (deletion-request workflow, JSON surface).

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{DeletionRequestRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::deletion_request::DeletionRequest;
use crate::services::auth;
use crate::state::AppState;

/// Request body for submitting a deletion request.
#[derive(Debug, Deserialize)]
pub struct DeletionRequestBody {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub reason: String,
}

/// Deletion request as returned by the API.
#[derive(Debug, Serialize)]
pub struct DeletionRequestView {
    pub id: i32,
    pub status: String,
    pub reason: Option<String>,
    pub requested_at: String,
    pub resolved_at: Option<String>,
}

impl From<&DeletionRequest> for DeletionRequestView {
    fn from(request: &DeletionRequest) -> Self {
        Self {
            id: request.id.as_i32(),
            status: request.status.as_str().to_string(),
            reason: request.reason.clone(),
            requested_at: request.requested_at.to_rfc3339(),
            resolved_at: request.resolved_at.map(|ts| ts.to_rfc3339()),
        }
    }
}

/// `GET /api/account/deletion-request` - latest request status.
#[instrument(skip(state))]
pub async fn deletion_request_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Option<DeletionRequestView>>> {
    let request = DeletionRequestRepository::new(state.pool())
        .latest_for_user(user.id)
        .await?;

    Ok(Json(request.as_ref().map(DeletionRequestView::from)))
}

/// `POST /api/account/deletion-request` - submit a deletion request.
///
/// Missing password: 400. Wrong password: 401. Existing pending request:
/// 409. Success: 201 with the created request.
#[instrument(skip(state, body))]
pub async fn submit_deletion_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<DeletionRequestBody>,
) -> Result<Response> {
    if body.password.is_empty() {
        return Err(AppError::BadRequest("password is required".to_string()));
    }

    if let Err(e) = auth::recheck_password(state.pool(), user.id, &body.password).await {
        tracing::debug!("Deletion request password recheck failed: {e}");
        return Err(AppError::Unauthorized("incorrect password".to_string()));
    }

    let reason = body.reason.trim();
    let reason = (!reason.is_empty()).then_some(reason);

    match DeletionRequestRepository::new(state.pool())
        .create(user.id, reason)
        .await
    {
        Ok(request) => {
            tracing::info!(
                user_id = %user.id,
                request_id = %request.id,
                "Account deletion requested via API"
            );
            Ok((
                StatusCode::CREATED,
                Json(DeletionRequestView::from(&request)),
            )
                .into_response())
        }
        Err(RepositoryError::Conflict(_)) => Err(AppError::Conflict(
            "a pending deletion request already exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
