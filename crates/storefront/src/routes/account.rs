//! Account route handlers (overview, orders, invoices, deletion requests).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use azlok_core::{DeletionRequestStatus, OrderId};

use crate::backend::types::{Invoice, Order};
use crate::db::{DeletionRequestRepository, RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::deletion_request::DeletionRequest;
use crate::seo::PageMeta;
use crate::services::auth;
use crate::state::AppState;

use super::Pager;
use super::products::format_price;

/// Date format used across account pages.
const DATE_FORMAT: &str = "%d %b %Y";

/// Order row data for the order history table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub reference: String,
    pub status: String,
    pub total: String,
    pub placed_on: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            reference: order.reference.clone(),
            status: order.status.label().to_string(),
            total: format_price(order.total, order.currency),
            placed_on: order.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Order line data for the order detail page.
#[derive(Debug, Clone)]
pub struct OrderItemRowView {
    pub title: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// Full order data for the detail page.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub reference: String,
    pub status: String,
    pub items: Vec<OrderItemRowView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub placed_on: String,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            reference: order.reference.clone(),
            status: order.status.label().to_string(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemRowView {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    unit_price: format_price(item.unit_price, order.currency),
                    line_total: format_price(item.line_total, order.currency),
                })
                .collect(),
            subtotal: format_price(order.subtotal, order.currency),
            shipping: format_price(order.shipping, order.currency),
            tax: format_price(order.tax, order.currency),
            total: format_price(order.total, order.currency),
            placed_on: order.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Invoice row data for the invoice table.
#[derive(Debug, Clone)]
pub struct InvoiceRowView {
    pub number: String,
    pub order_id: String,
    pub status: String,
    pub total: String,
    pub issued_on: String,
    pub pdf_url: String,
}

impl From<&Invoice> for InvoiceRowView {
    fn from(invoice: &Invoice) -> Self {
        Self {
            number: invoice.number.clone(),
            order_id: invoice.order_id.to_string(),
            status: format!("{:?}", invoice.status),
            total: format_price(invoice.total, invoice.currency),
            issued_on: invoice
                .issued_at
                .map(|ts| ts.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            pdf_url: invoice.pdf_url.clone().unwrap_or_default(),
        }
    }
}

/// Deletion request state for account pages.
#[derive(Debug, Clone)]
pub struct DeletionStatusView {
    pub exists: bool,
    pub is_pending: bool,
    pub status: String,
    pub requested_on: String,
    pub resolved_on: String,
}

impl DeletionStatusView {
    fn none() -> Self {
        Self {
            exists: false,
            is_pending: false,
            status: String::new(),
            requested_on: String::new(),
            resolved_on: String::new(),
        }
    }
}

impl From<&DeletionRequest> for DeletionStatusView {
    fn from(request: &DeletionRequest) -> Self {
        Self {
            exists: true,
            is_pending: request.status == DeletionRequestStatus::Pending,
            status: request.status.as_str().to_string(),
            requested_on: request.requested_at.format(DATE_FORMAT).to_string(),
            resolved_on: request
                .resolved_at
                .map(|ts| ts.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

/// Pagination query parameters for history pages.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}

/// Deletion request form data.
#[derive(Debug, Deserialize)]
pub struct DeletionForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub reason: String,
}

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub meta: PageMeta,
    pub email: String,
    pub full_name: String,
    pub member_since: String,
    pub deletion: DeletionStatusView,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct AccountOrdersTemplate {
    pub meta: PageMeta,
    pub orders: Vec<OrderRowView>,
    pub pager: Pager,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/order_detail.html")]
pub struct AccountOrderDetailTemplate {
    pub meta: PageMeta,
    pub order: OrderDetailView,
}

/// Invoice list page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/invoices.html")]
pub struct AccountInvoicesTemplate {
    pub meta: PageMeta,
    pub invoices: Vec<InvoiceRowView>,
    pub pager: Pager,
}

/// Deletion request page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/deletion.html")]
pub struct AccountDeletionTemplate {
    pub meta: PageMeta,
    pub deletion: DeletionStatusView,
    pub error: String,
}

fn account_meta(state: &AppState, title: &str, path: &str) -> PageMeta {
    let base_url = &state.config().base_url;
    PageMeta::page(title, "Manage your Azlok account.", format!("{base_url}{path}"))
}

/// Display the account overview.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<AccountIndexTemplate> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("account".to_string()))?;

    let deletion = DeletionRequestRepository::new(state.pool())
        .latest_for_user(current.id)
        .await?
        .as_ref()
        .map_or_else(DeletionStatusView::none, DeletionStatusView::from);

    Ok(AccountIndexTemplate {
        meta: account_meta(&state, "My Account", "/account"),
        email: user.email.to_string(),
        full_name: user.full_name.unwrap_or_default(),
        member_since: user.created_at.format(DATE_FORMAT).to_string(),
        deletion,
    })
}

/// Display order history.
#[instrument(skip(state))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<AccountOrdersTemplate> {
    let page = query.page.unwrap_or(1).max(1);
    let listing = state
        .backend()
        .list_orders(current.email.as_str(), page)
        .await?;

    Ok(AccountOrdersTemplate {
        meta: account_meta(&state, "Order History", "/account/orders"),
        orders: listing.items.iter().map(OrderRowView::from).collect(),
        pager: Pager::new(listing.page, listing.total_pages()),
    })
}

/// Display one order.
#[instrument(skip(state))]
pub async fn order_detail(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<i32>,
) -> Result<AccountOrderDetailTemplate> {
    let order = state
        .backend()
        .get_order(OrderId::new(id), current.email.as_str())
        .await?;

    Ok(AccountOrderDetailTemplate {
        meta: account_meta(&state, "Order Detail", "/account/orders"),
        order: OrderDetailView::from(&order),
    })
}

/// Display invoice history.
#[instrument(skip(state))]
pub async fn invoices(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<AccountInvoicesTemplate> {
    let page = query.page.unwrap_or(1).max(1);
    let listing = state
        .backend()
        .list_invoices(current.email.as_str(), page)
        .await?;

    Ok(AccountInvoicesTemplate {
        meta: account_meta(&state, "Invoices", "/account/invoices"),
        invoices: listing.items.iter().map(InvoiceRowView::from).collect(),
        pager: Pager::new(listing.page, listing.total_pages()),
    })
}

/// Display the deletion request page.
#[instrument(skip(state))]
pub async fn deletion_page(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<AccountDeletionTemplate> {
    let deletion = DeletionRequestRepository::new(state.pool())
        .latest_for_user(current.id)
        .await?
        .as_ref()
        .map_or_else(DeletionStatusView::none, DeletionStatusView::from);

    Ok(AccountDeletionTemplate {
        meta: account_meta(&state, "Delete Account", "/account/deletion"),
        deletion,
        error: String::new(),
    })
}

/// Handle a deletion request submission.
///
/// The user re-enters their password; a missing password is a 400, a wrong
/// one a 401, and a duplicate pending request a 409.
#[instrument(skip(state, form))]
pub async fn submit_deletion(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Form(form): Form<DeletionForm>,
) -> Result<Response> {
    if form.password.is_empty() {
        return rerender_deletion_page(
            &state,
            current.id,
            StatusCode::BAD_REQUEST,
            "Please enter your password to confirm",
        )
        .await;
    }

    if let Err(e) = auth::recheck_password(state.pool(), current.id, &form.password).await {
        tracing::debug!("Deletion request password recheck failed: {e}");
        return rerender_deletion_page(
            &state,
            current.id,
            StatusCode::UNAUTHORIZED,
            "Incorrect password",
        )
        .await;
    }

    let reason = form.reason.trim();
    let reason = (!reason.is_empty()).then_some(reason);

    match DeletionRequestRepository::new(state.pool())
        .create(current.id, reason)
        .await
    {
        Ok(request) => {
            tracing::info!(
                user_id = %current.id,
                request_id = %request.id,
                "Account deletion requested"
            );
            Ok(Redirect::to("/account/deletion").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            rerender_deletion_page(
                &state,
                current.id,
                StatusCode::CONFLICT,
                "A deletion request is already pending",
            )
            .await
        }
        Err(e) => Err(e.into()),
    }
}

/// Re-render the deletion page with an error banner and a non-200 status.
async fn rerender_deletion_page(
    state: &AppState,
    user_id: azlok_core::UserId,
    status: StatusCode,
    error: &str,
) -> Result<Response> {
    let deletion = DeletionRequestRepository::new(state.pool())
        .latest_for_user(user_id)
        .await?
        .as_ref()
        .map_or_else(DeletionStatusView::none, DeletionStatusView::from);

    Ok((
        status,
        AccountDeletionTemplate {
            meta: account_meta(state, "Delete Account", "/account/deletion"),
            deletion,
            error: error.to_string(),
        },
    )
        .into_response())
}
