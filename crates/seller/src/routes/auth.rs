//! Seller authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{clear_current_seller, set_current_seller};
use crate::models::CurrentSeller;
use crate::services::auth;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub error: String,
    pub email: String,
}

/// Display the login page.
#[instrument]
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        title: "Sign In".to_string(),
        error: String::new(),
        email: String::new(),
    }
}

/// Handle a login attempt.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match auth::login(state.pool(), &form.email, &form.password).await {
        Ok(seller) => {
            if let Err(e) = session.cycle_id().await {
                tracing::error!("Failed to cycle session ID on login: {e}");
            }

            let current = CurrentSeller {
                id: seller.id,
                email: seller.email.clone(),
                display_name: seller.display_name.clone(),
            };
            if let Err(e) = set_current_seller(&session, &current).await {
                tracing::error!("Failed to store seller in session: {e}");
            }

            tracing::info!(seller_id = %seller.id, "Seller logged in");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::debug!("Seller login failed: {e}");
            (
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    title: "Sign In".to_string(),
                    error: "Invalid email or password".to_string(),
                    email: form.email,
                },
            )
                .into_response()
        }
    }
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_seller(&session).await {
        tracing::error!("Failed to clear session on logout: {e}");
    }
    Redirect::to("/auth/login")
}
