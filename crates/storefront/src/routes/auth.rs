//! Authentication route handlers (login, register, logout).

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

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::seo::PageMeta;
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

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub meta: PageMeta,
    pub error: String,
    pub email: String,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub meta: PageMeta,
    pub error: String,
    pub email: String,
    pub full_name: String,
}

fn login_meta(state: &AppState) -> PageMeta {
    let base_url = &state.config().base_url;
    PageMeta::page(
        "Sign In",
        "Sign in to your Azlok account.",
        format!("{base_url}/auth/login"),
    )
}

fn register_meta(state: &AppState) -> PageMeta {
    let base_url = &state.config().base_url;
    PageMeta::page(
        "Create Account",
        "Create your Azlok account.",
        format!("{base_url}/auth/register"),
    )
}

/// Display the login page.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> LoginTemplate {
    LoginTemplate {
        meta: login_meta(&state),
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
        Ok(user) => {
            // New session ID on privilege change
            if let Err(e) = session.cycle_id().await {
                tracing::error!("Failed to cycle session ID on login: {e}");
            }

            let current = CurrentUser {
                id: user.id,
                email: user.email.clone(),
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to store user in session: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    LoginTemplate {
                        meta: login_meta(&state),
                        error: "Something went wrong, please try again".to_string(),
                        email: form.email,
                    },
                )
                    .into_response();
            }

            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User logged in");
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::debug!("Login failed: {e}");
            (
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    meta: login_meta(&state),
                    error: "Invalid email or password".to_string(),
                    email: form.email,
                },
            )
                .into_response()
        }
    }
}

/// Display the registration page.
#[instrument(skip(state))]
pub async fn register_page(State(state): State<AppState>) -> RegisterTemplate {
    RegisterTemplate {
        meta: register_meta(&state),
        error: String::new(),
        email: String::new(),
        full_name: String::new(),
    }
}

/// Handle a registration attempt.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let full_name = form.full_name.trim();
    let full_name = (!full_name.is_empty()).then_some(full_name);

    match auth::register(state.pool(), &form.email, full_name, &form.password).await {
        Ok(user) => {
            if let Err(e) = session.cycle_id().await {
                tracing::error!("Failed to cycle session ID on registration: {e}");
            }

            let current = CurrentUser {
                id: user.id,
                email: user.email.clone(),
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to store user in session: {e}");
            }

            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User registered");
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            // Validation errors are shown verbatim; they are user-facing
            let message = match &e {
                auth::AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                auth::AuthError::InvalidEmail(_) => "Please enter a valid email".to_string(),
                auth::AuthError::WeakPassword(msg) => msg.clone(),
                _ => {
                    tracing::error!("Registration failed: {e}");
                    "Something went wrong, please try again".to_string()
                }
            };

            (
                StatusCode::BAD_REQUEST,
                RegisterTemplate {
                    meta: register_meta(&state),
                    error: message,
                    email: form.email,
                    full_name: form.full_name,
                },
            )
                .into_response()
        }
    }
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session on logout: {e}");
    }
    clear_sentry_user();
    Redirect::to("/")
}
