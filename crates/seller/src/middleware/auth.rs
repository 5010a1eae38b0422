//! Seller authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentSeller, session_keys};

/// Extractor that requires a logged-in seller.
///
/// Every dashboard route takes this; unauthenticated requests are
/// redirected to the login page.
pub struct RequireSellerAuth(pub CurrentSeller);

/// Rejection that redirects to the login page.
pub struct SellerAuthRejection;

impl IntoResponse for SellerAuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/auth/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireSellerAuth
where
    S: Send + Sync,
{
    type Rejection = SellerAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(SellerAuthRejection)?;

        let seller: CurrentSeller = session
            .get(session_keys::CURRENT_SELLER)
            .await
            .ok()
            .flatten()
            .ok_or(SellerAuthRejection)?;

        Ok(Self(seller))
    }
}

/// Helper to set the current seller in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_seller(
    session: &Session,
    seller: &CurrentSeller,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_SELLER, seller).await
}

/// Helper to clear the current seller from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_seller(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentSeller>(session_keys::CURRENT_SELLER)
        .await?;
    Ok(())
}
