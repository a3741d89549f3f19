//! Authenticated identity context.
//!
//! Token issuance and verification happen upstream; by the time a request
//! reaches this service, the gateway has already validated the credential
//! and forwarded the authenticated principal in trusted headers. This crate
//! turns those headers into an [`Identity`] value that is threaded
//! explicitly into every store call — there is no ambient auth state.
//!
//! Handlers that take an `Identity` parameter reject unauthenticated
//! requests with `401` before any of their own logic runs.

use axum::{extract::FromRequestParts, http::request::Parts};

use shelfmark_http::error::AppError;

/// Header carrying the authenticated user's opaque id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's display name.
pub const USERNAME_HEADER: &str = "x-username";

/// The authenticated principal for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

fn trusted_header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = trusted_header(parts, USER_ID_HEADER);
        let username = trusted_header(parts, USERNAME_HEADER);

        match (user_id, username) {
            (Some(user_id), Some(username)) => Ok(Identity { user_id, username }),
            _ => {
                tracing::debug!("request rejected: missing authenticated identity");
                Err(AppError::unauthorized("authentication required"))
            }
        }
    }
}
