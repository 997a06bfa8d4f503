//! Session resolution for every proxied request.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use portal_core::session::Session;

use crate::auth::token::validate_token;
use crate::state::AppState;

/// Cookie the frontend stores the identity-provider token in.
pub const SESSION_COOKIE: &str = "session-token";

/// The caller's session, anonymous when no valid token was presented.
///
/// Resolution never fails: a missing, malformed or expired token simply
/// yields [`Session::anonymous`]. Routes that need a signed-in user check
/// [`Session::is_authenticated`] themselves.
///
/// ```ignore
/// async fn my_handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     tracing::info!(authenticated = session.is_authenticated(), "handling request");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(CurrentSession(Session::anonymous()));
        };

        match validate_token(&token, &state.config.auth) {
            Ok(claims) => Ok(CurrentSession(claims.into_session(token))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                Ok(CurrentSession(Session::anonymous()))
            }
        }
    }
}

/// Token from `Authorization: Bearer`, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    from_header
        .map(str::to_string)
        .or_else(|| cookie_value(headers, SESSION_COOKIE))
}

/// Look up a cookie by name across every `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == name && !v.is_empty())
        .map(|(_, v)| v.to_string())
}
