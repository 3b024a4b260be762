//! Session authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the session token from the Authorization header or the session cookie
//! 2. Hash it and look up an unexpired session for it
//! 3. Inject the resolved user identity into the request
//! 4. Reject unauthenticated requests with HTTP 401 before any handler runs

use crate::{app::AppState, error::AppError};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "session";

/// Authentication context attached to authenticated requests.
///
/// Handlers extract this with `Extension<AuthContext>` and use `user_id` to
/// scope every query to the caller.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
}

/// Session authentication middleware function.
///
/// # Flow
///
/// 1. Take the token from `Authorization: Bearer <token>`, falling back to
///    the `session` cookie
/// 2. Hash the token using SHA-256
/// 3. Query for an unexpired session with that hash
/// 4. If found: inject `AuthContext` into request, call next handler
/// 5. If not found: return 401 Unauthorized error
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::Unauthorized)` if no session resolves (returns 401)
/// - `Err(AppError::Database)` if the session lookup itself fails (returns 500)
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token_hash = session_token(request.headers(), &jar)
        .map(hash_session_token)
        .ok_or_else(|| {
            tracing::debug!("request without session token");
            AppError::Unauthorized
        })?;

    let user_id = state
        .sessions
        .find_active_user(&token_hash)
        .await?
        .ok_or_else(|| {
            tracing::debug!("session token did not resolve to a user");
            AppError::Unauthorized
        })?;

    // Route handlers can now extract this using Extension<AuthContext>
    request.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(request).await)
}

/// Find the raw session token on the request.
///
/// A bearer token wins over the cookie when both are present. The cookie
/// value is percent-decoded by `CookieJar`; surrounding quotes are dropped.
/// Empty values count as absent.
fn session_token<'a>(headers: &'a HeaderMap, jar: &'a CookieJar) -> Option<&'a str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value_trimmed().trim())
            .filter(|t| !t.is_empty())
    })
}

/// SHA-256 hex digest of a session token, as stored in `user_sessions.token_hash`.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
