//! Platform API key HTTP handlers.
//!
//! - POST /api/generate-api-key - Issue a new key, replacing the previous one

use crate::{
    app::AppState, error::AppError, middleware::auth::AuthContext,
    models::profile::ApiKeyResponse, services::api_key_service,
};
use axum::{Extension, Json, extract::State};

/// Generate a new API key for the caller.
///
/// # Endpoint
///
/// `POST /api/generate-api-key` (no body)
///
/// # Entitlement
///
/// Only users on the pro tier or with the membership flag may generate keys.
/// Each call overwrites the stored key; the previous key stops being valid.
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "apiKey": "ptp_..."}`
/// - **Error (401)**: No valid session
/// - **Error (403)**: Not entitled
/// - **Error (500)**: Database or random source failure
pub async fn generate_api_key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ApiKeyResponse>, AppError> {
    let api_key = api_key_service::issue_api_key(state.profiles.as_ref(), auth.user_id).await?;

    Ok(Json(ApiKeyResponse {
        success: true,
        api_key,
    }))
}
