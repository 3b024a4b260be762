//! HighLevel integration HTTP handlers.
//!
//! - POST /api/integrations/highlevel - Save the caller's HighLevel credentials

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::{SuccessResponse, profile::SaveHighLevelCredentialsRequest},
};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};

/// Save the HighLevel API key and location id on the caller's profile.
///
/// # Endpoint
///
/// `POST /api/integrations/highlevel`
///
/// # Request Body
///
/// ```json
/// {
///   "highlevel_api_key": "pit-7c2e...",
///   "highlevel_location_id": "ve9EPM428h8vShlRW1KT"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true}`
/// - **Error (400)**: One or both fields missing or blank
/// - **Error (401)**: No valid session
/// - **Error (404)**: Caller has no profile row
/// - **Error (500)**: Malformed body or database error
pub async fn save_highlevel_credentials(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<SaveHighLevelCredentialsRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::Internal(format!("unreadable body: {rejection}")))?;

    // Validation happens before any store call
    let credentials = request.validate()?;

    let updated = state
        .profiles
        .save_highlevel_credentials(auth.user_id, &credentials)
        .await?;

    if !updated {
        return Err(AppError::NotFound("Profile"));
    }

    tracing::info!(user_id = %auth.user_id, "HighLevel credentials saved");
    Ok(Json(SuccessResponse::ok()))
}
