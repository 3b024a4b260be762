//! Research job HTTP handlers.
//!
//! - GET /api/research/status?job_id=<uuid> - Poll progress of one of the caller's jobs

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::research_job::{JobStatusQuery, JobStatusResponse},
};
use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
};
use uuid::Uuid;

/// Get the status of a research job.
///
/// # Security
///
/// The lookup filters by BOTH job id AND the caller's user id, so a job
/// owned by someone else is reported exactly like a missing one (404).
///
/// # Response
///
/// - **Success (200 OK)**: status fields of the job
/// - **Error (400)**: `job_id` missing or blank
/// - **Error (401)**: No valid session
/// - **Error (404)**: No such job for this user (including ids that are not UUIDs)
/// - **Error (500)**: Database error
pub async fn get_job_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    query: Result<Query<JobStatusQuery>, QueryRejection>,
) -> Result<Json<JobStatusResponse>, AppError> {
    let Query(query) =
        query.map_err(|rejection| AppError::Internal(format!("unreadable query: {rejection}")))?;

    let job_id = query
        .job_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::MissingFields(vec!["job_id"]))?;

    // A malformed id cannot match any row
    let job_id = Uuid::parse_str(job_id).map_err(|_| AppError::NotFound("Job"))?;

    let job = state
        .jobs
        .find_for_user(job_id, auth.user_id)
        .await?
        .ok_or(AppError::NotFound("Job"))?;

    Ok(Json(JobStatusResponse { success: true, job }))
}
