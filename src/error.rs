//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Message returned to clients for every 500 response.
///
/// Backend error text is logged, never returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Unauthenticated**: No session could be resolved
/// - **Invalid input**: Required fields or parameters are missing
/// - **Unauthorized action**: Authenticated user lacks the entitlement
/// - **Not found**: Referenced record is absent or owned by someone else
/// - **External failure**: Any sqlx::Error from database operations
/// - **Unexpected failure**: Anything else (RNG failure, malformed body, panic)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500 with a generic message. The wrapped error is logged.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No session token was presented, or it did not resolve to a user.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// One or more required fields are missing or empty.
    ///
    /// Returns HTTP 400 Bad Request naming every missing field.
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The user is authenticated but not entitled to the action.
    ///
    /// Returns HTTP 403 Forbidden with the explanation.
    #[error("{0}")]
    Forbidden(String),

    /// The record does not exist or does not belong to the caller.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The path exists but does not accept the request method.
    ///
    /// Returns HTTP 405 Method Not Allowed.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Any other failure while handling the request.
    ///
    /// Returns HTTP 500 with a generic message. The detail is logged.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// Every error uses the same envelope:
/// ```json
/// {
///   "success": false,
///   "error": "Human-readable error message"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `MissingFields` → 400 Bad Request
/// - `Forbidden` → 403 Forbidden
/// - `NotFound` → 404 Not Found
/// - `MethodNotAllowed` → 405 Method Not Allowed
/// - `Database`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::MissingFields(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Forbidden(ref reason) => (StatusCode::FORBIDDEN, reason.clone()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Internal(ref detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_fields_are_listed_in_order() {
        let response =
            AppError::MissingFields(vec!["highlevel_api_key", "highlevel_location_id"])
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "Missing required field(s): highlevel_api_key, highlevel_location_id"
        );
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_backend_text() {
        let err = sqlx::Error::Protocol("relation \"profiles\" does not exist".into());
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("profiles"));
    }

    #[tokio::test]
    async fn not_found_names_the_record() {
        let response = AppError::NotFound("Job").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Job not found");
    }
}
