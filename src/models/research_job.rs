//! Research job status model.
//!
//! Jobs are created and advanced by the research worker; this service only
//! reports their progress back to the owner.

use serde::{Deserialize, Serialize};

/// Status columns of a `research_jobs` row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ResearchJobStatus {
    /// Lifecycle label, e.g. "pending", "running", "completed", "failed"
    pub status: String,

    pub total_records: i32,
    pub records_completed: i32,
    pub records_found: i32,

    /// Set by the worker when the job failed
    pub error_message: Option<String>,
}

/// Query string for `GET /api/research/status`.
#[derive(Debug, Deserialize)]
pub struct JobStatusQuery {
    pub job_id: Option<String>,
}

/// Response body for the job status endpoint.
///
/// ```json
/// {
///   "success": true,
///   "status": "running",
///   "total_records": 120,
///   "records_completed": 45,
///   "records_found": 31,
///   "error_message": null
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub success: bool,

    #[serde(flatten)]
    pub job: ResearchJobStatus,
}
