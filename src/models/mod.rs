//! Data models representing database entities and API payloads.

use serde::Serialize;

/// User profile entitlement and credential payloads
pub mod profile;
/// Research job status
pub mod research_job;

/// Body returned by endpoints with nothing else to report.
///
/// ```json
/// { "success": true }
/// ```
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
