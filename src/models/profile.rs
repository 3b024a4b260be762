//! User profile models and the requests that touch them.
//!
//! The `profiles` table is keyed by user id. This service writes two groups
//! of columns on it:
//! - the HighLevel integration credentials (`highlevel_api_key`,
//!   `highlevel_location_id`)
//! - the platform API key (`api_key`, `api_key_created_at`)
//!
//! and reads the entitlement columns (`subscription_tier`, `is_member`).

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Subscription tier that unlocks API key generation.
pub const PRO_TIER: &str = "pro";

/// Entitlement columns of a profile row.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ProfileEntitlement {
    /// Tier label such as "free" or "pro" (NULL for users who never subscribed)
    pub subscription_tier: Option<String>,

    /// Membership flag granted outside of the subscription flow
    pub is_member: bool,
}

impl ProfileEntitlement {
    /// A user is entitled when they are on the pro tier OR flagged as a member.
    pub fn is_entitled(&self) -> bool {
        self.subscription_tier.as_deref() == Some(PRO_TIER) || self.is_member
    }
}

/// Request body for saving HighLevel credentials.
///
/// # JSON Example
///
/// ```json
/// {
///   "highlevel_api_key": "pit-7c2e...",
///   "highlevel_location_id": "ve9EPM428h8vShlRW1KT"
/// }
/// ```
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a 400 naming it, not as a body parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct SaveHighLevelCredentialsRequest {
    pub highlevel_api_key: Option<String>,
    pub highlevel_location_id: Option<String>,
}

/// Validated HighLevel credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighLevelCredentials {
    pub api_key: String,
    pub location_id: String,
}

impl SaveHighLevelCredentialsRequest {
    /// Check that both fields are present and non-blank.
    ///
    /// # Errors
    ///
    /// `AppError::MissingFields` listing every missing field.
    pub fn validate(self) -> Result<HighLevelCredentials, AppError> {
        let api_key = non_blank(self.highlevel_api_key);
        let location_id = non_blank(self.highlevel_location_id);

        match (api_key, location_id) {
            (Some(api_key), Some(location_id)) => Ok(HighLevelCredentials {
                api_key,
                location_id,
            }),
            (api_key, location_id) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push("highlevel_api_key");
                }
                if location_id.is_none() {
                    missing.push("highlevel_location_id");
                }
                Err(AppError::MissingFields(missing))
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Response body for a freshly generated API key.
///
/// ```json
/// { "success": true, "apiKey": "ptp_3f9a..." }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub success: bool,

    #[serde(rename = "apiKey")]
    pub api_key: String,
}
