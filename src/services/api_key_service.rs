//! API key service - issues platform API keys to entitled users.
//!
//! # Key Format
//!
//! `ptp_` followed by 30 random bytes from the operating system's CSPRNG,
//! hex encoded in lowercase: 64 characters in total, matching the
//! `profiles.api_key VARCHAR(64)` column.
//!
//! Keys are not checked for uniqueness against existing keys. With 240 bits
//! of entropy a collision is not a practical concern.

use chrono::Utc;
use rand::{TryRngCore, rngs::OsRng};
use uuid::Uuid;

use crate::{error::AppError, repository::ProfileRepository};

/// Literal prefix of every generated key.
pub const API_KEY_PREFIX: &str = "ptp_";

/// Number of random bytes behind each key.
const API_KEY_RANDOM_BYTES: usize = 30;

/// Generate a new opaque API key.
///
/// # Errors
///
/// `AppError::Internal` if the OS random source is unavailable.
pub fn generate_api_key() -> Result<String, AppError> {
    let mut bytes = [0u8; API_KEY_RANDOM_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::Internal(format!("OS random source failed: {e}")))?;

    Ok(format!("{API_KEY_PREFIX}{}", hex::encode(bytes)))
}

/// Issue a new API key for `user_id`, replacing any existing one.
///
/// # Process
///
/// 1. Read the user's entitlement columns
/// 2. Reject with 403 unless the user is on the pro tier or is a member
/// 3. Generate a key and store it with the current timestamp
///
/// # Errors
///
/// - `Forbidden`: user has no profile or no entitlement (nothing is written)
/// - `NotFound`: profile disappeared between the read and the write
/// - `Database`: store failure
/// - `Internal`: random source failure
pub async fn issue_api_key(
    profiles: &dyn ProfileRepository,
    user_id: Uuid,
) -> Result<String, AppError> {
    let entitled = profiles
        .find_entitlement(user_id)
        .await?
        .is_some_and(|p| p.is_entitled());

    if !entitled {
        tracing::info!(%user_id, "API key generation refused: not entitled");
        return Err(AppError::Forbidden(
            "API access requires a Pro subscription or membership".to_string(),
        ));
    }

    let api_key = generate_api_key()?;

    if !profiles.store_api_key(user_id, &api_key, Utc::now()).await? {
        return Err(AppError::NotFound("Profile"));
    }

    tracing::info!(%user_id, "API key generated");
    Ok(api_key)
}
