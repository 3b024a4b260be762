//! Persistence boundary.
//!
//! Handlers never talk to the database directly; they go through these
//! traits so the same request flow runs against PostgreSQL in production
//! and against an in-memory store in tests.
//!
//! Every method is exactly one round trip. Errors are raw `sqlx::Error`s and
//! are turned into a generic 500 by [`crate::error::AppError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    profile::{HighLevelCredentials, ProfileEntitlement},
    research_job::ResearchJobStatus,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Resolves session tokens to user identities.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Look up the owner of an unexpired session by the SHA-256 hex digest
    /// of its token.
    async fn find_active_user(&self, token_hash: &str) -> Result<Option<Uuid>, sqlx::Error>;
}

/// Reads and writes on the `profiles` table.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns `None` when the user has no profile row.
    async fn find_entitlement(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntitlement>, sqlx::Error>;

    /// Overwrite the HighLevel credential pair.
    ///
    /// Returns `false` when no profile row matched `user_id`.
    async fn save_highlevel_credentials(
        &self,
        user_id: Uuid,
        credentials: &HighLevelCredentials,
    ) -> Result<bool, sqlx::Error>;

    /// Overwrite the platform API key and its creation timestamp.
    ///
    /// Returns `false` when no profile row matched `user_id`.
    async fn store_api_key(
        &self,
        user_id: Uuid,
        api_key: &str,
        created_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error>;
}

/// Read-only access to `research_jobs`.
#[async_trait]
pub trait ResearchJobRepository: Send + Sync {
    /// Fetch a job only if it is owned by `user_id`.
    async fn find_for_user(
        &self,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ResearchJobStatus>, sqlx::Error>;
}

/// Connectivity probe used by the health endpoint.
#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
