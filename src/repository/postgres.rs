//! PostgreSQL implementations of the repository traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{HealthRepository, ProfileRepository, ResearchJobRepository, SessionRepository};
use crate::{
    db::DbPool,
    models::{
        profile::{HighLevelCredentials, ProfileEntitlement},
        research_job::ResearchJobStatus,
    },
};

/// All repositories backed by one connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgStore {
    async fn find_active_user(&self, token_hash: &str) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM user_sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl ProfileRepository for PgStore {
    async fn find_entitlement(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntitlement>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntitlement>(
            "SELECT subscription_tier, is_member FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_highlevel_credentials(
        &self,
        user_id: Uuid,
        credentials: &HighLevelCredentials,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET highlevel_api_key = $1,
                highlevel_location_id = $2,
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&credentials.api_key)
        .bind(&credentials.location_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn store_api_key(
        &self,
        user_id: Uuid,
        api_key: &str,
        created_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        // Overwrites any previous key; there is no rotation history.
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET api_key = $1,
                api_key_created_at = $2,
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(api_key)
        .bind(created_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ResearchJobRepository for PgStore {
    async fn find_for_user(
        &self,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ResearchJobStatus>, sqlx::Error> {
        // Filtering on user_id makes other users' jobs indistinguishable from missing ones
        sqlx::query_as::<_, ResearchJobStatus>(
            r#"
            SELECT status, total_records, records_completed, records_found, error_message
            FROM research_jobs
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl HealthRepository for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
