//! In-memory store for handler tests.
//!
//! Implements every repository trait over plain collections, counts writes so
//! tests can assert that rejected requests never reach the store, and can be
//! switched into a failing mode to simulate backend errors.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{HealthRepository, ProfileRepository, ResearchJobRepository, SessionRepository};
use crate::{
    app::{AppState, build_router},
    header_policy::{DEFAULT_FRAME_ANCESTORS, FramePolicy},
    middleware::auth::hash_session_token,
    models::{
        profile::{HighLevelCredentials, ProfileEntitlement},
        research_job::ResearchJobStatus,
    },
};

/// Full profile row as seen by tests.
#[derive(Debug, Clone, Default)]
pub struct StoredProfile {
    pub highlevel_api_key: Option<String>,
    pub highlevel_location_id: Option<String>,
    pub api_key: Option<String>,
    pub api_key_created_at: Option<DateTime<Utc>>,
    pub subscription_tier: Option<String>,
    pub is_member: bool,
}

struct StoredJob {
    id: Uuid,
    user_id: Uuid,
    status: ResearchJobStatus,
}

#[derive(Default)]
pub struct InMemoryStore {
    sessions: Mutex<HashMap<String, (Uuid, DateTime<Utc>)>>,
    profiles: Mutex<HashMap<Uuid, StoredProfile>>,
    jobs: Mutex<Vec<StoredJob>>,
    writes: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a session valid for one hour.
    pub fn add_session(&self, token: &str, user_id: Uuid) {
        self.sessions.lock().unwrap().insert(
            hash_session_token(token),
            (user_id, Utc::now() + Duration::hours(1)),
        );
    }

    pub fn add_expired_session(&self, token: &str, user_id: Uuid) {
        self.sessions.lock().unwrap().insert(
            hash_session_token(token),
            (user_id, Utc::now() - Duration::minutes(1)),
        );
    }

    pub fn add_profile(&self, user_id: Uuid, profile: StoredProfile) {
        self.profiles.lock().unwrap().insert(user_id, profile);
    }

    /// Insert a job owned by `user_id` and return its id.
    pub fn add_job(&self, user_id: Uuid, status: ResearchJobStatus) -> Uuid {
        let id = Uuid::new_v4();
        self.jobs.lock().unwrap().push(StoredJob {
            id,
            user_id,
            status,
        });
        id
    }

    pub fn profile(&self, user_id: Uuid) -> Option<StoredProfile> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every profile and job call fail with `message`.
    ///
    /// Session lookups keep working so requests still authenticate.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check_failure(&self) -> Result<(), sqlx::Error> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(sqlx::Error::Protocol(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_active_user(&self, token_hash: &str) -> Result<Option<Uuid>, sqlx::Error> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(token_hash)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(user_id, _)| *user_id))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_entitlement(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntitlement>, sqlx::Error> {
        self.check_failure()?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|p| ProfileEntitlement {
                subscription_tier: p.subscription_tier.clone(),
                is_member: p.is_member,
            }))
    }

    async fn save_highlevel_credentials(
        &self,
        user_id: Uuid,
        credentials: &HighLevelCredentials,
    ) -> Result<bool, sqlx::Error> {
        self.check_failure()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        Ok(match profiles.get_mut(&user_id) {
            Some(profile) => {
                profile.highlevel_api_key = Some(credentials.api_key.clone());
                profile.highlevel_location_id = Some(credentials.location_id.clone());
                true
            }
            None => false,
        })
    }

    async fn store_api_key(
        &self,
        user_id: Uuid,
        api_key: &str,
        created_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        self.check_failure()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        Ok(match profiles.get_mut(&user_id) {
            Some(profile) => {
                profile.api_key = Some(api_key.to_string());
                profile.api_key_created_at = Some(created_at);
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl ResearchJobRepository for InMemoryStore {
    async fn find_for_user(
        &self,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ResearchJobStatus>, sqlx::Error> {
        self.check_failure()?;
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| job.id == job_id && job.user_id == user_id)
            .map(|job| job.status.clone()))
    }
}

#[async_trait]
impl HealthRepository for InMemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check_failure()
    }
}

/// Full application router over `store`, with the default frame policy.
pub fn test_app(store: &Arc<InMemoryStore>) -> Router {
    let state = AppState {
        sessions: store.clone(),
        profiles: store.clone(),
        jobs: store.clone(),
        health: store.clone(),
    };
    let policy = FramePolicy::new(DEFAULT_FRAME_ANCESTORS).unwrap();
    build_router(state, &policy)
}
