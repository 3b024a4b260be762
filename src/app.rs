//! Router assembly and shared application state.

use std::{any::Any, sync::Arc};

use axum::{
    Router, middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    db::DbPool,
    error::AppError,
    handlers,
    header_policy::FramePolicy,
    middleware,
    repository::{
        HealthRepository, ProfileRepository, ResearchJobRepository, SessionRepository,
        postgres::PgStore,
    },
};

/// State shared with every handler via `State<AppState>`.
///
/// Each field is a trait object so tests can swap in an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub jobs: Arc<dyn ResearchJobRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl AppState {
    /// Back every repository with the same PostgreSQL pool.
    pub fn from_pool(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            sessions: store.clone(),
            profiles: store.clone(),
            jobs: store.clone(),
            health: store,
        }
    }
}

/// Build the full HTTP router.
///
/// # Routes
///
/// Public:
/// - `GET /health`
///
/// Session required:
/// - `POST /api/integrations/highlevel`
/// - `GET /api/research/status`
/// - `POST /api/generate-api-key`
pub fn build_router(state: AppState, policy: &FramePolicy) -> Router {
    let authenticated_routes = Router::new()
        .route(
            "/api/integrations/highlevel",
            post(handlers::integrations::save_highlevel_credentials),
        )
        .route(
            "/api/research/status",
            get(handlers::research::get_job_status),
        )
        .route(
            "/api/generate-api-key",
            post(handlers::api_keys::generate_api_key),
        )
        // Runs before the handlers' extractors, so 401 wins over 400
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    with_response_layers(app, policy)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route")
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Wrap `router` with the layers every response goes through.
///
/// Order, innermost first: panic guard, request tracing, frame headers.
/// The frame headers are outermost so they also land on 500s produced by
/// the panic guard.
fn with_response_layers(router: Router, policy: &FramePolicy) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    policy.apply(router)
}

/// Turn a handler panic into the generic 500 envelope.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
