//! PTP Integration API - Main Application Entry Point
//!
//! A small REST API behind the PTP dashboard. Authenticated users can store
//! their HighLevel credentials, poll the progress of their research jobs and
//! generate a platform API key when their plan allows it. The app is embedded
//! in partner dashboards, so every response carries frame-embedding headers.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: Session token (bearer or cookie) with SHA-256 lookup
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod app;
mod config;
mod db;
mod error;
mod handlers;
mod header_policy;
mod middleware;
mod models;
mod repository;
mod services;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let policy = header_policy::FramePolicy::new(config.frame_ancestors.as_slice())?;

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = app::build_router(app::AppState::from_pool(pool), &policy);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
