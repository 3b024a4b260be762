//! Startup settings for the integration API.
//!
//! Read once in `main` from the process environment (plus an optional
//! `.env` file during local development).

use serde::Deserialize;

use crate::header_policy::DEFAULT_FRAME_ANCESTORS;

/// Service settings.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `FRAME_ANCESTORS` (optional): comma-separated origins allowed to embed
///   the app in an iframe, defaults to the HighLevel partner domains
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_frame_ancestors")]
    pub frame_ancestors: Vec<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_frame_ancestors() -> Vec<String> {
    DEFAULT_FRAME_ANCESTORS
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}

impl Config {
    /// Read the settings, letting a local `.env` fill in unset variables.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is unset or `SERVER_PORT` is not a valid port.
    pub fn from_env() -> Result<Self, envy::Error> {
        // A missing .env is normal outside local development
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}
