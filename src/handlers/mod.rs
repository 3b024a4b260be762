//! HTTP request handlers (route handlers).
//!
//! Every protected handler follows the same sequence: the session has
//! already been resolved by the auth middleware, the handler validates its
//! input, performs one store call and maps the result to JSON.

/// API key generation
pub mod api_keys;
pub mod health;
/// HighLevel credential storage
pub mod integrations;
/// Research job status polling
pub mod research;
