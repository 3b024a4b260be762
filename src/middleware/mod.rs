//! HTTP middleware components.
//!
//! Middleware run before route handlers and can short-circuit a request
//! (e.g. reject it as unauthenticated) before the handler sees it.

/// Session authentication middleware
pub mod auth;
