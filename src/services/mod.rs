//! Business logic services.
//!
//! Services contain the logic that sits between the HTTP handlers and the
//! repositories.

pub mod api_key_service;
