//! Frame-embedding response headers.
//!
//! The app is embedded in partner dashboards, so every response carries a
//! `Content-Security-Policy: frame-ancestors ...` allow-list and an
//! `X-Frame-Options: ALLOWALL` header. Both are static for the process.

use axum::{
    Router,
    http::{
        HeaderValue,
        header::{CONTENT_SECURITY_POLICY, InvalidHeaderValue, X_FRAME_OPTIONS},
    },
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Partner origins allowed to frame the app when `FRAME_ANCESTORS` is unset.
pub const DEFAULT_FRAME_ANCESTORS: &[&str] = &[
    "https://app.gohighlevel.com",
    "https://*.gohighlevel.com",
    "https://*.leadconnectorhq.com",
];

/// Precomputed header values for the embedding policy.
#[derive(Debug, Clone)]
pub struct FramePolicy {
    content_security_policy: HeaderValue,
}

impl FramePolicy {
    /// Build the policy from a list of partner origins.
    ///
    /// Blank entries are skipped; `'self'` is always allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if an origin contains characters that are not
    /// valid in a header value.
    pub fn new<S: AsRef<str>>(partners: &[S]) -> Result<Self, InvalidHeaderValue> {
        let mut policy = String::from("frame-ancestors 'self'");
        for origin in partners
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
        {
            policy.push(' ');
            policy.push_str(origin);
        }

        Ok(Self {
            content_security_policy: HeaderValue::from_str(&policy)?,
        })
    }

    /// Attach both headers to every response produced by `router`.
    ///
    /// Existing values are overridden so handlers cannot weaken the policy.
    pub fn apply(&self, router: Router) -> Router {
        router
            .layer(SetResponseHeaderLayer::overriding(
                CONTENT_SECURITY_POLICY,
                self.content_security_policy.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                X_FRAME_OPTIONS,
                HeaderValue::from_static("ALLOWALL"),
            ))
    }
}
