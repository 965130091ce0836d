//! CORS middleware.
//!
//! Browsers get an `Access-Control-Allow-Origin` chosen from the configured
//! allow-list, and every `OPTIONS` request is answered directly with `200`
//! before routing.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Accept, X-Requested-With";
/// Preflight cache duration in seconds.
pub const MAX_AGE: &str = "3600";

/// Which origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// `*`: any origin, echoed back so credentials still work.
    Any,
    /// Exact origins, in configured order.
    List(Vec<String>),
}

impl CorsPolicy {
    /// Parse a comma-separated allow-list. A lone `*` means any origin.
    pub fn parse(allowed: &str) -> Self {
        if allowed.trim() == "*" {
            return Self::Any;
        }

        Self::List(
            allowed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The `Access-Control-Allow-Origin` value for a request, if any.
    ///
    /// A listed origin is echoed. A request without an `Origin` gets the
    /// first configured entry. An unlisted origin gets nothing.
    pub fn resolve_origin(&self, origin: Option<&str>) -> Option<String> {
        match (self, origin) {
            (Self::Any, Some(origin)) => Some(origin.to_string()),
            (Self::Any, None) => Some("*".to_string()),
            (Self::List(allowed), Some(origin)) => {
                allowed.iter().find(|a| a.as_str() == origin).cloned()
            }
            (Self::List(allowed), None) => allowed.first().cloned(),
        }
    }

    /// Write all CORS headers for a request with the given `Origin`.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        if let Some(allow) = self.resolve_origin(origin) {
            match HeaderValue::from_str(&allow) {
                Ok(value) => {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                }
                Err(_) => tracing::warn!("Skipping unrepresentable CORS origin: {:?}", allow),
            }
        }

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

/// Apply the CORS policy and short-circuit preflight requests.
// Not tower_http's CorsLayer: it has no "no Origin -> first allow-list entry" fallback.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .filter(|o| !o.is_empty())
        .map(str::to_string);

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(origin.as_deref(), response.headers_mut());
    response
}
