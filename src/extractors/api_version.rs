//! API version negotiation from the `X-Version` header or the `v` / `version` / `ver` query parameters.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query, Request},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::fmt;
use tracing::Instrument;

/// Header carrying the requested version.
pub const VERSION_HEADER: &str = "X-Version";

/// Query parameters accepted for the requested version, checked in order.
pub const VERSION_QUERY_KEYS: [&str; 3] = ["v", "version", "ver"];

/// Response header listing every version served.
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const V1_0: ApiVersion = ApiVersion { major: 1, minor: 0 };
    pub const V1_1: ApiVersion = ApiVersion { major: 1, minor: 1 };
    pub const V2_0: ApiVersion = ApiVersion { major: 2, minor: 0 };

    /// Assumed when the request names no version.
    pub const DEFAULT: ApiVersion = ApiVersion::V1_1;

    pub const SUPPORTED: [ApiVersion; 3] = [ApiVersion::V1_0, ApiVersion::V1_1, ApiVersion::V2_0];

    /// Parse `"2"`, `"2.0"` or `"1.1"`.
    pub fn parse(raw: &str) -> Option<ApiVersion> {
        let raw = raw.trim();
        let (major, minor) = match raw.split_once('.') {
            Some((major, minor)) => (major.parse().ok()?, minor.parse().ok()?),
            None => (raw.parse().ok()?, 0),
        };
        Some(ApiVersion { major, minor })
    }

    pub fn is_supported(self) -> bool {
        ApiVersion::SUPPORTED.contains(&self)
    }

    pub fn supported_list() -> String {
        ApiVersion::SUPPORTED
            .iter()
            .map(ApiVersion::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn requested_version(parts: &Parts) -> Option<String> {
    if let Some(v) = parts
        .headers
        .get(VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return Some(v.to_string());
    }
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).ok()?;
    VERSION_QUERY_KEYS
        .iter()
        .find_map(|k| params.get(*k).filter(|v| !v.trim().is_empty()).cloned())
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = requested_version(parts) else {
            return Ok(ApiVersion::DEFAULT);
        };
        match ApiVersion::parse(&raw) {
            Some(v) if v.is_supported() => Ok(v),
            _ => Err(AppError::UnsupportedApiVersion(format!(
                "{} (supported: {})",
                raw,
                ApiVersion::supported_list()
            ))),
        }
    }
}

/// Middleware: reject unsupported versions, run the request in a span tagged with
/// the negotiated one, and report the supported set on every response.
pub async fn negotiate_version(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut response = match ApiVersion::from_request_parts(&mut parts, &()).await {
        Ok(version) => {
            let span = tracing::debug_span!("api", version = %version);
            next.run(Request::from_parts(parts, body)).instrument(span).await
        }
        Err(rejection) => rejection.into_response(),
    };
    if let Ok(value) = HeaderValue::from_str(&ApiVersion::supported_list()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SUPPORTED_VERSIONS_HEADER), value);
    }
    response
}
