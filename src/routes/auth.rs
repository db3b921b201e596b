//! Owner identity extractor.
//!
//! Authentication happens upstream: the gateway verifies the session and
//! forwards the user's id in `x-user-id`. Handlers that need an owner take an
//! [`OwnerUser`] parameter; a missing or malformed header is a 401.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

pub const OWNER_HEADER: &str = "x-user-id";

/// Authenticated owner of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerUser {
    pub id: Uuid,
}

pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(OWNER_HEADER)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok().filter(|id| !id.is_nil())
}

impl<S> axum::extract::FromRequestParts<S> for OwnerUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        owner_from_headers(&parts.headers)
            .map(|id| Self { id })
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
