//! Gateway-injected identity header extractors.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

const USER_ID_HEADER: &str = "x-ladle-user-id";

/// Requester identity injected by the gateway via the `x-ladle-user-id` header.
///
/// Returns 401 if the header is absent or cannot be parsed as a UUID.
/// Ownership checks (403) are done by usecases after extraction.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Optional requester identity for endpoints that serve anonymous traffic.
///
/// An absent header yields `None` (anonymous); a present but malformed header
/// is still rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct MaybeIdentity(pub Option<Uuid>);

fn user_id_from_parts(parts: &Parts) -> Result<Option<Uuid>, StatusCode> {
    match parts.headers.get(USER_ID_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|s| s.parse::<Uuid>().ok())
            .map(Some)
            .ok_or(StatusCode::UNAUTHORIZED),
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = user_id_from_parts(parts);
        async move {
            let user_id = user_id?.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id })
        }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = user_id_from_parts(parts);
        async move { Ok(Self(user_id?)) }
    }
}
