/**
 * Authentication Extractors
 *
 * This module provides extractors that verify identity tokens before a
 * handler runs.
 *
 * - `AuthUser` reads `Authorization: Bearer <token>` and guards the REST
 *   history endpoints.
 * - `GatewayUser` guards the real-time handshake. It accepts the same
 *   header or a `token` query parameter, since browsers cannot set headers
 *   on WebSocket requests. It must appear before `WebSocketUpgrade` in the
 *   handler signature so that unauthenticated attempts are refused before
 *   any protocol upgrade.
 */

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use serde::Deserialize;

use crate::backend::auth::service::IdentityService;
use crate::backend::auth::users::Identity;
use crate::backend::error::BackendError;

/// Identity verified from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

/// Identity verified at real-time admission
#[derive(Clone, Debug)]
pub struct GatewayUser(pub Identity);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract the handshake token: bearer header first, then `?token=`
pub fn handshake_token(parts: &Parts) -> Option<String> {
    if let Some(token) = bearer_token(&parts.headers) {
        return Some(token.to_string());
    }
    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    IdentityService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::warn!("[Auth] Missing or malformed Authorization header");
            BackendError::Unauthenticated
        })?;

        let identity = IdentityService::from_ref(state).verify_token(token)?;
        Ok(AuthUser(identity))
    }
}

impl<S> FromRequestParts<S> for GatewayUser
where
    IdentityService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = handshake_token(parts).ok_or_else(|| {
            tracing::warn!("[Gateway] Connection attempt without token");
            BackendError::Unauthenticated
        })?;

        let identity = IdentityService::from_ref(state).verify_token(&token).inspect_err(|_| {
            tracing::warn!("[Gateway] Connection refused: invalid token");
        })?;
        Ok(GatewayUser(identity))
    }
}
