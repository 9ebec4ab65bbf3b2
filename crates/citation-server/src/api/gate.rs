//! Authentication middleware and role extractors
//!
//! A single middleware layer resolves the bearer token once and attaches
//! the full identity to the request. Handlers then express their access
//! requirement through an extractor: `Auth` for any signed-in identity,
//! `EnforcerOnly` for officers and admins, `AdminOnly` for admins.
//!
//! Role checks happen after authentication, so a valid citizen token on an
//! officer route yields 403, not 401.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use citation_core::Identity;

use crate::accounts;
use crate::api::error::ApiError;
use crate::api::handlers::AppState;

/// Resolve the bearer token and attach the identity to the request.
///
/// Applied to every route except registration, login and health probes.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let identity = accounts::resolve(state.store.as_ref(), &state.tokens, token)
        .await
        .map_err(ApiError::from)?;

    debug!(id = %identity.id, role = %identity.role, "Authenticated request");

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract the `Authorization: Bearer <token>` value
fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn attached_identity(parts: &Parts) -> Result<Identity, ApiError> {
    parts
        .extensions
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))
}

/// Any authenticated identity
pub struct Auth(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        attached_identity(parts).map(Auth)
    }
}

/// An authenticated officer or admin
pub struct EnforcerOnly(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for EnforcerOnly {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = attached_identity(parts)?;
        if !identity.role.can_enforce() {
            return Err(ApiError::Forbidden("Officer role required".into()));
        }
        Ok(EnforcerOnly(identity))
    }
}

/// An authenticated admin
pub struct AdminOnly(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for AdminOnly {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = attached_identity(parts)?;
        if !identity.role.is_admin() {
            return Err(ApiError::Forbidden("Admin role required".into()));
        }
        Ok(AdminOnly(identity))
    }
}
