//! Registration, login and identity handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use citation_core::Role;

use crate::accounts::{self, RegistrationInput};
use crate::api::error::ApiError;
use crate::api::gate::Auth;
use crate::api::handlers::AppState;

/// Request to register an identity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub secret: String,
    /// Defaults to citizen when omitted
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request to log in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub secret: String,
}

/// An identity without its secret hash
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&citation_core::Identity> for IdentitySummary {
    fn from(identity: &citation_core::Identity) -> Self {
        Self {
            id: identity.id,
            handle: identity.handle.clone(),
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            role: identity.role,
        }
    }
}

/// Response carrying a fresh bearer token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub identity: IdentitySummary,
}

/// Register a new identity
///
/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = accounts::register(
        state.store.as_ref(),
        &state.tokens,
        RegistrationInput {
            handle: request.handle,
            display_name: request.display_name,
            email: request.email,
            secret: request.secret,
            role: request.role,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: session.token,
            identity: IdentitySummary::from(&session.identity),
        }),
    ))
}

/// Exchange credentials for a bearer token
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = accounts::authenticate(
        state.store.as_ref(),
        &state.tokens,
        &request.email,
        &request.secret,
    )
    .await?;

    Ok(Json(SessionResponse {
        token: session.token,
        identity: IdentitySummary::from(&session.identity),
    }))
}

/// Return the identity bound to the presented token
///
/// GET /auth/me
pub async fn me(Auth(identity): Auth) -> Json<IdentitySummary> {
    Json(IdentitySummary::from(&identity))
}
