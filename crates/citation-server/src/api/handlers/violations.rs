//! Citation and reference-data handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use citation_core::{Area, ViolationType};

use crate::api::error::ApiError;
use crate::api::gate::{Auth, EnforcerOnly};
use crate::api::handlers::AppState;
use crate::citations::{self, CitationView, NewCitation, OwnerCredentials};

/// Request to file a citation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCitationRequest {
    pub vehicle: String,
    pub owner_name: String,
    pub type_ref: Uuid,
    pub area_ref: Uuid,
    /// Replaces the type's base fine when present
    #[serde(default)]
    pub fine_override: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response from filing a citation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCitationResponse {
    pub citation: CitationView,
    /// Present exactly once, when this citation provisioned the owner account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_credentials: Option<OwnerCredentials>,
}

/// File a citation
///
/// POST /violations
pub async fn create_citation(
    State(state): State<Arc<AppState>>,
    EnforcerOnly(officer): EnforcerOnly,
    Json(request): Json<CreateCitationRequest>,
) -> Result<(StatusCode, Json<CreateCitationResponse>), ApiError> {
    let filed = citations::create(
        state.store.as_ref(),
        &officer,
        &state.config.owner_email_domain,
        NewCitation {
            vehicle: request.vehicle,
            owner_name: request.owner_name,
            violation_type: request.type_ref,
            area: request.area_ref,
            fine_override: request.fine_override,
            notes: request.notes,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCitationResponse {
            citation: filed.view,
            owner_credentials: filed.owner_credentials,
        }),
    ))
}

/// List citations visible to the caller, newest first
///
/// GET /violations
pub async fn list_citations(
    State(state): State<Arc<AppState>>,
    Auth(viewer): Auth,
) -> Result<Json<Vec<CitationView>>, ApiError> {
    let views = citations::list(state.store.as_ref(), &viewer).await?;
    Ok(Json(views))
}

/// Settle a citation
///
/// PUT /violations/{id}/pay
pub async fn settle_citation(
    State(state): State<Arc<AppState>>,
    EnforcerOnly(_officer): EnforcerOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<CitationView>, ApiError> {
    let view = citations::settle(state.store.as_ref(), id).await?;
    Ok(Json(view))
}

/// List the violation-type catalog
///
/// GET /violations/types
pub async fn list_violation_types(
    State(state): State<Arc<AppState>>,
    Auth(_viewer): Auth,
) -> Result<Json<Vec<ViolationType>>, ApiError> {
    let types = state
        .store
        .list_violation_types()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(types))
}

/// List the area catalog
///
/// GET /violations/areas
pub async fn list_areas(
    State(state): State<Arc<AppState>>,
    Auth(_viewer): Auth,
) -> Result<Json<Vec<Area>>, ApiError> {
    let areas = state
        .store
        .list_areas()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(areas))
}
