//! Analytics handlers, admin only

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::gate::AdminOnly;
use crate::api::handlers::AppState;
use crate::citations::analytics::{self, Summary, TypeBreakdown};

/// Ledger-wide totals
///
/// GET /analytics/stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
    AdminOnly(_admin): AdminOnly,
) -> Result<Json<Summary>, ApiError> {
    let report = analytics::summary(state.store.as_ref()).await?;
    Ok(Json(report))
}

/// Citation counts per violation type
///
/// GET /analytics/by-type
pub async fn stats_by_type(
    State(state): State<Arc<AppState>>,
    AdminOnly(_admin): AdminOnly,
) -> Result<Json<Vec<TypeBreakdown>>, ApiError> {
    let breakdown = analytics::by_type(state.store.as_ref()).await?;
    Ok(Json(breakdown))
}
