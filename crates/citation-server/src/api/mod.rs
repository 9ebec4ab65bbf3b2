//! API module for the citation ledger server

pub mod error;
pub mod gate;
pub mod handlers;

use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness check response
#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub violation_type_count: usize,
    pub area_count: usize,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness check endpoint
///
/// GET /ready
pub async fn ready(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    let types = state
        .store
        .list_violation_types()
        .await
        .map(|v| v.len())
        .unwrap_or(0);
    let areas = state.store.list_areas().await.map(|v| v.len()).unwrap_or(0);

    Json(ReadyResponse {
        ready: types > 0,
        violation_type_count: types,
        area_count: areas,
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything behind the gate carries a resolved identity; per-route
    // extractors then enforce the role.
    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        .route("/violations", post(handlers::create_citation))
        .route("/violations", get(handlers::list_citations))
        .route("/violations/types", get(handlers::list_violation_types))
        .route("/violations/areas", get(handlers::list_areas))
        .route("/violations/{id}/pay", put(handlers::settle_citation))
        .route("/analytics/stats", get(handlers::stats))
        .route("/analytics/by-type", get(handlers::stats_by_type))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::authenticate,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Credential endpoints
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .merge(protected)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
