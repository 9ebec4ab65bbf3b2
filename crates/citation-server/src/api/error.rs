//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use citation_core::CitationError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Already settled")]
    AlreadySettled(uuid::Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                msg.clone(),
                None,
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                msg.clone(),
                None,
            ),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                msg.clone(),
                None,
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
                None,
            ),
            ApiError::UnknownReference(what) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_REFERENCE",
                format!("Unknown reference: {what}"),
                None,
            ),
            ApiError::DuplicateIdentity(email) => (
                StatusCode::BAD_REQUEST,
                "DUPLICATE_IDENTITY",
                format!("An account already exists for {email}"),
                None,
            ),
            ApiError::AlreadySettled(id) => (
                StatusCode::BAD_REQUEST,
                "ALREADY_SETTLED",
                "Citation is already settled".to_string(),
                Some(serde_json::json!({ "citation_id": id })),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CitationError> for ApiError {
    fn from(err: CitationError) -> Self {
        match err {
            CitationError::InvalidInput(msg) => ApiError::BadRequest(msg),
            // Both credential failure modes render identically
            CitationError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".into())
            }
            CitationError::InvalidToken => ApiError::Unauthorized("Invalid token".into()),
            CitationError::Forbidden(msg) => ApiError::Forbidden(msg),
            CitationError::NotFound(what) => ApiError::NotFound(what),
            CitationError::ReferenceNotFound(what) => ApiError::UnknownReference(what),
            CitationError::DuplicateIdentity(email) => ApiError::DuplicateIdentity(email),
            CitationError::AlreadySettled(id) => ApiError::AlreadySettled(id),
            CitationError::StoreFailure(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_map_to_401() {
        let a = ApiError::from(CitationError::InvalidCredentials).into_response();
        let b = ApiError::from(CitationError::InvalidToken).into_response();
        assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(b.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_business_rule_conflicts_map_to_400() {
        let settled = ApiError::from(CitationError::AlreadySettled(uuid::Uuid::new_v4()));
        assert_eq!(settled.into_response().status(), StatusCode::BAD_REQUEST);

        let duplicate = ApiError::from(CitationError::DuplicateIdentity("a@x".into()));
        assert_eq!(duplicate.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_reference_maps_to_404() {
        let err = ApiError::from(CitationError::ReferenceNotFound("area".into()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
