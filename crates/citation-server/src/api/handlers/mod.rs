//! API request handlers

pub mod analytics;
pub mod auth;
pub mod violations;

use std::sync::Arc;

use citation_auth::TokenSigner;

use crate::storage::CitationStore;

pub use analytics::{stats, stats_by_type};
pub use auth::{login, me, register, IdentitySummary, LoginRequest, RegisterRequest, SessionResponse};
pub use violations::{
    create_citation, list_areas, list_citations, list_violation_types, settle_citation,
    CreateCitationRequest, CreateCitationResponse,
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Domain used when deriving emails for provisioned owner accounts
    pub owner_email_domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            owner_email_domain: "traffic.example".into(),
        }
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Persistent storage for identities, reference data and citations
    pub store: Arc<dyn CitationStore>,
    /// Bearer token signer and verifier
    pub tokens: TokenSigner,
    /// Server configuration
    pub config: ServerConfig,
}
