//! Error types for the credential layer

use thiserror::Error;

/// Result type for credential operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur in the credential layer
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token rejected. Malformed, expired and bad-signature tokens all
    /// collapse into this variant so callers cannot tell them apart.
    #[error("Invalid token")]
    InvalidToken,

    /// Token could not be signed (bad key material)
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Secret hashing failed
    #[error("Secret hashing failed: {0}")]
    Hashing(String),
}
