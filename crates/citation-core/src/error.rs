//! Error taxonomy for the citation ledger

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using CitationError
pub type Result<T> = std::result::Result<T, CitationError>;

/// Errors reported at the service boundaries.
///
/// `InvalidCredentials` and `InvalidToken` carry deliberately generic
/// wording: unknown email, wrong secret, malformed token, expired token and
/// bad signature are all indistinguishable to callers.
#[derive(Error, Debug)]
pub enum CitationError {
    /// Missing or malformed input field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Login failed; never says whether the email or the secret was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token rejected; never says why
    #[error("Invalid token")]
    InvalidToken,

    /// Caller's role is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Entity id did not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// A violation type or area reference did not resolve at creation
    #[error("Unknown reference: {0}")]
    ReferenceNotFound(String),

    /// An identity with this email already exists
    #[error("An account already exists for {0}")]
    DuplicateIdentity(String),

    /// Settlement attempted on a citation that is no longer unpaid
    #[error("Citation {0} is already settled")]
    AlreadySettled(Uuid),

    /// Unexpected persistence failure; not retried by this service
    #[error("Storage failure: {0}")]
    StoreFailure(String),
}
