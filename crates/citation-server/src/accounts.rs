//! Credential & token service
//!
//! Orchestrates registration, login and token resolution against the
//! identity store. Hashing is an explicit step before the store write;
//! the store never sees a plaintext secret.
//!
//! Login failures are non-distinguishing: unknown email and wrong secret
//! both return `InvalidCredentials`, so the endpoint cannot be used to
//! enumerate accounts.

use tracing::info;

use citation_auth::{password, TokenSigner};
use citation_core::{CitationError, Identity, Role};

use crate::core::validation;
use crate::storage::{CitationStore, StorageError};

/// Registration input, role defaulting to citizen
#[derive(Debug)]
pub struct RegistrationInput {
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub secret: String,
    pub role: Option<Role>,
}

/// An identity together with a freshly issued bearer token
#[derive(Debug)]
pub struct Session {
    pub identity: Identity,
    pub token: String,
}

/// Create an identity and issue a token for it.
///
/// Fails with `DuplicateIdentity` when the email is already registered and
/// `InvalidInput` when a required field is missing.
pub async fn register(
    store: &dyn CitationStore,
    tokens: &TokenSigner,
    input: RegistrationInput,
) -> Result<Session, CitationError> {
    validation::validate_registration(
        &input.handle,
        &input.display_name,
        &input.email,
        &input.secret,
    )?;

    let email = validation::normalize_email(&input.email);
    let secret_hash = password::hash_secret(&input.secret)
        .map_err(|e| CitationError::StoreFailure(e.to_string()))?;

    let identity = Identity::new(
        input.handle,
        input.display_name,
        email.clone(),
        secret_hash,
        input.role.unwrap_or(Role::Citizen),
    );

    match store.create_identity(identity.clone()).await {
        Ok(()) => {}
        Err(StorageError::AlreadyExists(_)) => {
            return Err(CitationError::DuplicateIdentity(email));
        }
        Err(e) => return Err(e.into()),
    }

    info!(id = %identity.id, role = %identity.role, "Registered identity");

    let token = issue_token(tokens, &identity)?;
    Ok(Session { identity, token })
}

/// Verify credentials and issue a token.
///
/// Returns the identical `InvalidCredentials` error for an unknown email
/// and for a wrong secret.
pub async fn authenticate(
    store: &dyn CitationStore,
    tokens: &TokenSigner,
    email: &str,
    secret: &str,
) -> Result<Session, CitationError> {
    let email = validation::normalize_email(email);

    let identity = store
        .find_identity_by_email(&email)
        .await
        .map_err(CitationError::from)?
        .ok_or(CitationError::InvalidCredentials)?;

    if !password::verify_secret(secret, &identity.secret_hash) {
        return Err(CitationError::InvalidCredentials);
    }

    info!(id = %identity.id, "Credentials verified");

    let token = issue_token(tokens, &identity)?;
    Ok(Session { identity, token })
}

/// Resolve a bearer token to the full identity it binds.
///
/// All token failure modes, and a token whose bound identity no longer
/// resolves, collapse into `InvalidToken`.
pub async fn resolve(
    store: &dyn CitationStore,
    tokens: &TokenSigner,
    token: &str,
) -> Result<Identity, CitationError> {
    let identity_id = tokens
        .resolve(token)
        .map_err(|_| CitationError::InvalidToken)?;

    store
        .get_identity(identity_id)
        .await
        .map_err(CitationError::from)?
        .ok_or(CitationError::InvalidToken)
}

fn issue_token(tokens: &TokenSigner, identity: &Identity) -> Result<String, CitationError> {
    tokens
        .issue(identity.id)
        .map_err(|e| CitationError::StoreFailure(e.to_string()))
}
