//! Owner account provisioning
//!
//! When a citation names an owner with no existing account, one is created
//! from a deterministic email and a generated secret. The generated
//! credentials are surfaced exactly once, in the response to the citation
//! that caused the provisioning.

use rand::Rng;
use tracing::info;

use citation_auth::password;
use citation_core::{CitationError, Identity, Role};

use crate::storage::{CitationStore, StorageError};

/// Plaintext credentials, returned only when an account was just created
#[derive(Debug, Clone, serde::Serialize)]
pub struct OwnerCredentials {
    pub email: String,
    pub secret: String,
}

/// A resolved owner identity, with credentials when freshly provisioned
#[derive(Debug)]
pub struct ProvisionedOwner {
    pub identity: Identity,
    pub credentials: Option<OwnerCredentials>,
}

/// Derive the owner's email from their name: lowercase, spaces stripped,
/// suffixed with the configured domain.
pub fn derive_owner_email(owner_name: &str, domain: &str) -> String {
    let local: String = owner_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    format!("{local}@{domain}")
}

/// Find the account for `owner_name`, creating one when none exists.
///
/// Concurrent provisioning of the same owner is resolved at the store's
/// uniqueness constraint: the loser of the race re-fetches the winner's
/// identity and reports no credentials.
pub async fn provision(
    store: &dyn CitationStore,
    owner_name: &str,
    domain: &str,
) -> Result<ProvisionedOwner, CitationError> {
    let email = derive_owner_email(owner_name, domain);

    if let Some(identity) = store
        .find_identity_by_email(&email)
        .await
        .map_err(CitationError::from)?
    {
        return Ok(ProvisionedOwner {
            identity,
            credentials: None,
        });
    }

    let secret = password::generate_secret(password::GENERATED_SECRET_LEN);
    let secret_hash = password::hash_secret(&secret)
        .map_err(|e| CitationError::StoreFailure(e.to_string()))?;

    let local = email.split('@').next().unwrap_or(&email);
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    let handle = format!("{local}{suffix}");

    let identity = Identity::new(
        handle,
        owner_name.to_string(),
        email.clone(),
        secret_hash,
        Role::Citizen,
    );

    match store.create_identity(identity.clone()).await {
        Ok(()) => {
            info!(id = %identity.id, "Provisioned owner account");
            Ok(ProvisionedOwner {
                identity,
                credentials: Some(OwnerCredentials { email, secret }),
            })
        }
        Err(StorageError::AlreadyExists(_)) => {
            // Lost a provisioning race; the winner's account is authoritative
            let identity = store
                .find_identity_by_email(&email)
                .await
                .map_err(CitationError::from)?
                .ok_or_else(|| {
                    CitationError::StoreFailure("identity vanished after conflict".into())
                })?;
            Ok(ProvisionedOwner {
                identity,
                credentials: None,
            })
        }
        Err(e) => Err(e.into()),
    }
}
