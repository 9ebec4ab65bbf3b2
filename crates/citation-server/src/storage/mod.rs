//! Storage abstraction for the citation ledger
//!
//! Trait-based abstraction over the persisted state: identities, the two
//! reference collections (violation types, areas) and citations. Two
//! backends exist: in-memory (default) and PostgreSQL (feature `postgres`).
//!
//! Two contracts matter for correctness and are part of the trait, not the
//! backend:
//! - identity emails are unique; `create_identity` fails with
//!   `AlreadyExists` when the email is taken, which the provisioning layer
//!   converts into re-fetch-and-reuse
//! - `settle_citation` is an atomic conditional transition (only an unpaid
//!   citation becomes paid), so two concurrent settlements cannot both
//!   report success

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use citation_core::{Area, Citation, CitationError, Identity, ViolationType};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<StorageError> for CitationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => CitationError::NotFound(what),
            StorageError::AlreadyExists(key) => CitationError::DuplicateIdentity(key),
            other => CitationError::StoreFailure(other.to_string()),
        }
    }
}

/// Outcome of a conditional settlement
#[derive(Debug)]
pub enum SettleOutcome {
    /// Transitioned unpaid -> paid; carries the updated citation
    Settled(Citation),
    /// Citation exists but is no longer unpaid
    AlreadySettled,
    /// No citation with this id
    NotFound,
}

/// Storage backend trait for the citation ledger
///
/// Implementations must be thread-safe and support concurrent access.
/// `list_citations` / `list_citations_for_owner` must each be a single
/// consistent read so aggregates computed from one call are never torn.
#[async_trait]
pub trait CitationStore: Send + Sync + Debug {
    // =========================================================================
    // Identities
    // =========================================================================

    /// Persist an identity. Fails with `AlreadyExists` if the (lowercased)
    /// email is already taken.
    async fn create_identity(&self, identity: Identity) -> Result<(), StorageError>;

    async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>, StorageError>;

    /// Case-insensitive email lookup
    async fn find_identity_by_email(&self, email: &str)
        -> Result<Option<Identity>, StorageError>;

    // =========================================================================
    // Reference data
    // =========================================================================

    /// Upserts by name: re-inserting an existing type name refreshes its
    /// base fine without changing the id citations reference.
    async fn insert_violation_type(&self, vt: ViolationType) -> Result<(), StorageError>;

    async fn get_violation_type(&self, id: Uuid)
        -> Result<Option<ViolationType>, StorageError>;

    async fn list_violation_types(&self) -> Result<Vec<ViolationType>, StorageError>;

    async fn insert_area(&self, area: Area) -> Result<(), StorageError>;

    async fn get_area(&self, id: Uuid) -> Result<Option<Area>, StorageError>;

    async fn list_areas(&self) -> Result<Vec<Area>, StorageError>;

    // =========================================================================
    // Citations
    // =========================================================================

    async fn insert_citation(&self, citation: Citation) -> Result<(), StorageError>;

    async fn get_citation(&self, id: Uuid) -> Result<Option<Citation>, StorageError>;

    /// All citations, one consistent read, newest first
    async fn list_citations(&self) -> Result<Vec<Citation>, StorageError>;

    /// Citations owned by the given identity, newest first
    async fn list_citations_for_owner(&self, owner: Uuid)
        -> Result<Vec<Citation>, StorageError>;

    /// Atomically transition a citation from unpaid to paid
    async fn settle_citation(&self, id: Uuid) -> Result<SettleOutcome, StorageError>;
}

/// Seed the reference-data catalog when the store is empty.
///
/// Never touches identities or citations; runs at startup so a fresh
/// deployment has types and areas to file against.
pub async fn seed_reference_data(store: &dyn CitationStore) -> Result<(), StorageError> {
    if !store.list_violation_types().await?.is_empty() {
        return Ok(());
    }

    for (name, base_fine) in [
        ("Over Speeding", 2000),
        ("Red Light Jump", 1000),
        ("Driving Without Helmet", 1000),
        ("Drunk Driving", 10000),
        ("Driving Without License", 5000),
        ("Using Phone while Driving", 5000),
        ("Wrong Side Driving", 5000),
    ] {
        store
            .insert_violation_type(ViolationType::new(name, base_fine))
            .await?;
    }

    for (name, city) in [
        ("Connaught Place", "New Delhi"),
        ("MG Road", "Bangalore"),
        ("Marine Drive", "Mumbai"),
        ("Hitech City", "Hyderabad"),
        ("Anna Salai", "Chennai"),
    ] {
        store.insert_area(Area::new(name, city)).await?;
    }

    tracing::info!("Seeded reference-data catalog");
    Ok(())
}
