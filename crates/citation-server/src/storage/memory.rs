//! In-memory storage backend
//!
//! Default storage implementation. Suitable for development and
//! single-instance deployments; data is lost on restart.
//!
//! A single `RwLock` guards all tables so that the existence-check-then-
//! insert in `create_identity`, the conditional update in
//! `settle_citation`, and every list call are each atomic with respect to
//! concurrent writers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use citation_core::{Area, Citation, CitationStatus, Identity, ViolationType};

use super::{CitationStore, SettleOutcome, StorageError};

#[derive(Debug, Default)]
struct Tables {
    identities: HashMap<Uuid, Identity>,
    /// Lowercased email -> identity id
    email_index: HashMap<String, Uuid>,
    violation_types: HashMap<Uuid, ViolationType>,
    areas: HashMap<Uuid, Area>,
    citations: HashMap<Uuid, Citation>,
}

/// In-memory citation store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut citations: Vec<Citation>) -> Vec<Citation> {
    citations.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
    citations
}

#[async_trait]
impl CitationStore for MemoryStore {
    // =========================================================================
    // Identities
    // =========================================================================

    async fn create_identity(&self, identity: Identity) -> Result<(), StorageError> {
        let mut tables = self.tables.write().unwrap();
        let email_key = identity.email.to_lowercase();

        if tables.email_index.contains_key(&email_key) {
            return Err(StorageError::AlreadyExists(email_key));
        }

        info!(id = %identity.id, email = %email_key, role = %identity.role, "Creating identity");
        tables.email_index.insert(email_key, identity.id);
        tables.identities.insert(identity.id, identity);
        Ok(())
    }

    async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.identities.get(&id).cloned())
    }

    async fn find_identity_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .email_index
            .get(&email.to_lowercase())
            .and_then(|id| tables.identities.get(id))
            .cloned())
    }

    // =========================================================================
    // Reference data
    // =========================================================================

    async fn insert_violation_type(&self, vt: ViolationType) -> Result<(), StorageError> {
        let mut tables = self.tables.write().unwrap();
        // Names are the natural key; a repeat insert updates the fine in
        // place so existing citations keep referencing the original id.
        if let Some(existing) = tables.violation_types.values_mut().find(|v| v.name == vt.name) {
            existing.base_fine = vt.base_fine;
            return Ok(());
        }
        tables.violation_types.insert(vt.id, vt);
        Ok(())
    }

    async fn get_violation_type(
        &self,
        id: Uuid,
    ) -> Result<Option<ViolationType>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.violation_types.get(&id).cloned())
    }

    async fn list_violation_types(&self) -> Result<Vec<ViolationType>, StorageError> {
        let tables = self.tables.read().unwrap();
        let mut types: Vec<_> = tables.violation_types.values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn insert_area(&self, area: Area) -> Result<(), StorageError> {
        let mut tables = self.tables.write().unwrap();
        tables.areas.insert(area.id, area);
        Ok(())
    }

    async fn get_area(&self, id: Uuid) -> Result<Option<Area>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.areas.get(&id).cloned())
    }

    async fn list_areas(&self) -> Result<Vec<Area>, StorageError> {
        let tables = self.tables.read().unwrap();
        let mut areas: Vec<_> = tables.areas.values().cloned().collect();
        areas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(areas)
    }

    // =========================================================================
    // Citations
    // =========================================================================

    async fn insert_citation(&self, citation: Citation) -> Result<(), StorageError> {
        let mut tables = self.tables.write().unwrap();
        info!(id = %citation.id, vehicle = %citation.vehicle, "Recording citation");
        tables.citations.insert(citation.id, citation);
        Ok(())
    }

    async fn get_citation(&self, id: Uuid) -> Result<Option<Citation>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.citations.get(&id).cloned())
    }

    async fn list_citations(&self) -> Result<Vec<Citation>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(newest_first(tables.citations.values().cloned().collect()))
    }

    async fn list_citations_for_owner(
        &self,
        owner: Uuid,
    ) -> Result<Vec<Citation>, StorageError> {
        let tables = self.tables.read().unwrap();
        Ok(newest_first(
            tables
                .citations
                .values()
                .filter(|c| c.owner == Some(owner))
                .cloned()
                .collect(),
        ))
    }

    async fn settle_citation(&self, id: Uuid) -> Result<SettleOutcome, StorageError> {
        let mut tables = self.tables.write().unwrap();

        let Some(citation) = tables.citations.get_mut(&id) else {
            return Ok(SettleOutcome::NotFound);
        };

        if citation.status != CitationStatus::Unpaid {
            return Ok(SettleOutcome::AlreadySettled);
        }

        citation.status = CitationStatus::Paid;
        citation.updated_at = chrono::Utc::now();
        info!(id = %id, "Citation settled");
        Ok(SettleOutcome::Settled(citation.clone()))
    }
}
