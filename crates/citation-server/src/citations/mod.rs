//! Citation lifecycle
//!
//! Filing, listing and settling citations. Filing resolves the cited
//! references, snapshots the fine from the violation type and provisions an
//! owner account when none exists. Listing is role-scoped: citizens see
//! only citations bound to their own identity.

pub mod analytics;
pub mod provision;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use citation_core::{Citation, CitationError, CitationStatus, Identity};

use crate::core::validation;
use crate::storage::{CitationStore, SettleOutcome};

pub use provision::{OwnerCredentials, ProvisionedOwner};

/// Input for filing a citation
#[derive(Debug)]
pub struct NewCitation {
    pub vehicle: String,
    pub owner_name: String,
    pub violation_type: Uuid,
    pub area: Uuid,
    /// Replaces the violation type's base fine when present; must be positive
    pub fine_override: Option<i64>,
    pub notes: Option<String>,
}

/// A citation with its references resolved for presentation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationView {
    pub id: Uuid,
    pub vehicle: String,
    pub owner_name: String,
    pub violation_type: TypeRef,
    pub area: AreaRef,
    pub officer: OfficerRef,
    pub fine_amount: i64,
    pub status: CitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub id: Uuid,
    pub name: String,
    pub base_fine: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRef {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRef {
    pub id: Uuid,
    pub display_name: String,
}

/// Result of filing a citation
#[derive(Debug)]
pub struct FiledCitation {
    pub view: CitationView,
    /// Present only when filing provisioned a new owner account
    pub owner_credentials: Option<OwnerCredentials>,
}

/// File a citation on behalf of `officer`.
///
/// The fine is snapshotted from the violation type (or the override) at this
/// point and never recomputed. An owner account is provisioned from the
/// owner name when no matching one exists.
pub async fn create(
    store: &dyn CitationStore,
    officer: &Identity,
    owner_domain: &str,
    input: NewCitation,
) -> Result<FiledCitation, CitationError> {
    validation::validate_new_citation(&input.vehicle, &input.owner_name, input.fine_override)?;

    let vt = store
        .get_violation_type(input.violation_type)
        .await
        .map_err(CitationError::from)?
        .ok_or_else(|| CitationError::ReferenceNotFound("violation type".into()))?;

    let area = store
        .get_area(input.area)
        .await
        .map_err(CitationError::from)?
        .ok_or_else(|| CitationError::ReferenceNotFound("area".into()))?;

    let owner = provision::provision(store, &input.owner_name, owner_domain).await?;

    let fine_amount = input.fine_override.unwrap_or(vt.base_fine);
    let citation = Citation::new(
        input.vehicle,
        input.owner_name,
        Some(owner.identity.id),
        vt.id,
        area.id,
        officer.id,
        fine_amount,
        input.notes,
    );

    store
        .insert_citation(citation.clone())
        .await
        .map_err(CitationError::from)?;

    info!(
        id = %citation.id,
        officer = %officer.id,
        fine = fine_amount,
        "Filed citation"
    );

    Ok(FiledCitation {
        view: CitationView {
            id: citation.id,
            vehicle: citation.vehicle,
            owner_name: citation.owner_name,
            violation_type: TypeRef {
                id: vt.id,
                name: vt.name,
                base_fine: vt.base_fine,
            },
            area: AreaRef {
                id: area.id,
                name: area.name,
                city: area.city,
            },
            officer: OfficerRef {
                id: officer.id,
                display_name: officer.display_name.clone(),
            },
            fine_amount: citation.fine_amount,
            status: citation.status,
            notes: citation.notes,
            issued_at: citation.issued_at,
            updated_at: citation.updated_at,
        },
        owner_credentials: owner.credentials,
    })
}

/// List citations visible to `viewer`, newest first.
///
/// Enforcing roles see everything; citizens see only citations whose owner
/// reference is their own identity.
pub async fn list(
    store: &dyn CitationStore,
    viewer: &Identity,
) -> Result<Vec<CitationView>, CitationError> {
    let citations = if viewer.role.can_enforce() {
        store.list_citations().await
    } else {
        store.list_citations_for_owner(viewer.id).await
    }
    .map_err(CitationError::from)?;

    views_for(store, citations).await
}

/// Settle a citation: unpaid -> paid, atomically.
pub async fn settle(store: &dyn CitationStore, id: Uuid) -> Result<CitationView, CitationError> {
    match store.settle_citation(id).await.map_err(CitationError::from)? {
        SettleOutcome::Settled(citation) => {
            info!(id = %citation.id, "Settled citation");
            let mut views = views_for(store, vec![citation]).await?;
            Ok(views.remove(0))
        }
        SettleOutcome::AlreadySettled => Err(CitationError::AlreadySettled(id)),
        SettleOutcome::NotFound => Err(CitationError::NotFound(format!("citation {id}"))),
    }
}

/// Resolve reference ids into presentation views.
///
/// A dangling reference is a store-level integrity failure, not a client
/// error.
async fn views_for(
    store: &dyn CitationStore,
    citations: Vec<Citation>,
) -> Result<Vec<CitationView>, CitationError> {
    let mut views = Vec::with_capacity(citations.len());

    for citation in citations {
        let vt = store
            .get_violation_type(citation.violation_type)
            .await
            .map_err(CitationError::from)?
            .ok_or_else(|| CitationError::StoreFailure("dangling violation type".into()))?;

        let area = store
            .get_area(citation.area)
            .await
            .map_err(CitationError::from)?
            .ok_or_else(|| CitationError::StoreFailure("dangling area".into()))?;

        let officer = store
            .get_identity(citation.officer)
            .await
            .map_err(CitationError::from)?
            .ok_or_else(|| CitationError::StoreFailure("dangling officer".into()))?;

        views.push(CitationView {
            id: citation.id,
            vehicle: citation.vehicle,
            owner_name: citation.owner_name,
            violation_type: TypeRef {
                id: vt.id,
                name: vt.name,
                base_fine: vt.base_fine,
            },
            area: AreaRef {
                id: area.id,
                name: area.name,
                city: area.city,
            },
            officer: OfficerRef {
                id: officer.id,
                display_name: officer.display_name,
            },
            fine_amount: citation.fine_amount,
            status: citation.status,
            notes: citation.notes,
            issued_at: citation.issued_at,
            updated_at: citation.updated_at,
        });
    }

    Ok(views)
}
