//! Domain types for the citation ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to an identity. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access including analytics
    Admin,
    /// Files and settles citations
    Officer,
    /// Sees only their own citations
    Citizen,
}

impl Role {
    /// Roles allowed to file and settle citations
    pub fn can_enforce(&self) -> bool {
        matches!(self, Role::Admin | Role::Officer)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Officer => "officer",
            Role::Citizen => "citizen",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "officer" => Ok(Role::Officer),
            "citizen" => Ok(Role::Citizen),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login account.
///
/// Emails are stored lowercased; the store layer enforces their uniqueness.
/// Handles are display-only and carry no uniqueness guarantee.
#[derive(Clone)]
pub struct Identity {
    pub id: Uuid,
    pub handle: String,
    pub display_name: String,
    /// Lowercased, unique across the store
    pub email: String,
    /// One-way salted hash; the plaintext secret is never persisted
    pub secret_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(
        handle: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        secret_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            handle: handle.into(),
            display_name: display_name.into(),
            email: email.into(),
            secret_hash: secret_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("secret_hash", &"[redacted]")
            .finish()
    }
}

/// Reference data: a category of offense with its default fine
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationType {
    pub id: Uuid,
    pub name: String,
    /// Positive, in currency minor units
    pub base_fine: i64,
}

impl ViolationType {
    pub fn new(name: impl Into<String>, base_fine: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            base_fine,
        }
    }
}

/// Reference data: where a citation was filed
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

impl Area {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city: city.into(),
        }
    }
}

/// Settlement state of a citation.
///
/// The only wired transition is `Unpaid` -> `Paid`, and `Paid` is terminal.
/// `Disputed` is representable but no code path currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStatus {
    Unpaid,
    Paid,
    Disputed,
}

impl CitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationStatus::Unpaid => "unpaid",
            CitationStatus::Paid => "paid",
            CitationStatus::Disputed => "disputed",
        }
    }
}

impl std::str::FromStr for CitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(CitationStatus::Unpaid),
            "paid" => Ok(CitationStatus::Paid),
            "disputed" => Ok(CitationStatus::Disputed),
            other => Err(format!("unknown citation status: {other}")),
        }
    }
}

/// A recorded traffic offense.
///
/// `fine_amount` is copied from the chosen violation type at creation time
/// and never recomputed, even if the type's base fine later changes.
/// `owner` is a weak reference set at creation and never re-resolved.
#[derive(Debug, Clone)]
pub struct Citation {
    pub id: Uuid,
    /// Free text, not validated against a grammar
    pub vehicle: String,
    pub owner_name: String,
    /// The provisioned or pre-existing identity of the vehicle owner
    pub owner: Option<Uuid>,
    pub violation_type: Uuid,
    pub area: Uuid,
    /// Identity that filed the citation (role officer or admin)
    pub officer: Uuid,
    pub fine_amount: i64,
    pub status: CitationStatus,
    pub notes: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Citation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vehicle: impl Into<String>,
        owner_name: impl Into<String>,
        owner: Option<Uuid>,
        violation_type: Uuid,
        area: Uuid,
        officer: Uuid,
        fine_amount: i64,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle: vehicle.into(),
            owner_name: owner_name.into(),
            owner,
            violation_type,
            area,
            officer,
            fine_amount,
            status: CitationStatus::Unpaid,
            notes,
            issued_at: now,
            updated_at: now,
        }
    }
}
