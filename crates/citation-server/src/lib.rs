//! Citation Ledger Server
//!
//! HTTP service for the citation lifecycle:
//! - Officers file citations against vehicles/owners; the owner gets a
//!   citizen account auto-provisioned so they can log in and see them
//! - Citizens and officers view citations (role-scoped)
//! - Officers settle citations (unpaid -> paid, manual attestation)
//! - Administrators view aggregate statistics
//!
//! ## API Endpoints
//!
//! ### Public
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with reference-data counts
//! - `POST /auth/register` - Create an identity, returns a bearer token
//! - `POST /auth/login` - Exchange credentials for a bearer token
//!
//! ### Authenticated (any role)
//! - `GET /auth/me` - Caller's identity summary
//! - `GET /violations` - Role-scoped citation list (citizens see only
//!   their own; officers and admins see everything)
//! - `GET /violations/types` - Violation type catalog
//! - `GET /violations/areas` - Area catalog
//!
//! ### Officer / admin
//! - `POST /violations` - File a citation; response carries one-time owner
//!   credentials iff a new identity was provisioned in this call
//! - `PUT /violations/{id}/pay` - Settle a citation
//!
//! ### Admin
//! - `GET /analytics/stats` - Totals and collected/pending fine split
//! - `GET /analytics/by-type` - Citation counts per violation type

pub mod accounts;
pub mod api;
pub mod citations;
pub mod core;
pub mod storage;

pub use api::create_router;
pub use api::handlers::{AppState, ServerConfig};
pub use storage::{CitationStore, MemoryStore, SettleOutcome, StorageError};
#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
