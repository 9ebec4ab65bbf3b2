//! Citation Ledger core types
//!
//! The domain model shared by the credential layer and the HTTP service:
//! - `Identity`: a login account with one of three roles (admin, officer,
//!   citizen)
//! - `ViolationType` / `Area`: read-only reference data citations point into
//! - `Citation`: a recorded traffic offense with a snapshotted fine amount
//!   and a monotonic status (`unpaid` -> `paid`; `paid` is terminal)
//! - `CitationError`: the error taxonomy every service boundary reports in
//!
//! This crate has no I/O and no async; it is the leaf dependency of the
//! workspace.

pub mod error;
pub mod types;

pub use error::{CitationError, Result};
pub use types::{Area, Citation, CitationStatus, Identity, Role, ViolationType};
