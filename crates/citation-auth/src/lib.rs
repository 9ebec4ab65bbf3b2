//! Credential primitives for the citation ledger
//!
//! Two concerns live here, both deliberately free of storage and HTTP:
//!
//! - `password`: one-way salted hashing of login secrets (Argon2) and
//!   generation of one-time secrets for auto-provisioned accounts
//! - `tokens`: signed, time-boxed bearer tokens (HS256, 30-day validity)
//!   binding an identity id
//!
//! The server crate owns the orchestration (lookups, uniqueness, role
//! checks); this crate only answers "does this secret match this hash" and
//! "which identity does this token bind".

pub mod error;
pub mod password;
pub mod tokens;

pub use error::{AuthError, Result};
pub use tokens::{TokenSigner, TOKEN_TTL_DAYS};
