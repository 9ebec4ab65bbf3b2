//! Input validation at the service boundary
//!
//! Every field rule lives here as an explicit function returning a typed
//! error, independent of the storage backend. Nothing relies on
//! schema-level defaults or enum enforcement.

use citation_core::CitationError;

/// Validate registration input: all fields required, email must look like
/// an address.
pub fn validate_registration(
    handle: &str,
    display_name: &str,
    email: &str,
    secret: &str,
) -> Result<(), CitationError> {
    require_nonempty("handle", handle)?;
    require_nonempty("display_name", display_name)?;
    require_nonempty("email", email)?;
    require_nonempty("secret", secret)?;

    // Minimal shape check; deliverability is out of scope
    let trimmed = email.trim();
    if !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(CitationError::InvalidInput(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }

    Ok(())
}

/// Validate citation creation input
pub fn validate_new_citation(
    vehicle: &str,
    owner_name: &str,
    fine_override: Option<i64>,
) -> Result<(), CitationError> {
    require_nonempty("vehicle", vehicle)?;
    require_nonempty("owner_name", owner_name)?;

    if let Some(fine) = fine_override {
        if fine <= 0 {
            return Err(CitationError::InvalidInput(
                "fine_override must be a positive amount".into(),
            ));
        }
    }

    Ok(())
}

/// Canonical form for stored and looked-up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn require_nonempty(field: &str, value: &str) -> Result<(), CitationError> {
    if value.trim().is_empty() {
        return Err(CitationError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
