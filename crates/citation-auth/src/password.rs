//! Secret hashing and one-time secret generation
//!
//! Secrets are stored only as salted Argon2 hashes; the plaintext never
//! reaches the store or the logs. Verification parses the stored hash and
//! re-derives, which is constant-time inside the Argon2 implementation.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{AuthError, Result};

/// Length of secrets generated for auto-provisioned accounts. One-time-use
/// entropy, not a long-term strong password.
pub const GENERATED_SECRET_LEN: usize = 10;

/// Hash a plaintext secret with a fresh random salt
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext secret against a stored hash.
///
/// Returns `false` for any mismatch, including an unparseable stored hash;
/// callers are expected to surface a single non-distinguishing error.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generate a random alphanumeric secret for a provisioned account
pub fn generate_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_secret("S1").unwrap();

        assert!(verify_secret("S1", &hash));
        assert!(!verify_secret("wrong", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_secret("same-secret").unwrap();
        let second = hash_secret("same-secret").unwrap();

        assert_ne!(first, second);
        assert!(verify_secret("same-secret", &first));
        assert!(verify_secret("same-secret", &second));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_secret("CitizenSafe$78").unwrap();
        assert!(!hash.contains("CitizenSafe"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_secret("anything", "not-a-hash"));
    }

    #[test]
    fn test_generate_secret_shape() {
        let secret = generate_secret(GENERATED_SECRET_LEN);

        assert_eq!(secret.len(), GENERATED_SECRET_LEN);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_secrets_differ() {
        assert_ne!(generate_secret(10), generate_secret(10));
    }
}
