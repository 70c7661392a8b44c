//! Link password hashing and verification.
//!
//! Two stored formats coexist: bare SHA-256 hex digests and Argon2id PHC
//! strings. New hashes use the configured scheme; verification accepts
//! either so switching schemes never locks out existing links.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use calshare_core::config::PasswordScheme;
use calshare_core::error::AppError;

use crate::crypto::{sha256_hex, timing_safe_equal};

const ARGON2_PREFIX: &str = "$argon2";

/// Hashes and verifies shared link passwords.
#[derive(Debug, Clone, Default)]
pub struct LinkPasswordHasher {
    scheme: PasswordScheme,
}

impl LinkPasswordHasher {
    /// Create a hasher that produces hashes in `scheme`.
    pub fn new(scheme: PasswordScheme) -> Self {
        Self { scheme }
    }

    /// Scheme used for new hashes.
    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hash a plaintext link password.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        match self.scheme {
            PasswordScheme::Sha256 => Ok(sha256_hex(password)),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
            }
        }
    }

    /// Check a plaintext password against a stored hash of either format.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        if !stored_hash.starts_with(ARGON2_PREFIX) {
            return Ok(timing_safe_equal(&sha256_hex(password), stored_hash));
        }

        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_scheme() {
        let hasher = LinkPasswordHasher::new(PasswordScheme::Sha256);
        let hash = hasher.hash_password("secret123").unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, sha256_hex("secret123"));
        assert!(hasher.verify_password("secret123", &hash).unwrap());
        assert!(!hasher.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_argon2_scheme() {
        let hasher = LinkPasswordHasher::new(PasswordScheme::Argon2);
        let hash = hasher.hash_password("secret123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, hasher.hash_password("secret123").unwrap());
        assert!(hasher.verify_password("secret123", &hash).unwrap());
        assert!(!hasher.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verifies_across_schemes() {
        let legacy = LinkPasswordHasher::new(PasswordScheme::Sha256)
            .hash_password("pw")
            .unwrap();
        let argon = LinkPasswordHasher::new(PasswordScheme::Argon2);
        assert!(argon.verify_password("pw", &legacy).unwrap());

        let modern = argon.hash_password("pw").unwrap();
        assert!(LinkPasswordHasher::default().verify_password("pw", &modern).unwrap());
    }
}
