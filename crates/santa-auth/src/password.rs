//! Admin password hashing.
//!
//! Only admin accounts carry a password; everyone else signs in by
//! email alone. Hashes use Argon2id with per-password random salts, in
//! the PHC string format that [`verify`] parses back.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use santa_core::error::AppError;
use santa_core::result::AppResult;

/// Hash a plaintext password for storage.
pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a plaintext password against a stored hash.
///
/// A wrong password is `Ok(false)`; only a malformed hash or an Argon2
/// failure is an error.
pub fn verify(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let stored = hash("sleigh-bells").unwrap();

        assert!(verify("sleigh-bells", &stored).unwrap());
        assert!(!verify("jingle-bells", &stored).unwrap());
    }

    #[test]
    fn test_salts_are_unique_per_hash() {
        assert_ne!(hash("sleigh-bells").unwrap(), hash("sleigh-bells").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }
}
