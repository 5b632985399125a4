//! Bearer token generation and hashing.
//!
//! Tokens are 32 random bytes, hex-encoded. Only the SHA-256 hash of a
//! token is ever persisted; the plaintext goes to the client once.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a new random bearer token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.r#gen()).collect();
    hex::encode(bytes)
}

/// Hash a bearer token for storage or lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_unique_and_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_token_is_stable() {
        let token = "deadbeef";
        assert_eq!(hash_token(token), hash_token(token));
        assert_ne!(hash_token(token), hash_token("deadbeee"));
        assert_eq!(hash_token(token).len(), 64);
    }
}
