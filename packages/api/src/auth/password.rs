//! # Password hashing and verification — Argon2id
//!
//! - [`hash_password`] — generates a random salt via [`OsRng`], hashes the
//!   plaintext with the default Argon2id parameters, and returns a
//!   PHC-format string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`). This
//!   string goes into the `password` field of a `user` record.
//!
//! - [`verify_password`] — parses a PHC-format hash and checks whether the
//!   provided plaintext matches. `Ok(true)` on success, `Ok(false)` on
//!   mismatch, `Err` when the stored hash is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("pw1", "not-a-phc-string").is_err());
    }
}
