//! Password hashing and verification.

use anyhow::{bail, Result};
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

/// Hash a plaintext password with a fresh random salt.
///
/// A hashing failure (including an empty password) is fatal to the calling
/// operation - registration aborts rather than storing a bad credential.
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

/// Check a plaintext password against a stored hash.
///
/// A mismatch is a normal negative result; malformed stored hashes also
/// verify as `false` rather than erroring.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
