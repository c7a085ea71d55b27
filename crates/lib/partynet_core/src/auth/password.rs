//! Stored password hashes for user accounts.
//!
//! Only the bcrypt hash of a password reaches the store. Each hash carries
//! its own salt, and `bcrypt::verify` compares in constant time.

use super::AuthError;

/// Work factor for newly registered passwords.
const PASSWORD_COST: u32 = 10;

/// Produce the hash persisted in `users.password_hash`.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, PASSWORD_COST)
        .map_err(|e| AuthError::Internal(format!("password hash failed: {e}")))
}

/// Check a login attempt against a stored hash.
///
/// A hash that bcrypt cannot parse is an internal fault, not a wrong password.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, stored_hash)
        .map_err(|e| AuthError::Internal(format!("stored password hash unreadable: {e}")))
}
