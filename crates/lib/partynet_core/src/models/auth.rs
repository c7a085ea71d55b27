//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API response models
//! (which rename fields to camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain user, as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub email: String,
    pub avatar_url: String,
    pub preferred_public_group: String,
    pub open_id: String,
    pub description: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User together with its password hash.
///
/// Only the store and the credential verifier see this type; the hash never
/// leaves the core.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Fields for a user that has not been persisted yet.
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub preferred_public_group: String,
    pub open_id: String,
    pub description: String,
    pub admin: bool,
}

impl NewUser {
    /// A regular user with empty optional profile fields.
    pub fn new(login: &str, email: &str, password_hash: String) -> Self {
        Self {
            login: login.to_string(),
            email: email.to_string(),
            password_hash,
            avatar_url: String::new(),
            preferred_public_group: String::new(),
            open_id: String::new(),
            description: String::new(),
            admin: false,
        }
    }
}

/// Submitted login credential. Never persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// JWT claims embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Display name.
    pub login: String,
    /// Whether the user is an administrator.
    pub admin: bool,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
