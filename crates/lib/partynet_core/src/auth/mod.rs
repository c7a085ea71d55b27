//! Authentication and authorization logic.
//!
//! Provides password hashing, credential checks and session token handling
//! shared by the HTTP layer.

pub mod credentials;
pub mod jwt;
pub mod password;

use thiserror::Error;

use crate::store::StoreError;

pub use jwt::{TokenCodec, TokenError};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("No token present")]
    NoTokenPresent,

    #[error("Token rejected: {0}")]
    TokenInvalidOrExpired(#[from] TokenError),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AuthError::UserAlreadyExists,
            StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
            StoreError::Query(msg) => AuthError::Internal(msg),
        }
    }
}

/// Result of an authentication attempt.
///
/// `T` is what a successful attempt yields: the stored user for a credential
/// check, the decoded claims for a token check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<T> {
    Authenticated(T),
    InvalidCredentials,
    UserNotFound,
    NoToken,
    InvalidToken(TokenError),
}

impl<T> AuthOutcome<T> {
    /// Converts every non-authenticated outcome into its `AuthError`.
    pub fn into_result(self) -> Result<T, AuthError> {
        match self {
            AuthOutcome::Authenticated(value) => Ok(value),
            AuthOutcome::InvalidCredentials => Err(AuthError::InvalidCredentials),
            AuthOutcome::UserNotFound => Err(AuthError::UserNotFound),
            AuthOutcome::NoToken => Err(AuthError::NoTokenPresent),
            AuthOutcome::InvalidToken(e) => Err(AuthError::TokenInvalidOrExpired(e)),
        }
    }
}
