//! Request and response bodies.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use partynet_core::auth::AuthError;
use partynet_core::models::auth::{Credential, TokenClaims, User};

/// `POST /rest/auth/login` body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields must be present and non-empty.
    pub fn into_credential(self) -> Result<Credential, AuthError> {
        Ok(Credential {
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
        })
    }
}

/// `POST /rest/auth/register` body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    /// Display name.
    pub login: Option<String>,
    pub password: Option<String>,
}

/// A register request with every required field present.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub login: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn into_registration(self) -> Result<Registration, AuthError> {
        Ok(Registration {
            email: required(self.email, "email")?,
            login: required(self.login, "login")?,
            password: required(self.password, "password")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AuthError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingField(field))
}

/// User as returned to clients. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub login: String,
    pub email: String,
    pub avatar_url: String,
    pub preferred_public_group: String,
    pub open_id: String,
    pub description: String,
    pub admin: bool,
    pub creation_date: DateTime<Utc>,
}

impl From<User> for AuthUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            login: u.login,
            email: u.email,
            avatar_url: u.avatar_url,
            preferred_public_group: u.preferred_public_group,
            open_id: u.open_id,
            description: u.description,
            admin: u.admin,
            creation_date: u.created_at,
        }
    }
}

/// Envelope for every auth endpoint reply.
///
/// Failures still answer HTTP 200; clients branch on `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthReply {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

impl AuthReply {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
            user: None,
        }
    }
}

/// Identity of the caller, decoded from its session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub email: String,
    pub login: String,
    pub admin: bool,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&TokenClaims> for SessionInfo {
    fn from(c: &TokenClaims) -> Self {
        Self {
            id: c.sub.clone(),
            email: c.email.clone(),
            login: c.login.clone(),
            admin: c.admin,
            issued_at: Utc.timestamp_opt(c.iat, 0).single(),
            expires_at: Utc.timestamp_opt(c.exp, 0).single(),
        }
    }
}

/// `GET /rest/me` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: SessionInfo,
}

/// `GET /rest` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Body of non-auth failures (store outage, internal faults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}
