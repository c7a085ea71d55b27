//! Application error types.
//!
//! Auth failures keep the v1 wire contract: HTTP 200 with
//! `{"success": false, "message": ...}`, except a missing token which is 403.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use partynet_core::auth::AuthError;
use partynet_core::store::StoreError;

use crate::models::{AuthReply, ErrorResponse};

pub const MSG_BAD_PARAMS: &str = "Bad params";
pub const MSG_USER_NOT_FOUND: &str = "Authentication failed. User not found.";
pub const MSG_WRONG_PASSWORD: &str = "Authentication failed. Password is wrong.";
pub const MSG_USER_EXISTS: &str = "User already exists";
pub const MSG_NO_TOKEN: &str = "No token provided.";
pub const MSG_BAD_TOKEN: &str = "Failed to authenticate token.";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credential, token or validation failure, answered in the auth envelope.
    #[error(transparent)]
    Auth(AuthError),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    fn auth_reply(e: &AuthError) -> (StatusCode, &'static str) {
        match e {
            AuthError::MissingField(_) => (StatusCode::OK, MSG_BAD_PARAMS),
            AuthError::UserNotFound => (StatusCode::OK, MSG_USER_NOT_FOUND),
            AuthError::InvalidCredentials => (StatusCode::OK, MSG_WRONG_PASSWORD),
            AuthError::UserAlreadyExists => (StatusCode::OK, MSG_USER_EXISTS),
            AuthError::NoTokenPresent => (StatusCode::FORBIDDEN, MSG_NO_TOKEN),
            AuthError::TokenInvalidOrExpired(_) => (StatusCode::OK, MSG_BAD_TOKEN),
            // Never wrapped in `Auth`; see `From<AuthError>`.
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Auth(e) => {
                let (status, message) = Self::auth_reply(e);
                return (status, Json(AuthReply::failure(message))).into_response();
            }
            AppError::StoreUnavailable(m) => {
                error!(reason = %m, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "Service temporarily unavailable",
                )
            }
            AppError::Internal(m) => {
                error!(reason = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
            AuthError::Internal(msg) => AppError::Internal(msg),
            other => AppError::Auth(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::from(AuthError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partynet_core::auth::TokenError;

    #[test]
    fn auth_failures_answer_200_except_missing_token() {
        let resp = AppError::from(AuthError::UserNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = AppError::from(AuthError::TokenInvalidOrExpired(TokenError::Expired))
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = AppError::from(AuthError::NoTokenPresent).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_outage_is_service_unavailable() {
        let err = AppError::from(AuthError::StoreUnavailable("pool timed out".into()));
        assert!(matches!(err, AppError::StoreUnavailable(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
