//! Credential verification against the user store.

use tracing::debug;

use super::password::verify_password;
use super::{AuthError, AuthOutcome};
use crate::models::auth::{Credential, UserRecord};
use crate::store::UserStore;

/// Check a submitted email + password against the stored user.
///
/// Returns `UserNotFound` when no user has that email and
/// `InvalidCredentials` when the password does not match its bcrypt hash.
/// Store failures are errors, not outcomes.
pub async fn verify_credentials(
    store: &dyn UserStore,
    credential: &Credential,
) -> Result<AuthOutcome<UserRecord>, AuthError> {
    if credential.email.is_empty() {
        return Err(AuthError::MissingField("email"));
    }

    let Some(record) = store.find_user_by_email(&credential.email).await? else {
        debug!(email = %credential.email, "login for unknown user");
        return Ok(AuthOutcome::UserNotFound);
    };

    if !verify_password(&credential.password, &record.password_hash)? {
        debug!(user_id = %record.user.id, "login with wrong password");
        return Ok(AuthOutcome::InvalidCredentials);
    }

    Ok(AuthOutcome::Authenticated(record))
}
