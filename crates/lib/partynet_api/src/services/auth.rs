//! Authentication service — login/register flows delegating to `partynet_core::auth`.

use tracing::info;

use partynet_core::auth::credentials::verify_credentials;
use partynet_core::auth::password::hash_password;
use partynet_core::auth::{AuthError, TokenCodec};
use partynet_core::models::auth::{Credential, NewUser, User};
use partynet_core::store::UserStore;

use crate::error::AppResult;
use crate::models::Registration;

/// A freshly issued session token and the user it identifies.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Authenticate with email + password.
pub async fn login(
    store: &dyn UserStore,
    tokens: &TokenCodec,
    credential: &Credential,
) -> AppResult<Session> {
    let record = verify_credentials(store, credential).await?.into_result()?;
    let token = tokens.issue(&record.user)?;
    info!(user_id = %record.user.id, "user logged in");
    Ok(Session {
        token,
        user: record.user,
    })
}

/// Register a new user account and open a session for it.
///
/// The token is issued only after the store has persisted the user, and
/// carries the store-assigned id.
pub async fn register(
    store: &dyn UserStore,
    tokens: &TokenCodec,
    registration: Registration,
) -> AppResult<Session> {
    if store.find_user_by_email(&registration.email).await?.is_some() {
        return Err(AuthError::UserAlreadyExists.into());
    }

    let pw_hash = hash_password(&registration.password)?;

    // A concurrent registration may win the race; the store's unique
    // constraint turns that into `UserAlreadyExists`.
    let user = store
        .create_user(NewUser::new(
            &registration.login,
            &registration.email,
            pw_hash,
        ))
        .await?;

    let token = tokens.issue(&user)?;
    info!(user_id = %user.id, login = %user.login, "user created");
    Ok(Session { token, user })
}
