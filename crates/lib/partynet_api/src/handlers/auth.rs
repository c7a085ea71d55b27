//! Authentication request handlers.

use std::convert::Infallible;

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{AuthReply, LoginRequest, RegisterRequest};
use crate::services::auth::{self, Session};
use crate::services::cookies::session_cookie;

/// Login/register body, read as form-urlencoded or JSON depending on the
/// content type.
///
/// Unparseable bodies are treated as bodies with every field missing, so the
/// request ends in "Bad params" rather than an extractor rejection.
#[derive(Debug)]
pub struct AuthBody<T>(pub T);

impl<S, T> FromRequest<S> for AuthBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let body = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| rejection.body_text())
        };

        Ok(AuthBody(body.unwrap_or_else(|rejection| {
            debug!(%rejection, "unusable request body");
            T::default()
        })))
    }
}

/// Reply with the token in the body and in the session cookie.
fn session_reply(
    state: &AppState,
    jar: CookieJar,
    session: Session,
    message: &str,
) -> (CookieJar, Json<AuthReply>) {
    let jar = jar.add(session_cookie(
        &session.token,
        state.config.cookie_max_age_secs,
    ));
    let reply = AuthReply {
        success: true,
        message: message.to_string(),
        token: Some(session.token),
        user: Some(session.user.into()),
    };
    (jar, Json(reply))
}

/// `POST /rest/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    AuthBody(body): AuthBody<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthReply>)> {
    let credential = body.into_credential()?;
    let session = auth::login(state.store.as_ref(), &state.tokens, &credential).await?;
    Ok(session_reply(&state, jar, session, "You are now authenticated!"))
}

/// `POST /rest/auth/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    AuthBody(body): AuthBody<RegisterRequest>,
) -> AppResult<(CookieJar, Json<AuthReply>)> {
    // Field validation happens before the store is touched.
    let registration = body.into_registration()?;
    let session = auth::register(state.store.as_ref(), &state.tokens, registration).await?;
    Ok(session_reply(&state, jar, session, "User created"))
}
