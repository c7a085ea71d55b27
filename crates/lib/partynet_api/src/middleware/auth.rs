//! Authentication middleware — session token extraction and JWT verification.
//!
//! The token is looked up in, first match wins:
//! 1. body field `token` (JSON object or form-urlencoded)
//! 2. query parameter `token`
//! 3. header `x-access-token`
//! 4. cookie `jwt_token_value`

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, header::CONTENT_TYPE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use partynet_core::auth::{AuthOutcome, TokenCodec};
use partynet_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::SESSION_COOKIE;

/// Name of the token field in bodies and query strings.
pub const TOKEN_FIELD: &str = "token";

/// Header carrying the token for API clients.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Largest body the middleware buffers while looking for a token. Larger
/// bodies are dropped and the token is looked up in the remaining sources.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Where a token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Body,
    Query,
    Header,
    Cookie,
}

/// Find the request's session token, honouring the documented precedence.
///
/// Empty values are treated as absent.
pub fn extract_token(parts: &Parts, body: &[u8]) -> Option<(TokenSource, String)> {
    token_from_body(&parts.headers, body)
        .map(|t| (TokenSource::Body, t))
        .or_else(|| {
            parts
                .uri
                .query()
                .and_then(form_token)
                .map(|t| (TokenSource::Query, t))
        })
        .or_else(|| {
            parts
                .headers
                .get(TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(|t| (TokenSource::Header, t.to_string()))
        })
        .or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
                .map(|t| (TokenSource::Cookie, t))
        })
}

fn token_from_body(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let is_form = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
    if is_form {
        return std::str::from_utf8(body).ok().and_then(form_token);
    }
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get(TOKEN_FIELD)
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn form_token(encoded: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .find(|(k, v)| k == TOKEN_FIELD && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Decide whether a (possibly absent) token admits the request.
pub fn authenticate(tokens: &TokenCodec, token: Option<&str>) -> AuthOutcome<TokenClaims> {
    match token {
        None => AuthOutcome::NoToken,
        Some(token) => match tokens.verify(token) {
            Ok(claims) => AuthOutcome::Authenticated(claims),
            Err(e) => AuthOutcome::InvalidToken(e),
        },
    }
}

/// Axum middleware: finds the session token, verifies it, and injects
/// `AuthenticatedUser` into request extensions.
///
/// Requests without a token get 403; requests with a bad or expired token
/// get the "failed to authenticate" reply. Either way the handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    // An oversized or broken body carries no token; the other sources still count.
    let body: Bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(reason = %e, path = %parts.uri.path(), "request body skipped");
            Bytes::new()
        }
    };

    let found = extract_token(&parts, &body);
    let source = found.as_ref().map(|(source, _)| *source);

    let claims = authenticate(&state.tokens, found.as_ref().map(|(_, t)| t.as_str()))
        .into_result()
        .map_err(|e| {
            debug!(?source, reason = %e, path = %parts.uri.path(), "request rejected");
            AppError::from(e)
        })?;

    debug!(?source, user_id = %claims.sub, "request authenticated");
    parts.extensions.insert(AuthenticatedUser(claims));

    Ok(next.run(Request::from_parts(parts, Body::from(body))).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use chrono::{Duration, Utc};
    use partynet_core::auth::TokenError;
    use partynet_core::models::auth::User;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    fn user() -> User {
        User {
            id: "u-1".into(),
            login: "party".into(),
            email: "a@x.com".into(),
            avatar_url: String::new(),
            preferred_public_group: String::new(),
            open_id: String::new(),
            description: String::new(),
            admin: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_token_anywhere() {
        let p = parts(HttpRequest::get("/rest"));
        assert_eq!(extract_token(&p, b""), None);
    }

    #[test]
    fn body_beats_query_header_and_cookie() {
        let p = parts(
            HttpRequest::post("/rest?token=from-query")
                .header(CONTENT_TYPE, "application/json")
                .header(TOKEN_HEADER, "from-header")
                .header("cookie", "jwt_token_value=from-cookie"),
        );
        let found = extract_token(&p, br#"{"token":"from-body"}"#);
        assert_eq!(found, Some((TokenSource::Body, "from-body".into())));
    }

    #[test]
    fn form_body_token_is_read() {
        let p = parts(
            HttpRequest::post("/rest")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
        );
        let found = extract_token(&p, b"a=1&token=from%20form");
        assert_eq!(found, Some((TokenSource::Body, "from form".into())));
    }

    #[test]
    fn query_beats_header() {
        let p = parts(HttpRequest::get("/rest?x=1&token=q").header(TOKEN_HEADER, "h"));
        assert_eq!(extract_token(&p, b""), Some((TokenSource::Query, "q".into())));
    }

    #[test]
    fn header_beats_cookie() {
        let p = parts(
            HttpRequest::get("/rest")
                .header(TOKEN_HEADER, "h")
                .header("cookie", "other=1; jwt_token_value=c"),
        );
        assert_eq!(extract_token(&p, b""), Some((TokenSource::Header, "h".into())));
    }

    #[test]
    fn cookie_is_last_resort() {
        let p = parts(HttpRequest::get("/rest").header("cookie", "jwt_token_value=c"));
        assert_eq!(extract_token(&p, b""), Some((TokenSource::Cookie, "c".into())));
    }

    #[test]
    fn empty_values_fall_through() {
        let p = parts(
            HttpRequest::post("/rest?token=")
                .header(TOKEN_HEADER, "")
                .header("cookie", "jwt_token_value=c"),
        );
        let found = extract_token(&p, br#"{"token":""}"#);
        assert_eq!(found, Some((TokenSource::Cookie, "c".into())));
    }

    #[test]
    fn non_json_body_is_ignored() {
        let p = parts(HttpRequest::post("/rest").header(TOKEN_HEADER, "h"));
        assert_eq!(
            extract_token(&p, b"not json"),
            Some((TokenSource::Header, "h".into()))
        );
    }

    #[test]
    fn authenticate_outcomes() {
        let codec = TokenCodec::new(b"secret", Duration::hours(48));
        assert_eq!(authenticate(&codec, None), AuthOutcome::NoToken);
        assert_eq!(
            authenticate(&codec, Some("garbage")),
            AuthOutcome::InvalidToken(TokenError::Invalid)
        );

        let stale = codec
            .issue_at(&user(), Utc::now() - Duration::hours(48))
            .unwrap();
        assert_eq!(
            authenticate(&codec, Some(&stale)),
            AuthOutcome::InvalidToken(TokenError::Expired)
        );

        let fresh = codec.issue(&user()).unwrap();
        match authenticate(&codec, Some(&fresh)) {
            AuthOutcome::Authenticated(claims) => assert_eq!(claims.sub, "u-1"),
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }
}
