//! JWT session token issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use tracing::debug;

use super::AuthError;
use crate::models::auth::{TokenClaims, User};

/// Default session token lifetime: 48 hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 48;

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature or malformed structure.
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,
}

/// Signs and verifies HS256 session tokens with one process-wide secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validity,
        }
    }

    /// How long an issued token stays valid.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token for `user` as if the current time were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            login: user.login.clone(),
            admin: user.admin,
            exp: (now + self.validity).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    /// Verify a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`.
    ///
    /// A token is expired from the second its `exp` is reached.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is checked below against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "token failed to decode");
                TokenError::Invalid
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    fn user() -> User {
        User {
            id: "0191d2f0-0000-7000-8000-000000000001".to_string(),
            login: "user@mail.com".to_string(),
            email: "user@mail.com".to_string(),
            avatar_url: String::new(),
            preferred_public_group: String::new(),
            open_id: String::new(),
            description: String::new(),
            admin: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn verify_returns_issued_claims() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue_at(&user(), now).unwrap();

        let claims = codec.verify_at(&token, now + Duration::hours(1)).unwrap();
        assert_eq!(claims.sub, user().id);
        assert_eq!(claims.email, "user@mail.com");
        assert!(claims.admin);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 48 * 3600);
    }

    #[test]
    fn token_is_valid_until_the_last_second() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue_at(&user(), now).unwrap();
        let last = now + codec.validity() - Duration::seconds(1);
        assert!(codec.verify_at(&token, last).is_ok());
    }

    #[test]
    fn token_expires_at_end_of_window() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue_at(&user(), now).unwrap();

        assert_eq!(
            codec.verify_at(&token, now + codec.validity()),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify_at(&token, now + Duration::days(30)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn verify_uses_wall_clock() {
        let codec = codec();
        let fresh = codec.issue(&user()).unwrap();
        assert!(codec.verify(&fresh).is_ok());

        let stale = codec
            .issue_at(&user(), Utc::now() - Duration::hours(49))
            .unwrap();
        assert_eq!(codec.verify(&stale), Err(TokenError::Expired));
    }

    #[test]
    fn any_altered_payload_byte_is_rejected() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue_at(&user(), now).unwrap();

        let payload_start = token.find('.').unwrap() + 1;
        let payload_end = token.rfind('.').unwrap();
        for i in payload_start..payload_end {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(
                codec.verify_at(&tampered, now),
                Err(TokenError::Invalid),
                "byte {i} altered but token accepted"
            );
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = codec().issue(&user()).unwrap();
        let other = TokenCodec::new(b"another-secret", Duration::hours(48));
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let codec = codec();
        for token in ["", "abc", "a.b.c", "not.a.jwt.at.all"] {
            assert_eq!(codec.verify(token), Err(TokenError::Invalid), "{token:?}");
        }
    }

    #[test]
    fn claims_never_carry_a_password() {
        let token = codec().issue(&user()).unwrap();
        let claims = codec().verify(&token).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 6);
        assert!(!keys.iter().any(|k| k.contains("password")));
    }
}
