//! API server configuration.

use chrono::Duration;
use thiserror::Error;

use partynet_core::auth::jwt::DEFAULT_TOKEN_TTL_HOURS;

/// Default max-age of the session cookie: 15 minutes.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 15 * 60;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT signing secret is not set")]
    MissingSecret,

    #[error("database URL is not set")]
    MissingDatabaseUrl,

    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    pub token_ttl_hours: i64,
    /// Max-age of the `jwt_token_value` cookie in seconds.
    pub cookie_max_age_secs: i64,
}

impl ApiConfig {
    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::NonPositive("token_ttl_hours"));
        }
        if self.cookie_max_age_secs <= 0 {
            return Err(ConfigError::NonPositive("cookie_max_age_secs"));
        }
        Ok(())
    }

    /// Session token lifetime.
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            database_url: String::new(),
            jwt_secret: String::new(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
        }
    }
}
