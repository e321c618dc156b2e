use std::env;

use tracing::{debug, info, warn};

use crate::config::{required_var, ConfigError};

const DEFAULT_ACCESS_MINUTES: i64 = 15;
const DEFAULT_REFRESH_MINUTES: i64 = 10080; // one week

/// Signing and lifetime settings for admin session tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret, at least 32 characters.
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiration: i64,
    /// Refresh token lifetime in minutes.
    pub refresh_token_expiration: i64,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ACCESS_TOKEN_EXPIRY`, `JWT_REFRESH_TOKEN_EXPIRY`,
    /// `JWT_ISSUER` and `JWT_AUDIENCE`. Only the secret is required; the
    /// lifetimes default to 15 minutes and one week.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load("")
    }

    /// Reads the same variables with a `TEST_` prefix, so suites can run
    /// against a config distinct from the deployment one.
    pub fn from_test_env() -> Result<Self, ConfigError> {
        Self::load("TEST_")
    }

    fn load(prefix: &str) -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment");

        let secret_var = format!("{prefix}JWT_SECRET");
        let jwt_secret = required_var(&secret_var)?;
        if jwt_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(format!(
                "{secret_var} must be at least 32 characters long"
            )));
        }

        let access_token_expiration = minutes_var(
            &format!("{prefix}JWT_ACCESS_TOKEN_EXPIRY"),
            DEFAULT_ACCESS_MINUTES,
        )?;
        let refresh_token_expiration = minutes_var(
            &format!("{prefix}JWT_REFRESH_TOKEN_EXPIRY"),
            DEFAULT_REFRESH_MINUTES,
        )?;

        let config = JwtConfig {
            jwt_secret,
            access_token_expiration,
            refresh_token_expiration,
            jwt_issuer: env::var(format!("{prefix}JWT_ISSUER")).ok(),
            jwt_audience: env::var(format!("{prefix}JWT_AUDIENCE")).ok(),
        };

        debug!(
            access_minutes = config.access_token_expiration,
            refresh_minutes = config.refresh_token_expiration,
            "JWT configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }
        if self.access_token_expiration <= 0 || self.refresh_token_expiration <= 0 {
            return Err(ConfigError::ValidationError(
                "Token expirations must be greater than 0".to_string(),
            ));
        }
        if self.access_token_expiration >= self.refresh_token_expiration {
            warn!("Access token lifetime is not shorter than the refresh token lifetime");
        }
        Ok(())
    }
}

/// Reads a lifetime variable in minutes, falling back to `default` when unset.
fn minutes_var(name: &str, default: i64) -> Result<i64, ConfigError> {
    let minutes = match env::var(name) {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue(format!("{name}: {e}")))?,
        Err(_) => default,
    };
    if minutes <= 0 {
        return Err(ConfigError::InvalidValue(format!(
            "{name} must be greater than 0"
        )));
    }
    Ok(minutes)
}

/// Fixture values for tests that do not read the environment.
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes"
                .to_string(),
            access_token_expiration: 15,
            refresh_token_expiration: 10080,
            jwt_issuer: Some("coolbreeze-backend-test".to_string()),
            jwt_audience: Some("coolbreeze-backend-admin".to_string()),
        }
    }
}
