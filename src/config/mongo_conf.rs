use std::env;

use tracing::{debug, info};

use crate::config::{required_var, ConfigError};

/// Connection settings for the MongoDB deployment backing the site.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Credentials are optional; local instances usually run without auth.
    pub username: Option<String>,
    pub password: Option<String>,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), `MONGO_USERNAME`
    /// and `MONGO_PASSWORD` (optional), `MONGO_POOL_SIZE` (default 10) and
    /// `MONGO_CONNECTION_TIMEOUT` in seconds (default 5).
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment");

        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            pool_size: parsed_or("MONGO_POOL_SIZE", 10)?,
            connection_timeout_secs: parsed_or("MONGO_CONNECTION_TIMEOUT", 5)?,
        };

        config.validate()?;
        debug!(
            database = %config.database,
            pool_size = config.pool_size,
            "MongoDB configuration loaded"
        );
        Ok(config)
    }

    /// Fixed settings for suites that talk to a local test instance.
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "coolbreeze_test".to_string(),
            username: Some("testuser".to_string()),
            password: Some("testpass".to_string()),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            return Err(ConfigError::ValidationError(
                "MongoDB URI cannot be empty".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::ValidationError(
                "MongoDB database cannot be empty".to_string(),
            ));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB pool size must be greater than 0".to_string(),
            ));
        }
        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB connection timeout must be greater than 0".to_string(),
            ));
        }
        // Credentials may be absent, but never blank.
        for secret in [&self.username, &self.password] {
            if matches!(secret, Some(s) if s.is_empty()) {
                return Err(ConfigError::ValidationError(
                    "MongoDB credentials cannot be empty if set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Parses a numeric variable, falling back to `default` when unset.
fn parsed_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("Invalid {name} value"))),
        Err(_) => {
            debug!("{} not set, using default: {}", name, default);
            Ok(default)
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "coolbreeze".to_string(),
            username: None,
            password: None,
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
