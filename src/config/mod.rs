use std::env;

use tracing::error;

pub mod admin_user_conf;
pub mod app_conf;
pub mod jwt_conf;
pub mod mongo_conf;

pub use jwt_conf::JwtConfig;
pub use mongo_conf::MongoConfig;

/// Error type shared by every configuration loader.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Reads an environment variable that has no usable default.
pub(crate) fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| {
        error!("{} environment variable not found", name);
        ConfigError::EnvVarNotFound(name.to_string())
    })
}
