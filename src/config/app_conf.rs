use std::env;

use tracing::warn;

/// Bind address for the HTTP listener, from `APP_HOST` and `APP_PORT`.
/// Both default to a local development setup.
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

const DEFAULT_PORT: u16 = 8080;

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring unparseable APP_PORT value, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };
        AppConfig { host, port }
    }
}
