use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Database,
};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

/// Builds the single MongoDB client and returns the database handle that
/// every repository borrows. Repositories never construct their own client;
/// the handle is passed in explicitly at wiring time.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("CoolBreezeBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout =
        Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client initialized");
    Ok(client.database(&config.database))
}
