//! gymdesk server binary

use anyhow::{Context, Result};
use gymdesk::config::ServerConfig;
use gymdesk::server::ServerBuilder;
use gymdesk::storage::Stores;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gymdesk=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("GYMDESK_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => ServerConfig::default(),
    }
    .with_env_overrides()?;
    config.validate()?;

    let stores = Stores::connect(&config.storage).await?;

    ServerBuilder::new(config).with_stores(stores).serve().await
}
