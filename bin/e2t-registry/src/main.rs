use anyhow::{Context, Result};
use e2t_core::{Configuration, E2TInstancesManager, InMemoryStore, RnibDataService};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "E2T_REGISTRY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/e2t-registry.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid logging level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting e2t-registry...");
    info!("  - Store retry interval: {}ms", config.rnib_retry_interval_ms);
    info!("  - Max store connection attempts: {}", config.max_rnib_connection_attempts);

    let store = Arc::new(InMemoryStore::new());
    let data_service = RnibDataService::new(config.retry_config(), store.clone(), store);
    let manager = E2TInstancesManager::new(Arc::new(data_service));
    info!("E2T instances manager initialized");

    for address in &config.e2t_instances {
        match manager.add_e2t_instance(address).await {
            Ok(()) => info!("Registered E2T instance {}", address),
            Err(e) => error!("Error registering E2T instance {}: {}", address, e),
        }
    }

    match manager.select_e2t_instance().await {
        Ok(address) => info!("New RAN connections will be routed to {}", address),
        Err(e) if e.is_no_instances_available() => warn!("{}", e),
        Err(e) => error!("Error selecting E2T instance: {}", e),
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting...");

    Ok(())
}

/// Load configuration from the first argument, the environment, or the default path
fn load_config() -> Result<Configuration> {
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());

    match explicit {
        Some(path) => Configuration::load(&path)
            .with_context(|| format!("failed to load configuration from {}", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Configuration::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("failed to load configuration from {}", DEFAULT_CONFIG_PATH)),
        None => Ok(Configuration::default()),
    }
}
