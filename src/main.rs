use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tradepay_engine::api::{AppState, create_router};
use tradepay_engine::config::{ConfigLoader, ServiceConfig};
use tradepay_engine::dunning::{InMemoryRecoveryStore, RecoveryStore};

fn init_tracing(log_level: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let service = ServiceConfig::from_env()?;
    init_tracing(&service.log_level)?;

    let config = ConfigLoader::load(&service.config_dir)?;
    info!(
        config_dir = %service.config_dir.display(),
        tax_year = %config.config().tax().tax_year,
        "Wage configuration loaded"
    );

    let store: Arc<dyn RecoveryStore> = match &service.seed_records {
        Some(path) => {
            let store = InMemoryRecoveryStore::from_json_file(path)?;
            info!(seed = %path.display(), "Recovery records seeded");
            Arc::new(store)
        }
        None => Arc::new(InMemoryRecoveryStore::default()),
    };

    let app = create_router(AppState::new(config, store));

    let addr = service.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Trade pay engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
