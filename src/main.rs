//! DAM Hub Server: directory trees and file versions for digital assets.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use dam_api::AppState;
use dam_core::config::{AppConfig, StoreBackend};
use dam_core::error::AppError;
use dam_database::{DatabasePool, MemoryStore, RepositorySet};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let base = std::env::var("DAM_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("DAM_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Open the store, build the state, and serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.store.backend,
        "Starting DAM Hub"
    );

    let (repos, db_pool) = match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            (RepositorySet::memory(MemoryStore::new()), None)
        }
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                dam_database::migration::run_migrations(pool.pool()).await?;
            }
            (RepositorySet::postgres(&pool), Some(pool))
        }
    };

    let state = AppState::new(config, repos, db_pool.clone());
    let result = dam_api::run_server(state).await;

    if let Some(pool) = db_pool {
        pool.close().await;
    }
    result
}
