//! PostgreSQL pool for the postgres store backend.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use dam_core::config::DatabaseConfig;
use dam_core::error::{AppError, ErrorKind};

/// The shared connection pool behind the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
    endpoint: String,
}

impl DatabasePool {
    /// Check `config` and open the pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        config.check()?;
        let endpoint = config.endpoint().to_string();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to open the directory store at {endpoint}"),
                    e,
                )
            })?;

        info!(
            endpoint = %endpoint,
            pool_min = config.min_connections,
            pool_max = config.max_connections,
            "Directory store connected"
        );
        Ok(Self { pool, endpoint })
    }

    /// The sqlx pool the repositories share.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether the store answers a trivial query. Failures are logged, not returned.
    pub async fn ping(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool).await {
            Ok(1) => true,
            Ok(_) => false,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Directory store ping failed");
                false
            }
        }
    }

    /// Drain and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(endpoint = %self.endpoint, "Directory store closed");
    }
}
