//! CLI command definitions and dispatch.

pub mod directory;
pub mod file;
pub mod migrate;
pub mod settings;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use dam_core::config::{AppConfig, StoreBackend};
use dam_core::error::AppError;
use dam_core::types::UserId;
use dam_database::{DatabasePool, MemoryStore, RepositorySet};
use dam_service::RequestContext;

use crate::output::OutputFormat;

/// DAM Hub: directory tree and file version administration
#[derive(Debug, Parser)]
#[command(name = "dam", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/<env>.toml`
    #[arg(short, long, env = "DAM_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// User the command acts as
    #[arg(short, long, global = true, env = "DAM_USER_ID")]
    pub user: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Directory tree management
    Directory(directory::DirectoryArgs),
    /// Files and their versions
    File(file::FileArgs),
    /// Per-user storage settings
    Settings(settings::SettingsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::Directory(args) => {
                let ctx = self.context()?;
                directory::execute(args, &config, &ctx, self.format).await
            }
            Commands::File(args) => {
                let ctx = self.context()?;
                file::execute(args, &config, &ctx, self.format).await
            }
            Commands::Settings(args) => {
                let ctx = self.context()?;
                settings::execute(args, &config, &ctx, self.format).await
            }
        }
    }

    /// The acting user's request context.
    fn context(&self) -> Result<RequestContext, AppError> {
        let raw = self
            .user
            .as_deref()
            .ok_or_else(|| AppError::unauthenticated("--user (or DAM_USER_ID) is required"))?;
        let user_id: UserId = raw
            .parse()
            .map_err(|_| AppError::invalid_argument(format!("Invalid user id: {raw}")))?;
        Ok(RequestContext::new(user_id).with_request_id("cli"))
    }
}

/// Open the configured store.
///
/// The memory backend starts empty and is discarded on exit, which only
/// makes sense for dry runs.
pub async fn open_repositories(config: &AppConfig) -> Result<RepositorySet, AppError> {
    match config.store.backend {
        StoreBackend::Memory => Ok(RepositorySet::memory(MemoryStore::new())),
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            Ok(RepositorySet::postgres(&pool))
        }
    }
}

/// Parse a UUID-backed id from a command argument.
pub fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_argument(format!("Invalid {what} id: {raw}")))
}

/// Format a timestamp for table output.
pub fn short_time(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}
