//! CLI command definitions and dispatch.

pub mod links;
pub mod migrate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use calshare_api::AppState;
use calshare_api::state::Stores;
use calshare_auth::TokenSecret;
use calshare_core::config::AppConfig;
use calshare_core::error::AppError;
use calshare_database::DatabasePool;

use crate::output::OutputFormat;

/// Calshare: calendar sharing service
#[derive(Debug, Parser)]
#[command(name = "calshare", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay, loaded from `config/{env}`
    #[arg(short, long, env = "CALSHARE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate,
    /// Shared link maintenance
    Links(links::LinksArgs),
    /// Share token diagnostics
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Links(args) => links::execute(args, config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format),
        }
    }
}

/// Helper: load the token secret named by the configuration
pub fn load_secret(config: &AppConfig) -> Result<TokenSecret, AppError> {
    TokenSecret::from_env(&config.share.secret_env).map_err(AppError::from)
}

/// Helper: connect to PostgreSQL and wire services over it
pub async fn connect_state(config: AppConfig) -> Result<AppState, AppError> {
    let secret = load_secret(&config)?;
    let db = DatabasePool::connect(&config.database).await?;
    let stores = Stores::postgres(&db);
    Ok(AppState::new(config, secret, stores, Some(db)))
}
