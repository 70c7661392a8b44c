//! Calshare Server: calendar sharing over signed links.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use calshare_api::AppState;
use calshare_api::state::Stores;
use calshare_auth::TokenSecret;
use calshare_core::config::{AppConfig, LoggingConfig};
use calshare_core::error::AppError;
use calshare_database::DatabasePool;
use calshare_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!(code = %e.code, error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let base = std::env::var("CALSHARE_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("CALSHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
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

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Calshare");

    // ── Step 1: Token secret ─────────────────────────────────────
    let secret = TokenSecret::from_env(&config.share.secret_env)?;

    // ── Step 2: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 3: Services + HTTP server ───────────────────────────
    let stores = Stores::postgres(&db);
    let state = AppState::new(config, secret, stores, Some(db.clone()));

    let result = calshare_api::run_server(state).await;
    db.close().await;
    result
}
