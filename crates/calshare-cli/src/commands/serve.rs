//! Start the Calshare server.

use clap::Args;

use calshare_core::config::AppConfig;
use calshare_core::error::AppError;
use calshare_database::migration::run_migrations;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Calshare server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let state = super::connect_state(config).await?;

    if let Some(db) = state.db.as_ref().filter(|_| !args.no_migrate) {
        println!("Running database migrations...");
        run_migrations(db.pool()).await?;
    }

    calshare_api::run_server(state).await
}
