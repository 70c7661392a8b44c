//! Share token diagnostics.

use clap::{Args, Subcommand};
use serde::Serialize;

use calshare_auth::ShareTokenManager;
use calshare_core::config::AppConfig;
use calshare_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Validate a token against the configured secret and report each check
    Inspect {
        /// The share token
        token: String,
    },
}

#[derive(Debug, Serialize)]
struct InspectReport {
    is_valid: bool,
    has_valid_format: bool,
    has_valid_prefix: bool,
    has_valid_checksum: bool,
    calendar_id: Option<String>,
    random_prefix: Option<String>,
    error: Option<String>,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Inspect { token } => {
            let secret = super::load_secret(config)?;
            let manager = ShareTokenManager::new(&config.share, secret);
            let validation = manager.validate(token)?;

            let report = InspectReport {
                is_valid: validation.is_valid,
                has_valid_format: validation.details.has_valid_format,
                has_valid_prefix: validation.details.has_valid_prefix,
                has_valid_checksum: validation.details.has_valid_checksum,
                calendar_id: validation
                    .calendar_id
                    .or_else(|| manager.extract_calendar_id(token)),
                random_prefix: manager
                    .extract_random_component(token)
                    .map(|r| r.chars().take(8).collect()),
                error: validation.error.map(|e| e.code().to_string()),
            };

            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => print_report(&report),
            }
        }
    }
    Ok(())
}

fn print_report(report: &InspectReport) {
    let flag = |ok: bool| if ok { "yes" } else { "no" };
    output::print_kv("Valid", flag(report.is_valid));
    output::print_kv("Format", flag(report.has_valid_format));
    output::print_kv("Prefix", flag(report.has_valid_prefix));
    output::print_kv("Checksum", flag(report.has_valid_checksum));
    output::print_kv(
        "Calendar ID",
        report.calendar_id.as_deref().unwrap_or("-"),
    );
    output::print_kv(
        "Random component",
        &report
            .random_prefix
            .as_ref()
            .map(|p| format!("{p}…"))
            .unwrap_or_else(|| "-".to_string()),
    );
    if let Some(ref code) = report.error {
        output::print_warning(code);
    }
}
