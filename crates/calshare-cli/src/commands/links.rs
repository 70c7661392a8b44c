//! Shared link maintenance commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use calshare_core::config::AppConfig;
use calshare_core::error::AppError;
use calshare_entity::shared_link::SharingStats;
use calshare_service::SharedLinkService;

use crate::output::{self, OutputFormat};

/// Arguments for the links command
#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

/// Shared link subcommands
#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// Delete every expired shared link
    Cleanup,
    /// Show link counts for one calendar and owner
    Stats {
        /// Calendar ID
        #[arg(long)]
        calendar: Uuid,
        /// Owner user ID
        #[arg(long)]
        user: Uuid,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Active")]
    active: u64,
    #[tabled(rename = "Expired")]
    expired: u64,
    #[tabled(rename = "Password protected")]
    password_protected: u64,
}

impl From<SharingStats> for StatsRow {
    fn from(stats: SharingStats) -> Self {
        Self {
            total: stats.total_links,
            active: stats.active_links,
            expired: stats.expired_links,
            password_protected: stats.password_protected_links,
        }
    }
}

/// Execute link commands
pub async fn execute(
    args: &LinksArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect_state(config).await?;

    match &args.command {
        LinksCommand::Cleanup => {
            let removed = cleanup(&state.share_service).await?;
            if removed == 0 {
                output::print_warning("No expired shared links found.");
            } else {
                output::print_success(&format!("Removed {removed} expired shared link(s)."));
            }
        }
        LinksCommand::Stats { calendar, user } => {
            let row = stats(&state.share_service, *calendar, *user).await?;
            output::print_rows(&[row], format);
        }
    }

    Ok(())
}

async fn cleanup(service: &SharedLinkService) -> Result<u64, AppError> {
    service.cleanup_expired_links().await
}

async fn stats(
    service: &SharedLinkService,
    calendar_id: Uuid,
    user_id: Uuid,
) -> Result<StatsRow, AppError> {
    let stats = service
        .get_calendar_sharing_stats(calendar_id, user_id)
        .await?;
    Ok(StatsRow::from(stats))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use calshare_auth::{LinkPasswordHasher, ShareTokenManager, TokenSecret};
    use calshare_core::config::ShareConfig;
    use calshare_database::memory::{MemoryCalendarStore, MemorySharedLinkStore};
    use calshare_service::OwnerContext;
    use calshare_service::share::CreateSharedLinkRequest;
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn test_cleanup_then_stats() {
        let calendars = MemoryCalendarStore::new();
        let owner = OwnerContext::new(Uuid::new_v4());
        let calendar_id = calendars.create(owner.user_id, "Ops").id;
        let secret = TokenSecret::new("cli-links-test-secret-at-least-32-chars").unwrap();
        let service = SharedLinkService::new(
            Arc::new(MemorySharedLinkStore::new()),
            Arc::new(calendars),
            Arc::new(ShareTokenManager::new(&ShareConfig::default(), secret)),
            Arc::new(LinkPasswordHasher::default()),
        );

        for expires_at in [Some(Utc::now() - Duration::days(1)), None] {
            service
                .create_shared_link(
                    &owner,
                    CreateSharedLinkRequest {
                        calendar_id,
                        password: Some("hunter2".to_string()),
                        expires_at,
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let row = stats(&service, calendar_id, owner.user_id).await.unwrap();
        assert_eq!((row.total, row.active, row.expired), (2, 1, 1));
        assert_eq!(row.password_protected, 2);

        assert_eq!(cleanup(&service).await.unwrap(), 1);
        assert_eq!(cleanup(&service).await.unwrap(), 0);

        let row = stats(&service, calendar_id, owner.user_id).await.unwrap();
        assert_eq!((row.total, row.active, row.expired), (1, 1, 0));
    }
}
