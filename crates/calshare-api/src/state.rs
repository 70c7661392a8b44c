//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use calshare_auth::{JwtDecoder, LinkPasswordHasher, ShareTokenManager, TokenSecret};
use calshare_core::config::AppConfig;
use calshare_database::DatabasePool;
use calshare_database::repositories::{CalendarRepository, EventRepository, SharedLinkRepository};
use calshare_database::store::{CalendarStore, EventStore, SharedLinkStore};
use calshare_service::{CalendarService, EventService, PermissionValidator, SharedLinkService};

/// The store backends the services run against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Shared link records.
    pub links: Arc<dyn SharedLinkStore>,
    /// Calendar events.
    pub events: Arc<dyn EventStore>,
    /// Owner calendars.
    pub calendars: Arc<dyn CalendarStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        Self {
            links: Arc::new(SharedLinkRepository::new(db.pool().clone())),
            events: Arc::new(EventRepository::new(db.pool().clone())),
            calendars: Arc::new(CalendarRepository::new(db.pool().clone())),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; absent when running on in-memory stores
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Owner session verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Shared link lifecycle
    pub share_service: Arc<SharedLinkService>,
    /// Token-bearer authorization
    pub permission_validator: Arc<PermissionValidator>,
    /// Event operations
    pub event_service: Arc<EventService>,
    /// Owner calendar management
    pub calendar_service: Arc<CalendarService>,
}

impl AppState {
    /// Wire every service from configuration, the token secret and stores.
    pub fn new(
        config: AppConfig,
        secret: TokenSecret,
        stores: Stores,
        db: Option<DatabasePool>,
    ) -> Self {
        let tokens = Arc::new(ShareTokenManager::new(&config.share, secret));
        let hasher = Arc::new(LinkPasswordHasher::new(config.share.password_scheme));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let share_service = Arc::new(SharedLinkService::new(
            Arc::clone(&stores.links),
            Arc::clone(&stores.calendars),
            tokens,
            hasher,
        ));
        let permission_validator = Arc::new(PermissionValidator::new(Arc::clone(&share_service)));
        let event_service = Arc::new(EventService::new(
            Arc::clone(&stores.events),
            Arc::clone(&stores.calendars),
            Arc::clone(&permission_validator),
        ));
        let calendar_service = Arc::new(CalendarService::new(
            Arc::clone(&stores.calendars),
            Arc::clone(&stores.events),
            Arc::clone(&stores.links),
        ));

        Self {
            config: Arc::new(config),
            db,
            jwt_decoder,
            share_service,
            permission_validator,
            event_service,
            calendar_service,
        }
    }
}
