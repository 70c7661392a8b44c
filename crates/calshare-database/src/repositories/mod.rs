//! PostgreSQL implementations of the store traits.

pub mod calendar;
pub mod event;
pub mod shared_link;

pub use calendar::CalendarRepository;
pub use event::EventRepository;
pub use shared_link::SharedLinkRepository;

use calshare_core::error::{AppError, ErrorCode, ErrorKind};

/// Map a sqlx error, turning unique violations into conflicts.
pub(crate) fn db_error(context: &'static str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return AppError::with_source(ErrorKind::Conflict, context, err)
                .with_code(ErrorCode::Conflict);
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}
