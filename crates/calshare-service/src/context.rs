//! Context for requests made by an authenticated calendar owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated owner behind a request.
///
/// Every owner-scoped store call filters on `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl OwnerContext {
    /// Create a context for `user_id` stamped with the current time.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
