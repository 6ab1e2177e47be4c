//! Immutable playlist-creation watermark record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A playlist-creation marker in the watermark log.
///
/// Writing one retroactively marks every swipe of that user at or before
/// `created_at` as consumed. Watermarks are never validated against the
/// swipe ledger: a user may have zero or many, and only the maximum
/// `created_at` matters (the *effective watermark*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkEvent {
    /// Store-assigned row id.
    pub id: i64,
    /// User whose swipes the watermark consumes.
    pub user: UserId,
    /// Write-time timestamp assigned by the store; the consumption boundary.
    pub created_at: DateTime<Utc>,
}
