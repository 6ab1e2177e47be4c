//! Immutable swipe event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SongId, UserId};

/// One like/dislike decision, as stored in the swipe ledger.
///
/// Append-only: once written a `SwipeEvent` is never updated or deleted.
/// Repeated swipes on the same `(user, song)` pair produce distinct rows —
/// the full history is retained for audit, and the pending-set resolver
/// collapses to distinct songs at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeEvent {
    /// Store-assigned row id; breaks ties when timestamps collide.
    pub id: i64,
    /// User who swiped.
    pub user: UserId,
    /// Song that was swiped.
    pub song: SongId,
    /// `true` for a like (right swipe), `false` for a dislike.
    pub liked: bool,
    /// Write-time timestamp assigned by the store.
    pub swiped_at: DateTime<Utc>,
}
