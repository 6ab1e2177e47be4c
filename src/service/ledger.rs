//! Ledger service: the operations exposed to the embedding layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::resolver;
use super::resolver::LedgerState;
use crate::domain::{SongId, SwipeEvent, UserId, WatermarkEvent};
use crate::error::LedgerError;
use crate::persistence::LedgerStore;

/// Orchestration layer over a [`LedgerStore`].
///
/// Stateless coordinator: every operation validates its identifiers,
/// performs at most one append or the scans it needs, and derives results
/// with the pure functions in [`resolver`]. The store is injected, never
/// ambient, so the same service runs against Postgres in production and
/// the in-memory store in tests.
#[derive(Debug)]
pub struct LedgerService<S: LedgerStore> {
    store: Arc<S>,
}

// Manual impl: the store is shared through the Arc, so cloning the service
// must not require S: Clone.
impl<S: LedgerStore> Clone for LedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a new `LedgerService` around the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records one like/dislike decision.
    ///
    /// The event is durably appended with a store-assigned timestamp and
    /// returned as written. Repeated swipes on the same song are allowed
    /// and all retained.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] or [`LedgerError::InvalidSong`]
    /// before anything is written, or [`LedgerError::StorageFault`] if the
    /// append fails.
    pub async fn record_swipe(
        &self,
        user: &str,
        song: &str,
        liked: bool,
    ) -> Result<SwipeEvent, LedgerError> {
        let user = UserId::new(user)?;
        let song = SongId::new(song)?;

        let event = self.store.append_swipe(&user, &song, liked).await?;
        tracing::debug!(%user, %song, liked, at = %event.swiped_at, "swipe recorded");
        Ok(event)
    }

    /// Records a playlist-creation watermark for the user.
    ///
    /// Unconditional: it neither reads the swipe ledger nor checks that
    /// anything is pending, and calling it twice writes two watermarks
    /// (the later one dominates). Swipes recorded concurrently with or
    /// after the watermark stay pending.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] before anything is written, or
    /// [`LedgerError::StorageFault`] if the append fails.
    pub async fn record_watermark(&self, user: &str) -> Result<WatermarkEvent, LedgerError> {
        let user = UserId::new(user)?;

        let event = self.store.append_watermark(&user).await?;
        tracing::info!(%user, at = %event.created_at, "watermark recorded");
        Ok(event)
    }

    /// Returns the distinct songs the user has swiped since their last
    /// watermark, in first-swipe order.
    ///
    /// With `liked_only`, dislikes are filtered out before the distinct
    /// projection. An empty result is not an error — it simply means the
    /// user has no unconsumed swipes.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] or, if a scan fails,
    /// [`LedgerError::StorageFault`].
    pub async fn pending_songs(
        &self,
        user: &str,
        liked_only: bool,
    ) -> Result<Vec<SongId>, LedgerError> {
        let user = UserId::new(user)?;

        // Swipes must be scanned before watermarks: a watermark committed
        // between the two scans is then seen without its later swipes,
        // which only errs toward "consumed". The reverse order can observe
        // a swipe without a watermark committed before it and resurface
        // already-consumed songs.
        let swipes = self.store.scan_swipes(&user).await?;
        let boundary = resolver::effective_watermark(&self.store.scan_watermarks(&user).await?);
        let pending = resolver::pending_songs(&swipes, boundary, liked_only);

        tracing::debug!(%user, liked_only, count = pending.len(), "pending set resolved");
        Ok(pending)
    }

    /// Returns the user's current consumption boundary, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] or, if the scan fails,
    /// [`LedgerError::StorageFault`].
    pub async fn effective_watermark(
        &self,
        user: &str,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        let user = UserId::new(user)?;
        let watermarks = self.store.scan_watermarks(&user).await?;
        Ok(resolver::effective_watermark(&watermarks))
    }

    /// Returns the user's full swipe history, consumed rows included,
    /// ascending by swipe time.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] or, if the scan fails,
    /// [`LedgerError::StorageFault`].
    pub async fn swipe_history(&self, user: &str) -> Result<Vec<SwipeEvent>, LedgerError> {
        let user = UserId::new(user)?;
        self.store.scan_swipes(&user).await
    }

    /// Classifies the user's ledger as Open or Drained.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] or, if a scan fails,
    /// [`LedgerError::StorageFault`].
    pub async fn state(&self, user: &str) -> Result<LedgerState, LedgerError> {
        let user = UserId::new(user)?;

        // Same scan order as `pending_songs`, for the same reason.
        let swipes = self.store.scan_swipes(&user).await?;
        let boundary = resolver::effective_watermark(&self.store.scan_watermarks(&user).await?);
        Ok(resolver::ledger_state(&swipes, boundary))
    }
}
