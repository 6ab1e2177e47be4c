//! In-memory implementation of the storage capability.
//!
//! Backs the test suite and embedded use. Both logs live behind a single
//! `tokio::sync::RwLock`, so a scan always observes a consistent prefix of
//! the write order: it can never see a swipe without the watermarks that
//! were appended before it.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::LedgerStore;
use crate::domain::{SongId, SwipeEvent, UserId, WatermarkEvent};
use crate::error::LedgerError;

/// Both append-only logs plus the write-clock state.
#[derive(Debug, Default)]
struct Logs {
    swipes: Vec<SwipeEvent>,
    watermarks: Vec<WatermarkEvent>,
    next_id: i64,
    last_assigned: Option<DateTime<Utc>>,
}

impl Logs {
    /// Assigns the next row id.
    fn take_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Assigns a strictly monotonic write-time timestamp.
    ///
    /// The wall clock can repeat under coarse resolution; clamping to one
    /// microsecond past the previous assignment keeps per-store timestamps
    /// strictly increasing, as the store contract requires.
    fn take_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_assigned {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        self.last_assigned = Some(ts);
        ts
    }
}

/// In-memory ledger store.
///
/// # Concurrency
///
/// - Appends take the write lock; one append is one atomic log mutation.
/// - Scans take the read lock and may run concurrently with each other.
/// - Appends for different users still serialize on the single lock; this
///   store trades the per-user parallelism a database offers for snapshot
///   simplicity.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    logs: RwLock<Logs>,
}

impl MemoryLedger {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryLedger {
    async fn append_swipe(
        &self,
        user: &UserId,
        song: &SongId,
        liked: bool,
    ) -> Result<SwipeEvent, LedgerError> {
        let mut logs = self.logs.write().await;
        let event = SwipeEvent {
            id: logs.take_id(),
            user: user.clone(),
            song: song.clone(),
            liked,
            swiped_at: logs.take_timestamp(),
        };
        logs.swipes.push(event.clone());
        Ok(event)
    }

    async fn append_watermark(&self, user: &UserId) -> Result<WatermarkEvent, LedgerError> {
        let mut logs = self.logs.write().await;
        let event = WatermarkEvent {
            id: logs.take_id(),
            user: user.clone(),
            created_at: logs.take_timestamp(),
        };
        logs.watermarks.push(event.clone());
        Ok(event)
    }

    async fn scan_swipes(&self, user: &UserId) -> Result<Vec<SwipeEvent>, LedgerError> {
        let logs = self.logs.read().await;
        // Append order already is (timestamp, id) order.
        Ok(logs
            .swipes
            .iter()
            .filter(|e| &e.user == user)
            .cloned()
            .collect())
    }

    async fn scan_watermarks(&self, user: &UserId) -> Result<Vec<WatermarkEvent>, LedgerError> {
        let logs = self.logs.read().await;
        Ok(logs
            .watermarks
            .iter()
            .filter(|e| &e.user == user)
            .cloned()
            .collect())
    }
}
