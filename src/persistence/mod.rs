//! Persistence layer: the append/scan storage capability.
//!
//! [`LedgerStore`] is the seam between the ledger's semantics and durable
//! storage. The service layer receives a store by injection rather than
//! reading any ambient global connection, so the same operations run
//! against [`postgres::PostgresLedger`] in production and
//! [`memory::MemoryLedger`] in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{SongId, SwipeEvent, UserId, WatermarkEvent};
use crate::error::LedgerError;

/// Durable append-only storage for the two ledger tables.
///
/// # Contract
///
/// - Appends are single atomic row writes, durable before the method
///   returns, and the store assigns the write-time timestamp. Per store,
///   assigned timestamps are monotonically non-decreasing in write order.
/// - Scans return every row for the given user, ascending by
///   `(timestamp, id)`, and observe every row of that table committed
///   before the scan started (a per-table committed prefix). Cross-table
///   consistency is not a scan guarantee; the service layer obtains it by
///   scanning swipes before watermarks, so no swipe is ever evaluated
///   against a watermark set older than the one committed before it.
/// - Rows are never mutated or deleted through this trait.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends one swipe event, returning it with its assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StorageFault`] if the write fails.
    async fn append_swipe(
        &self,
        user: &UserId,
        song: &SongId,
        liked: bool,
    ) -> Result<SwipeEvent, LedgerError>;

    /// Appends one watermark event, returning it with its assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StorageFault`] if the write fails.
    async fn append_watermark(&self, user: &UserId) -> Result<WatermarkEvent, LedgerError>;

    /// Returns all swipe events for `user`, ascending `(swiped_at, id)`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StorageFault`] if the read fails.
    async fn scan_swipes(&self, user: &UserId) -> Result<Vec<SwipeEvent>, LedgerError>;

    /// Returns all watermark events for `user`, ascending `(created_at, id)`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StorageFault`] if the read fails.
    async fn scan_watermarks(&self, user: &UserId) -> Result<Vec<WatermarkEvent>, LedgerError>;
}
