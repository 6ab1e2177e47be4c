//! # groover-ledger
//!
//! Swipe ledger and watermark-based pending-set resolver for the Groover
//! playlist builder.
//!
//! Users swipe songs (like/dislike); periodically a playlist is built from
//! the songs swiped so far. Nothing is ever deleted to mark swipes as
//! consumed — instead each playlist creation appends a *watermark*, and a
//! swipe is **pending** for its user iff its timestamp is strictly greater
//! than the user's newest watermark. This crate is that subsystem: two
//! append-only logs and a pure query over them.
//!
//! The HTTP transport, authentication, the music catalog, and
//! recommendation ranking are external collaborators and not part of this
//! crate.
//!
//! ## Architecture
//!
//! ```text
//! Embedding layer (transport, out of scope)
//!     │
//!     ├── LedgerService (service/)      record_swipe / record_watermark /
//!     │        │                        pending_songs / history / state
//!     │        ├── resolver (service/)  pure max-watermark + filter
//!     │        │
//!     │        └── LedgerStore (persistence/)
//!     │               ├── PostgresLedger   sqlx, append-only tables
//!     │               └── MemoryLedger     tests and embedded use
//!     │
//!     └── domain/   UserId, SongId, SwipeEvent, WatermarkEvent
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use groover_ledger::persistence::memory::MemoryLedger;
//! use groover_ledger::service::LedgerService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), groover_ledger::error::LedgerError> {
//! let service = LedgerService::new(Arc::new(MemoryLedger::new()));
//!
//! service.record_swipe("alice", "track-1", true).await?;
//! service.record_swipe("alice", "track-2", false).await?;
//! assert_eq!(service.pending_songs("alice", false).await?.len(), 2);
//!
//! // Building a playlist consumes everything swiped so far.
//! service.record_watermark("alice").await?;
//! assert!(service.pending_songs("alice", false).await?.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

pub use config::LedgerConfig;
pub use domain::{SongId, SwipeEvent, UserId, WatermarkEvent};
pub use error::LedgerError;
pub use persistence::LedgerStore;
pub use service::{LedgerService, LedgerState};
