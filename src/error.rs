//! Ledger error types.
//!
//! [`LedgerError`] is the central error type for the crate. Validation
//! failures are rejected before any append happens; storage faults are
//! surfaced to the caller unretried — the embedding transport layer owns
//! the retry policy.

/// Error enum for all ledger operations.
///
/// Only three failure classes exist. `record_watermark` in particular has
/// no "nothing pending" error: writing a watermark is unconditional by
/// design and two watermarks in a row are legal (the later one dominates).
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Malformed or missing user identifier; rejected before any append.
    #[error("invalid user identifier: {0}")]
    InvalidUser(String),

    /// Malformed or missing song identifier; rejected before any append.
    #[error("invalid song identifier: {0}")]
    InvalidSong(String),

    /// Underlying append or scan failed. Not retried internally.
    #[error("storage fault: {0}")]
    StorageFault(String),
}

impl LedgerError {
    /// Whether the embedding layer may retry the failed operation.
    ///
    /// Storage faults are transient from the ledger's point of view;
    /// validation failures never succeed on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::StorageFault(_) => true,
            Self::InvalidUser(_) | Self::InvalidSong(_) => false,
        }
    }
}
