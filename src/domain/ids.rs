//! Type-safe user and song identifiers.
//!
//! [`UserId`] and [`SongId`] are newtype wrappers around validated strings.
//! Both identifiers originate outside this crate (account names and catalog
//! track ids), so construction is fallible: validation here is what
//! guarantees that no append ever carries a malformed identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Maximum accepted identifier length, matching the column width of the
/// original schema.
const MAX_ID_LEN: usize = 255;

/// Validates the raw identifier shared by both id types.
fn validate(raw: &str) -> Result<&str, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(format!("exceeds {MAX_ID_LEN} bytes"));
    }
    if trimmed.contains('\0') {
        return Err("must not contain NUL".to_string());
    }
    Ok(trimmed)
}

/// Identifier of a user account.
///
/// Opaque to the ledger; the account system that mints these is an
/// external collaborator. Used as the partition key for both logs: every
/// append and every scan is scoped to exactly one `UserId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Validates and wraps a raw user identifier.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidUser`] when the identifier is empty,
    /// longer than 255 bytes, or contains a NUL byte.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LedgerError> {
        validate(raw.as_ref())
            .map(|s| Self(s.to_string()))
            .map_err(LedgerError::InvalidUser)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a song in the external music catalog.
///
/// The ledger never resolves these to track metadata; it only needs
/// equality (for the distinct projection of the pending set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Validates and wraps a raw song identifier.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidSong`] when the identifier is empty,
    /// longer than 255 bytes, or contains a NUL byte.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LedgerError> {
        validate(raw.as_ref())
            .map(|s| Self(s.to_string()))
            .map_err(LedgerError::InvalidSong)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SongId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
