//! Pending-set resolution: the pure computation over the two logs.
//!
//! Nothing here touches storage or the clock. The service layer scans the
//! logs and hands the rows to these functions, which keeps the boundary
//! semantics (notably the equal-timestamp tie-break) testable without a
//! store behind them.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::{SongId, SwipeEvent, WatermarkEvent};

/// The Open/Drained view of a user's ledger.
///
/// Derived, never stored. A user flips between the two states as swipes
/// and watermarks are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    /// At least one swipe is newer than every watermark.
    Open,
    /// Every existing swipe is consumed by some watermark.
    Drained,
}

/// Returns the consumption boundary: the maximum `created_at` over the
/// user's watermarks, or `None` when no watermark exists (everything
/// pending).
#[must_use]
pub fn effective_watermark(watermarks: &[WatermarkEvent]) -> Option<DateTime<Utc>> {
    watermarks.iter().map(|w| w.created_at).max()
}

/// Computes the distinct pending songs from a user's swipes and boundary.
///
/// A swipe is pending iff `swiped_at > watermark` — strictly. A swipe
/// whose timestamp equals the boundary counts as consumed, so a playlist's
/// own input swipes cannot reappear when the store's clock is coarse
/// enough to produce ties. With `liked_only`, dislikes are dropped before
/// the distinct projection.
///
/// The result keeps first-swipe order (input order of the scan), which
/// makes repeated queries over unchanged logs compare equal.
#[must_use]
pub fn pending_songs(
    swipes: &[SwipeEvent],
    watermark: Option<DateTime<Utc>>,
    liked_only: bool,
) -> Vec<SongId> {
    let mut seen = HashSet::new();
    swipes
        .iter()
        .filter(|e| watermark.is_none_or(|boundary| e.swiped_at > boundary))
        .filter(|e| !liked_only || e.liked)
        .filter(|e| seen.insert(e.song.clone()))
        .map(|e| e.song.clone())
        .collect()
}

/// Classifies a user's ledger as [`LedgerState::Open`] or
/// [`LedgerState::Drained`].
///
/// Drained means the newest watermark is at or past every swipe; an empty
/// swipe log is Drained trivially. The liked flag plays no part here: a
/// pending dislike still holds the ledger Open.
#[must_use]
pub fn ledger_state(swipes: &[SwipeEvent], watermark: Option<DateTime<Utc>>) -> LedgerState {
    let newest_swipe = swipes.iter().map(|e| e.swiped_at).max();
    match (newest_swipe, watermark) {
        (None, _) => LedgerState::Drained,
        (Some(_), None) => LedgerState::Open,
        (Some(swipe), Some(boundary)) => {
            if swipe > boundary {
                LedgerState::Open
            } else {
                LedgerState::Drained
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::UserId;

    fn user() -> UserId {
        let Ok(id) = UserId::new("alice") else {
            panic!("valid user id");
        };
        id
    }

    fn song(name: &str) -> SongId {
        let Ok(id) = SongId::new(name) else {
            panic!("valid song id");
        };
        id
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        let Some(t) = Utc.timestamp_opt(1_700_000_000 + secs, 0).single() else {
            panic!("valid timestamp");
        };
        t
    }

    fn swipe(id: i64, name: &str, liked: bool, at: i64) -> SwipeEvent {
        SwipeEvent {
            id,
            user: user(),
            song: song(name),
            liked,
            swiped_at: ts(at),
        }
    }

    fn mark(id: i64, at: i64) -> WatermarkEvent {
        WatermarkEvent {
            id,
            user: user(),
            created_at: ts(at),
        }
    }

    #[test]
    fn no_watermarks_means_no_boundary() {
        assert_eq!(effective_watermark(&[]), None);
    }

    #[test]
    fn effective_watermark_is_the_max() {
        let marks = [mark(1, 10), mark(2, 30), mark(3, 20)];
        assert_eq!(effective_watermark(&marks), Some(ts(30)));
    }

    #[test]
    fn all_pending_without_boundary() {
        let swipes = [swipe(1, "a", true, 1), swipe(2, "b", false, 2)];
        let names: Vec<String> = pending_songs(&swipes, None, false)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn boundary_excludes_older_swipes() {
        let swipes = [swipe(1, "a", true, 1), swipe(2, "b", true, 5)];
        let result = pending_songs(&swipes, Some(ts(3)), false);
        assert_eq!(result, vec![song("b")]);
    }

    #[test]
    fn swipe_at_watermark_instant_is_consumed() {
        // Equal timestamps: the watermark wins, the swipe is not pending.
        let swipes = [swipe(1, "a", true, 5)];
        assert!(pending_songs(&swipes, Some(ts(5)), false).is_empty());
        // One tick later it is pending again.
        let swipes = [swipe(1, "a", true, 6)];
        assert_eq!(pending_songs(&swipes, Some(ts(5)), false), vec![song("a")]);
    }

    #[test]
    fn distinct_projection_keeps_first_swipe_order() {
        let swipes = [
            swipe(1, "a", true, 1),
            swipe(2, "b", true, 2),
            swipe(3, "a", false, 3),
            swipe(4, "c", true, 4),
            swipe(5, "b", true, 5),
        ];
        let result = pending_songs(&swipes, None, false);
        assert_eq!(result, vec![song("a"), song("b"), song("c")]);
    }

    #[test]
    fn liked_only_drops_dislikes_before_distincting() {
        let swipes = [
            swipe(1, "a", false, 1),
            swipe(2, "b", true, 2),
            swipe(3, "a", true, 3),
        ];
        let result = pending_songs(&swipes, None, true);
        // "a" qualifies through its liked re-swipe, ordered by that event.
        assert_eq!(result, vec![song("b"), song("a")]);
    }

    #[test]
    fn empty_logs_resolve_to_empty_and_drained() {
        assert!(pending_songs(&[], None, false).is_empty());
        assert_eq!(ledger_state(&[], None), LedgerState::Drained);
        assert_eq!(ledger_state(&[], Some(ts(1))), LedgerState::Drained);
    }

    #[test]
    fn state_tracks_the_newest_swipe() {
        let swipes = [swipe(1, "a", true, 5)];
        assert_eq!(ledger_state(&swipes, None), LedgerState::Open);
        assert_eq!(ledger_state(&swipes, Some(ts(4))), LedgerState::Open);
        assert_eq!(ledger_state(&swipes, Some(ts(5))), LedgerState::Drained);
        assert_eq!(ledger_state(&swipes, Some(ts(6))), LedgerState::Drained);
    }
}
