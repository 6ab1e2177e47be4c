//! Domain layer: identifiers and the two immutable event records.
//!
//! Everything the ledger stores is one of two row shapes: a [`SwipeEvent`]
//! in the swipe ledger or a [`WatermarkEvent`] in the watermark log. Both
//! are append-only; "consumed" state is never written anywhere, it is
//! derived at query time from the two logs.

pub mod ids;
pub mod swipe;
pub mod watermark;

pub use ids::{SongId, UserId};
pub use swipe::SwipeEvent;
pub use watermark::WatermarkEvent;
