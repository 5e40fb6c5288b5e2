//! Pointer event types delivered by the gesture collaborator.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event for unified mouse/touch handling.
///
/// The gesture layer is expected to deliver events in order, one at a
/// time: `Down`, zero or more `Move`s, then `Up`. A `Move` carries the
/// cumulative displacement since the pointer went down, not a per-frame
/// increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        /// Touch position in display coordinates.
        position: Point,
    },
    Move {
        /// Cumulative displacement since `Down`.
        delta: Vec2,
    },
    Up,
}
