//! Hit classification of a touch point against a rectangle's handle zones.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default hit-test margin in display pixels.
///
/// Also the minimum rectangle dimension the engine will allow, so both
/// opposing handles stay individually hit-testable.
pub const DEFAULT_HIT_MARGIN: f64 = 30.0;

/// The region of a rectangle a touch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Strictly inside all four edge bands; drags translate the rectangle.
    Inside,
    /// Outside every zone, including outside the rectangle entirely.
    None,
}

impl Handle {
    /// Whether a drag on this handle moves the left edge (x0).
    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    /// Whether a drag on this handle moves the right edge (x1).
    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    /// Whether a drag on this handle moves the top edge (y0).
    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Whether a drag on this handle moves the bottom edge (y1).
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Whether this handle resizes rather than translates.
    pub fn is_resize(self) -> bool {
        !matches!(self, Self::Inside | Self::None)
    }

    /// Whether the touch missed every interactive zone.
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Classify a pointer position against a rectangle's handle zones.
///
/// The rectangle is normalized before testing; edges are inclusive.
/// Zones are tested in priority order: corner squares (margin x margin),
/// then edge bands (margin wide, minus the corner squares), then the
/// interior, then `Handle::None` for anything else.
///
/// Corner zones take precedence over edge bands where they overlap.
pub fn classify(pointer: Point, rect: Rect, margin: f64) -> Handle {
    let rect = rect.abs();

    if pointer.x < rect.x0 || pointer.x > rect.x1 || pointer.y < rect.y0 || pointer.y > rect.y1 {
        return Handle::None;
    }

    let left = pointer.x <= rect.x0 + margin;
    let right = pointer.x >= rect.x1 - margin;
    let top = pointer.y <= rect.y0 + margin;
    let bottom = pointer.y >= rect.y1 - margin;

    match (left, right, top, bottom) {
        (true, _, true, _) => Handle::TopLeft,
        (_, true, true, _) => Handle::TopRight,
        (true, _, _, true) => Handle::BottomLeft,
        (_, true, _, true) => Handle::BottomRight,
        (_, _, true, _) => Handle::Top,
        (_, _, _, true) => Handle::Bottom,
        (true, _, _, _) => Handle::Left,
        (_, true, _, _) => Handle::Right,
        _ => Handle::Inside,
    }
}
