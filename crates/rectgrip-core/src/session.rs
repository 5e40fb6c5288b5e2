//! Drag session bookkeeping and constrained geometry updates.

use kurbo::{Point, Rect, Vec2};

use crate::handle::Handle;

/// Bookkeeping for one continuous touch-down-to-touch-up interaction.
///
/// Captures the rectangle and pointer position at touch-down together
/// with the classified handle. The containment bounds are copied in at
/// session start, so changing the engine's bounds mid-drag cannot affect
/// a running session.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Rectangle snapshot at pointer-down, normalized.
    start_rect: Rect,
    /// Pointer position at pointer-down.
    origin: Point,
    /// Handle the touch landed on.
    handle: Handle,
    /// Cumulative pointer displacement since pointer-down.
    delta: Vec2,
    /// Containment bounds frozen at session start, normalized.
    bounds: Option<Rect>,
}

impl DragSession {
    /// Start a session from a rectangle copy and a classified touch.
    pub fn new(rect: Rect, origin: Point, handle: Handle, bounds: Option<Rect>) -> Self {
        Self {
            start_rect: rect.abs(),
            origin,
            handle,
            delta: Vec2::ZERO,
            bounds: bounds.map(|b| b.abs()),
        }
    }

    /// The classified handle for this session.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Pointer position at touch-down.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The normalized rectangle snapshot taken at touch-down.
    pub fn start_rect(&self) -> Rect {
        self.start_rect
    }

    /// The bounds this session clamps against, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Cumulative displacement recorded so far.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Record the cumulative displacement since pointer-down.
    pub fn set_delta(&mut self, delta: Vec2) {
        self.delta = delta;
    }

    /// Compute the output rectangle for the recorded displacement.
    ///
    /// Always derived from the start snapshot, never from a previous
    /// frame's output, so repeated small moves cannot accumulate
    /// rounding error.
    pub fn resolve(&self, min_size: f64) -> Rect {
        apply_delta(self, self.delta, min_size)
    }
}

/// Apply a cumulative drag displacement to a session's start rectangle.
///
/// Corner and edge handles move only the coordinates named by the
/// handle; a handle on the top or left moves that edge and inversely
/// changes the dimension. `Inside` translates all four coordinates,
/// pinned at the session bounds with size preserved. `None` leaves the
/// rectangle untouched.
///
/// Resizing is capped at the bounds (growth past a bound is capped, not
/// redistributed to the opposite edge), and an update that would take a
/// dimension below `min_size` is rejected for that axis only.
pub fn apply_delta(session: &DragSession, delta: Vec2, min_size: f64) -> Rect {
    let start = session.start_rect;

    match session.handle {
        Handle::None => return start,
        Handle::Inside => return translate_clamped(start, delta, session.bounds),
        _ => {}
    }

    let Rect {
        mut x0,
        mut y0,
        mut x1,
        mut y1,
    } = start;
    let handle = session.handle;

    if handle.moves_left() {
        let mut nx0 = start.x0 + delta.x;
        if let Some(b) = session.bounds {
            nx0 = nx0.max(b.x0);
        }
        if x1 - nx0 >= min_size {
            x0 = nx0;
        }
    }
    if handle.moves_right() {
        let mut nx1 = start.x1 + delta.x;
        if let Some(b) = session.bounds {
            nx1 = nx1.min(b.x1);
        }
        if nx1 - x0 >= min_size {
            x1 = nx1;
        }
    }
    if handle.moves_top() {
        let mut ny0 = start.y0 + delta.y;
        if let Some(b) = session.bounds {
            ny0 = ny0.max(b.y0);
        }
        if y1 - ny0 >= min_size {
            y0 = ny0;
        }
    }
    if handle.moves_bottom() {
        let mut ny1 = start.y1 + delta.y;
        if let Some(b) = session.bounds {
            ny1 = ny1.min(b.y1);
        }
        if ny1 - y0 >= min_size {
            y1 = ny1;
        }
    }

    Rect::new(x0, y0, x1, y1)
}

/// Translate a rectangle, pinning it at the bounds with size preserved.
fn translate_clamped(rect: Rect, delta: Vec2, bounds: Option<Rect>) -> Rect {
    let width = rect.width();
    let height = rect.height();
    let mut x0 = rect.x0 + delta.x;
    let mut y0 = rect.y0 + delta.y;

    if let Some(b) = bounds {
        x0 = x0.clamp(b.x0, (b.x1 - width).max(b.x0));
        y0 = y0.clamp(b.y0, (b.y1 - height).max(b.y0));
    }

    Rect::new(x0, y0, x0 + width, y0 + height)
}
