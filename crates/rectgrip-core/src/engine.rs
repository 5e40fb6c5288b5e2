//! Event-driven engine for one draggable/resizable rectangle.

use std::fmt;

use kurbo::{Point, Rect, Vec2};
use log::{debug, warn};

use crate::handle::{classify, DEFAULT_HIT_MARGIN, Handle};
use crate::input::PointerEvent;
use crate::session::DragSession;

/// Callback invoked with the updated rectangle after each geometry change.
pub type RedrawFn = Box<dyn FnMut(Rect)>;

/// Drives a single rectangle through pointer-down / move / up cycles.
///
/// The engine never owns the rectangle: pointer-down receives a copy,
/// each move returns an updated copy, and the only state retained
/// between events is the transient [`DragSession`]. At most one session
/// is live at a time.
pub struct RectEngine {
    /// Hit-test margin; doubles as the minimum rectangle dimension.
    margin: f64,
    /// Containment bounds applied to sessions started from now on.
    bounds: Option<Rect>,
    /// The live drag session, if any.
    session: Option<DragSession>,
    /// Redraw callback fired after each geometry update.
    redraw: Option<RedrawFn>,
}

impl RectEngine {
    /// Create an engine with the default hit margin and no bounds.
    pub fn new() -> Self {
        Self {
            margin: DEFAULT_HIT_MARGIN,
            bounds: None,
            session: None,
            redraw: None,
        }
    }

    /// Set the hit-test margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the containment bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// The hit-test margin.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// The current containment bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Replace the containment bounds.
    ///
    /// A live session keeps the bounds it was started with; the new
    /// bounds apply from the next pointer-down.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Install the redraw callback fired after each geometry update.
    pub fn on_redraw(&mut self, redraw: impl FnMut(Rect) + 'static) {
        self.redraw = Some(Box::new(redraw));
    }

    /// Whether a drag session is live.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The live drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begin a drag session from a rectangle copy and a touch position.
    ///
    /// Classifies the touch against the rectangle's handle zones and
    /// returns the result. A pointer-down while a session is live is a
    /// caller protocol violation; the stale session is force-closed and
    /// a fresh one started.
    pub fn pointer_down(&mut self, rect: Rect, position: Point) -> Handle {
        if self.session.is_some() {
            warn!("pointer down with a live drag session; force-closing the previous session");
            self.session = None;
        }

        let handle = classify(position, rect, self.margin);
        debug!("pointer down at {:?} classified as {:?}", position, handle);
        self.session = Some(DragSession::new(rect, position, handle, self.bounds));
        handle
    }

    /// Advance the live session to the given cumulative displacement.
    ///
    /// Returns the updated rectangle copy and fires the redraw callback.
    /// Without a live session this is a no-op returning `None`.
    pub fn pointer_move(&mut self, delta: Vec2) -> Option<Rect> {
        let session = self.session.as_mut()?;
        session.set_delta(delta);
        let rect = session.resolve(self.margin);
        if let Some(redraw) = &mut self.redraw {
            redraw(rect);
        }
        Some(rect)
    }

    /// End the live session, returning the final rectangle copy.
    pub fn pointer_up(&mut self) -> Option<Rect> {
        let session = self.session.take()?;
        Some(session.resolve(self.margin))
    }

    /// Dispatch a [`PointerEvent`] to the matching entry point.
    ///
    /// `rect` is the consumer's current rectangle; it is only read on
    /// `Down` (moves resolve against the session snapshot). Returns the
    /// updated rectangle for `Move` and `Up`, `None` for `Down`.
    pub fn handle_event(&mut self, rect: Rect, event: PointerEvent) -> Option<Rect> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(rect, position);
                None
            }
            PointerEvent::Move { delta } => self.pointer_move(delta),
            PointerEvent::Up => self.pointer_up(),
        }
    }
}

impl Default for RectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RectEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectEngine")
            .field("margin", &self.margin)
            .field("bounds", &self.bounds)
            .field("session", &self.session)
            .field("redraw", &self.redraw.is_some())
            .finish()
    }
}
