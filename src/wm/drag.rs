//! Drag - Pointer gesture state machine for moving and resizing sub-windows
//!
//! ```text
//!            down on label                 down near frame edge
//!   Moving <─────────────── Idle ───────────────────────────> Resizing
//!     │  move: follow pointer  ▲  ▲   move: apply handle policy   │
//!     └────── up: commit ──────┘  └────────── up: commit ─────────┘
//! ```
//!
//! The controller only interprets the pointer stream. It returns the
//! geometry each event implies and leaves applying it to the manager.

use super::event::{PointerEvent, PointerTarget};
use super::geometry::{Point, Rect};
use super::layout::{self, ResizeHandle, ResizeOutcome};
use super::subwindow::SubWindowId;

/// Current gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Moving {
        id: SubWindowId,
        /// Frame origin when the gesture started
        origin: Point,
        /// Root pointer position at press time
        press: Point,
    },
    Resizing {
        id: SubWindowId,
        handle: ResizeHandle,
        /// Frame geometry when the gesture started
        origin: Rect,
        /// Root pointer position at press time
        press: Point,
    },
}

/// A gesture that just started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragStart {
    Move(SubWindowId),
    Resize(SubWindowId, ResizeHandle),
}

/// Geometry implied by a pointer event during a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragUpdate {
    Move { id: SubWindowId, pos: Point },
    Resize { id: SubWindowId, outcome: ResizeOutcome },
}

impl DragUpdate {
    pub fn id(&self) -> SubWindowId {
        match *self {
            DragUpdate::Move { id, .. } | DragUpdate::Resize { id, .. } => id,
        }
    }
}

/// Translates pointer events into move/resize geometry
#[derive(Debug)]
pub struct DragController {
    state: DragState,
    /// Proximity to a frame edge that grabs a resize handle
    threshold: i32,
}

impl DragController {
    pub fn new(threshold: i32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Sub-window the active gesture acts on
    pub fn active_window(&self) -> Option<SubWindowId> {
        match self.state {
            DragState::Idle => None,
            DragState::Moving { id, .. } | DragState::Resizing { id, .. } => Some(id),
        }
    }

    /// Start a gesture. `frame` is the target's current geometry.
    ///
    /// Ignored while another gesture is active.
    pub fn pointer_down(&mut self, target: PointerTarget, frame: Option<Rect>, event: &PointerEvent) -> Option<DragStart> {
        if !self.is_idle() {
            tracing::trace!("pointer down ignored, gesture already active");
            return None;
        }
        let press = Point::new(event.x_root, event.y_root);

        match target {
            PointerTarget::Label(id) => {
                let frame = frame?;
                self.state = DragState::Moving {
                    id,
                    origin: frame.origin(),
                    press,
                };
                Some(DragStart::Move(id))
            }
            PointerTarget::Frame(id) => {
                let frame = frame?;
                let handle = layout::classify_handle(frame, event.x, event.y, self.threshold)?;
                self.state = DragState::Resizing {
                    id,
                    handle,
                    origin: frame,
                    press,
                };
                Some(DragStart::Resize(id, handle))
            }
            PointerTarget::Button(..) | PointerTarget::Background => None,
        }
    }

    /// Live update while the primary button is held
    pub fn pointer_move(&self, event: &PointerEvent) -> Option<DragUpdate> {
        if !event.primary_held() {
            return None;
        }
        self.update_for(event)
    }

    /// Finish the gesture and return its final geometry
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<DragUpdate> {
        let update = self.update_for(event);
        self.state = DragState::Idle;
        update
    }

    /// Abandon the gesture
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    fn update_for(&self, event: &PointerEvent) -> Option<DragUpdate> {
        match self.state {
            DragState::Idle => None,
            DragState::Moving { id, origin, press } => {
                let pos = Point::new(
                    origin.x + (event.x_root - press.x),
                    origin.y + (event.y_root - press.y),
                );
                Some(DragUpdate::Move { id, pos })
            }
            DragState::Resizing { id, handle, origin, press } => {
                let dx = event.x_root - press.x;
                let dy = event.y_root - press.y;
                let outcome = layout::apply_resize(handle, origin, dx, dy);
                Some(DragUpdate::Resize { id, outcome })
            }
        }
    }
}
