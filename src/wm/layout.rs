//! Layout - Stateless geometry for sub-window arrangement
//!
//! Everything here is a pure function of its arguments: resize handle
//! classification and the per-handle resize policy, the tile grid, cascade
//! placement, area bounds and hit testing.

use bitflags::bitflags;

use super::event::{FrameButton, PointerTarget};
use super::geometry::{Point, Rect, Size};
use super::subwindow::SubWindow;

bitflags! {
    /// Geometry fields a resize gesture is allowed to change
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ResizeUpdates: u8 {
        const WIDTH  = 0b0001;
        const HEIGHT = 0b0010;
        const X      = 0b0100;
        const Y      = 0b1000;
    }
}

/// Which part of the frame a resize gesture grabbed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    Left,
    Right,
    Top,
    Bottom,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::UpperLeft,
        ResizeHandle::UpperRight,
        ResizeHandle::LowerLeft,
        ResizeHandle::LowerRight,
    ];

    /// Fields updated when dragging this handle
    pub fn updates(self) -> ResizeUpdates {
        use ResizeUpdates as U;
        match self {
            ResizeHandle::Right => U::WIDTH,
            ResizeHandle::Left => U::WIDTH | U::X,
            ResizeHandle::Bottom => U::HEIGHT,
            ResizeHandle::Top => U::HEIGHT | U::Y,
            ResizeHandle::LowerRight => U::WIDTH | U::HEIGHT,
            ResizeHandle::UpperRight => U::WIDTH | U::HEIGHT | U::Y,
            ResizeHandle::LowerLeft => U::WIDTH | U::HEIGHT | U::X,
            ResizeHandle::UpperLeft => U::WIDTH | U::HEIGHT | U::X | U::Y,
        }
    }

    /// Short name (l, r, t, b, ul, ur, ll, lr)
    pub fn code(self) -> &'static str {
        match self {
            ResizeHandle::Left => "l",
            ResizeHandle::Right => "r",
            ResizeHandle::Top => "t",
            ResizeHandle::Bottom => "b",
            ResizeHandle::UpperLeft => "ul",
            ResizeHandle::UpperRight => "ur",
            ResizeHandle::LowerLeft => "ll",
            ResizeHandle::LowerRight => "lr",
        }
    }
}

/// Classify a press at container position `(x, y)` against a frame.
///
/// The right side is checked before the left side, and on each side the
/// corners win over the plain edge. Returns `None` when the press is farther
/// than `threshold` from every edge.
pub fn classify_handle(frame: Rect, x: i32, y: i32, threshold: i32) -> Option<ResizeHandle> {
    let (x1, y1) = (frame.x, frame.y);
    let (x2, y2) = (frame.right(), frame.bottom());
    let near = |a: i32, b: i32| (a - b).abs() < threshold;

    let handle = if near(x, x2) {
        if near(y, y2) {
            ResizeHandle::LowerRight
        } else if near(y, y1) {
            ResizeHandle::UpperRight
        } else {
            ResizeHandle::Right
        }
    } else if near(x, x1) {
        if near(y, y2) {
            ResizeHandle::LowerLeft
        } else if near(y, y1) {
            ResizeHandle::UpperLeft
        } else {
            ResizeHandle::Left
        }
    } else if near(y, y2) {
        ResizeHandle::Bottom
    } else if near(y, y1) {
        ResizeHandle::Top
    } else {
        return None;
    };
    Some(handle)
}

/// Result of applying a resize delta to a captured frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// New frame geometry; width and height are at least 1
    pub rect: Rect,
    /// The frame origin must be re-issued to the host
    pub moved: bool,
    /// The frame size must be re-issued to the host
    pub resized: bool,
}

/// Apply a pointer delta `(dx, dy)` to the frame captured at press time.
///
/// Handles that grab the top or left edge move the origin by the delta and
/// grow or shrink the matching dimension by `|delta|` depending on whether
/// the origin moved toward or away from the container origin.
pub fn apply_resize(handle: ResizeHandle, origin: Rect, dx: i32, dy: i32) -> ResizeOutcome {
    let updates = handle.updates();

    let mut width = origin.width;
    if updates.contains(ResizeUpdates::WIDTH) {
        width = origin.width + dx;
    }
    let mut height = origin.height;
    if updates.contains(ResizeUpdates::HEIGHT) {
        height = origin.height + dy;
    }

    let mut x = origin.x;
    let mut y = origin.y;
    let moved = updates.intersects(ResizeUpdates::X | ResizeUpdates::Y);
    if updates.contains(ResizeUpdates::X) {
        x = origin.x + dx;
        width = if x < origin.x {
            origin.width + dx.abs()
        } else {
            origin.width - dx.abs()
        };
    }
    if updates.contains(ResizeUpdates::Y) {
        y = origin.y + dy;
        height = if y < origin.y {
            origin.height + dy.abs()
        } else {
            origin.height - dy.abs()
        };
    }

    let resized = updates.intersects(ResizeUpdates::WIDTH | ResizeUpdates::HEIGHT);
    let size = Size::new(width, height).clamped();
    ResizeOutcome {
        rect: Rect::new(x, y, size.width, size.height),
        moved,
        resized,
    }
}

/// Grid used by the tile arrangement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    pub rows: usize,
    pub cols: usize,
    /// Size of each cell
    pub cell: Size,
}

impl TileGrid {
    /// Rectangle of the cell holding window `index` (row-major)
    pub fn cell_rect(&self, index: usize) -> Rect {
        let row = index / self.cols;
        let col = index % self.cols;
        Rect::new(
            col as i32 * self.cell.width,
            row as i32 * self.cell.height,
            self.cell.width,
            self.cell.height,
        )
    }
}

/// Compute a near-square grid for `count` windows over `viewport`
pub fn tile_grid(count: usize, viewport: Size) -> Option<TileGrid> {
    if count == 0 {
        return None;
    }
    let rows = ((count as f64).sqrt().round() as usize).max(1);
    let cols = if rows * rows >= count { rows } else { rows + 1 };
    let cell = Size::new(viewport.width / cols as i32, viewport.height / rows as i32).clamped();
    Some(TileGrid { rows, cols, cell })
}

/// Cell rectangles for `count` windows, in window order
pub fn tile_cells(count: usize, viewport: Size) -> Vec<Rect> {
    match tile_grid(count, viewport) {
        Some(grid) => (0..count).map(|i| grid.cell_rect(i)).collect(),
        None => Vec::new(),
    }
}

/// Cascade origins: each window is offset from the previous one by `offset`
pub fn cascade_positions(count: usize, offset: i32) -> Vec<Point> {
    let mut positions = Vec::with_capacity(count);
    let (mut x, mut y) = (0, 0);
    for _ in 0..count {
        positions.push(Point::new(x, y));
        x += offset;
        y += offset;
    }
    positions
}

/// Smallest origin-anchored rectangle enclosing the viewport and every frame
pub fn area_bounds<I>(viewport: Size, frames: I) -> Rect
where
    I: IntoIterator<Item = Rect>,
{
    let mut width = viewport.width;
    let mut height = viewport.height;
    for frame in frames {
        width = width.max(frame.right());
        height = height.max(frame.bottom());
    }
    Rect::new(0, 0, width, height)
}

/// Half-open range an initial coordinate is drawn from
pub fn placement_range(cascade_offset: i32, viewport_dim: i32) -> (i32, i32) {
    let lo = cascade_offset.max(0);
    let hi = (cascade_offset + 10).max(viewport_dim / 2).max(lo + 1);
    (lo, hi)
}

/// Placement of the close/minimize/maximize buttons in a label strip.
///
/// Buttons are `width` wide, packed left to right starting `inset` from the
/// strip's left edge. A button that would reach within `inset` of the right
/// edge is left out. A zero width disables the buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonStrip {
    pub width: i32,
    pub inset: i32,
}

impl ButtonStrip {
    pub const NONE: ButtonStrip = ButtonStrip { width: 0, inset: 0 };

    pub const fn new(width: i32, inset: i32) -> Self {
        Self { width, inset }
    }

    /// Cell of `button` within `label`, if it fits
    pub fn button_rect(&self, label: Rect, button: FrameButton) -> Option<Rect> {
        if self.width <= 0 {
            return None;
        }
        let slot = FrameButton::ALL.iter().position(|&b| b == button)? as i32;
        let rect = Rect::new(label.x + self.inset + slot * self.width, label.y, self.width, label.height);
        (rect.right() <= label.right() - self.inset).then_some(rect)
    }

    /// Button under `(x, y)` in `label`
    pub fn button_at(&self, label: Rect, x: i32, y: i32) -> Option<FrameButton> {
        FrameButton::ALL
            .into_iter()
            .find(|&b| self.button_rect(label, b).is_some_and(|r| r.contains(x, y)))
    }
}

/// Find what lies under `(x, y)`, topmost window first
pub fn target_at<C>(windows: &[SubWindow<C>], x: i32, y: i32, buttons: ButtonStrip) -> PointerTarget {
    for window in windows.iter().rev() {
        if window.contains(x, y) {
            let label = window.label_rect();
            if label.contains(x, y) {
                if let Some(button) = buttons.button_at(label, x, y) {
                    return PointerTarget::Button(window.id(), button);
                }
                return PointerTarget::Label(window.id());
            }
            return PointerTarget::Frame(window.id());
        }
    }
    PointerTarget::Background
}
