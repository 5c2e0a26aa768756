//! SubWindow - A single managed pane inside the container

use super::geometry::{Point, Rect, Size};

/// Unique identifier for a sub-window
pub type SubWindowId = u64;

/// A single content pane wrapped in a movable, resizable frame
#[derive(Debug)]
pub struct SubWindow<C> {
    id: SubWindowId,
    /// Host-owned content, never inspected
    content: C,
    /// Title shown in the label strip
    label: String,
    /// Frame geometry relative to the container origin
    geometry: Rect,
    /// Height of the label strip
    label_height: i32,
}

impl<C> SubWindow<C> {
    /// Create a new sub-window; sizes are clamped to at least 1
    pub(crate) fn new(id: SubWindowId, content: C, label: String, geometry: Rect, label_height: i32) -> Self {
        let size = geometry.size().clamped();
        Self {
            id,
            content,
            label,
            geometry: Rect::from_parts(geometry.origin(), size),
            label_height: label_height.max(1),
        }
    }

    pub fn id(&self) -> SubWindowId {
        self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn label_height(&self) -> i32 {
        self.label_height
    }

    pub(crate) fn into_content(self) -> C {
        self.content
    }

    pub(crate) fn set_label_height(&mut self, label_height: i32) {
        self.label_height = label_height.max(1);
    }

    /// Move the frame
    pub(crate) fn move_to(&mut self, pos: Point) {
        self.geometry.x = pos.x;
        self.geometry.y = pos.y;
    }

    /// Resize the frame
    pub(crate) fn resize(&mut self, size: Size) {
        let size = size.clamped();
        self.geometry.width = size.width;
        self.geometry.height = size.height;
    }

    /// Label strip rectangle (top of the frame)
    pub fn label_rect(&self) -> Rect {
        Rect::new(
            self.geometry.x,
            self.geometry.y,
            self.geometry.width,
            self.label_height.min(self.geometry.height),
        )
    }

    /// Check if a position is inside this frame
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.geometry.contains(x, y)
    }

    /// Get display title
    pub fn display_title(&self) -> String {
        if self.label.is_empty() {
            format!("Window {}", self.id)
        } else {
            self.label.clone()
        }
    }
}
