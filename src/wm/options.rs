//! Construction-time layout options

use super::geometry::Size;
use super::layout::ButtonStrip;

/// Per-manager layout constants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Step between cascaded windows, also the lower bound of random placement
    pub cascade_offset: i32,
    /// Width of a minimized window
    pub minimized_width: i32,
    /// Distance from a frame edge within which a press grabs a resize handle
    pub resize_threshold: i32,
    /// Smallest initial size of a new window
    pub min_window_size: Size,
    /// Width of each label strip button; 0 hides them
    pub button_width: i32,
    /// Gap between the label strip edges and the buttons
    pub button_inset: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            cascade_offset: 50,
            minimized_width: 150,
            resize_threshold: 50,
            min_window_size: Size::new(300, 300),
            button_width: 20,
            button_inset: 4,
        }
    }
}

impl LayoutOptions {
    pub fn button_strip(&self) -> ButtonStrip {
        ButtonStrip::new(self.button_width, self.button_inset)
    }
}
