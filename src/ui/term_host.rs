//! Terminal host - implements the `Host` adapter over terminal cells
//!
//! One cell is one unit of geometry. The last terminal row is reserved for
//! the status bar, so the viewport is one row shorter than the terminal.

use std::collections::HashMap;

use tracing::trace;

use crate::wm::{Host, Point, Rect, SettleKind, SettleToken, Size, SubWindowId};

/// Document number shown inside a frame
pub type DocumentId = u32;

/// Frames smaller than this cannot be drawn as a box
const MIN_DRAWN: i32 = 2;

/// Host state: frame placement, stacking and pending settles
pub struct TermHost {
    viewport: Size,
    label_height: i32,
    /// Frame rectangles as last placed
    frames: HashMap<SubWindowId, Rect>,
    /// Attached frames, bottom first
    stack: Vec<SubWindowId>,
    area: Size,
    settles: Vec<(SettleToken, SubWindowId, SettleKind)>,
    next_token: u64,
}

impl TermHost {
    /// Create a host for a terminal of `cols` x `rows`
    pub fn new(cols: u16, rows: u16, label_height: i32) -> Self {
        let viewport = Self::viewport_for(cols, rows);
        Self {
            viewport,
            label_height: label_height.max(1),
            frames: HashMap::new(),
            stack: Vec::new(),
            area: viewport,
            settles: Vec::new(),
            next_token: 1,
        }
    }

    fn viewport_for(cols: u16, rows: u16) -> Size {
        Size::new(cols as i32, (rows as i32 - 1).max(1))
    }

    /// Terminal was resized
    pub fn set_terminal_size(&mut self, cols: u16, rows: u16) {
        self.viewport = Self::viewport_for(cols, rows);
    }

    /// Visible container area
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_parts(Point::default(), self.viewport)
    }

    /// Frame rectangle as the host placed it
    pub fn frame(&self, id: SubWindowId) -> Option<Rect> {
        self.frames.get(&id).copied()
    }

    /// Attached frames, bottom first
    pub fn stacking_order(&self) -> &[SubWindowId] {
        &self.stack
    }

    /// Size of the scrollable area last requested by the manager
    pub fn area_size(&self) -> Size {
        self.area
    }

    /// Geometry a frame actually occupies once drawn
    fn allocation(&self, id: SubWindowId) -> Option<Rect> {
        let rect = self.frame(id)?;
        Some(Rect::new(
            rect.x,
            rect.y,
            rect.width.max(MIN_DRAWN),
            rect.height.max(MIN_DRAWN),
        ))
    }

    /// Complete the layout pass: resolve every pending settle against the drawn frames
    pub fn take_settles(&mut self) -> Vec<(SettleToken, Rect)> {
        let pending = std::mem::take(&mut self.settles);
        pending
            .into_iter()
            .filter_map(|(token, id, _)| self.allocation(id).map(|rect| (token, rect)))
            .collect()
    }
}

impl Host for TermHost {
    type Content = DocumentId;

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn preferred_size(&self, content: &DocumentId) -> Size {
        // Documents ask for slightly different sizes so placement is visible
        Size::new(26 + (*content as i32 % 3) * 6, 8 + (*content as i32 % 2) * 3)
    }

    fn label_height(&self, _id: SubWindowId) -> i32 {
        self.label_height
    }

    fn attach(&mut self, id: SubWindowId, rect: Rect) {
        self.frames.insert(id, rect);
        self.stack.retain(|&s| s != id);
        self.stack.push(id);
    }

    fn detach(&mut self, id: SubWindowId) {
        // Raising re-attaches straight away, so the rect can go
        self.frames.remove(&id);
        self.stack.retain(|&s| s != id);
    }

    fn move_frame(&mut self, id: SubWindowId, pos: Point) {
        if let Some(rect) = self.frames.get_mut(&id) {
            rect.x = pos.x;
            rect.y = pos.y;
        }
    }

    fn resize_frame(&mut self, id: SubWindowId, size: Size) {
        if let Some(rect) = self.frames.get_mut(&id) {
            rect.width = size.width;
            rect.height = size.height;
        }
    }

    fn set_area_size(&mut self, size: Size) {
        trace!("Area size {}x{}", size.width, size.height);
        self.area = size;
    }

    fn schedule_settle(&mut self, id: SubWindowId, kind: SettleKind) -> SettleToken {
        let token = SettleToken(self.next_token);
        self.next_token += 1;
        self.settles.push((token, id, kind));
        token
    }

    fn cancel_settle(&mut self, token: SettleToken) -> bool {
        let before = self.settles.len();
        self.settles.retain(|(t, _, _)| *t != token);
        before != self.settles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::placement::FixedPlacement;
    use crate::wm::{LayoutOptions, WindowManager};

    fn options() -> LayoutOptions {
        LayoutOptions {
            cascade_offset: 2,
            minimized_width: 20,
            resize_threshold: 2,
            min_window_size: Size::new(1, 1),
            button_width: 3,
            button_inset: 1,
        }
    }

    #[test]
    fn test_viewport_excludes_status_row() {
        let host = TermHost::new(80, 24, 1);
        assert_eq!(host.viewport_size(), Size::new(80, 23));
    }

    #[test]
    fn test_settles_reconcile_through_manager() {
        let host = TermHost::new(80, 24, 1);
        let mut wm = WindowManager::with_rng(host, options(), FixedPlacement);
        let id = wm.add_window(0, "doc");
        wm.resize_page(id, 1, 1);

        let settled = wm.host_mut().take_settles();
        assert_eq!(settled.len(), 2);
        for (token, rect) in settled {
            assert!(wm.on_settled(token, rect));
        }
        assert_eq!(wm.window(id).unwrap().geometry(), Rect::new(2, 2, 2, 2));
        assert!(wm.host_mut().take_settles().is_empty());
    }

    #[test]
    fn test_cancelled_settle_never_fires() {
        let host = TermHost::new(80, 24, 1);
        let mut wm = WindowManager::with_rng(host, options(), FixedPlacement);
        let id = wm.add_window(1, "doc");
        wm.remove_window(id);
        assert!(wm.host_mut().take_settles().is_empty());
        assert_eq!(wm.pending_settle_count(), 0);
    }

    #[test]
    fn test_raise_restacks_frame() {
        let host = TermHost::new(80, 24, 1);
        let mut wm = WindowManager::with_rng(host, options(), FixedPlacement);
        let a = wm.add_window(0, "a");
        let b = wm.add_window(1, "b");
        assert_eq!(wm.host().stacking_order(), &[a, b]);
        wm.raise(a);
        assert_eq!(wm.host().stacking_order(), &[b, a]);
    }

    #[test]
    fn test_closed_frames_are_forgotten() {
        let host = TermHost::new(80, 24, 1);
        let mut wm = WindowManager::with_rng(host, options(), FixedPlacement);
        let a = wm.add_window(0, "a");
        let b = wm.add_window(1, "b");
        wm.raise(a);
        assert!(wm.host().frame(a).is_some());

        wm.close(b);
        assert_eq!(wm.host().frame(b), None);
        assert_eq!(wm.host().stacking_order(), &[a]);
        assert_eq!(wm.host().frames.len(), 1);
    }
}
