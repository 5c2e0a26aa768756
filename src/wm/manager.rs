//! Window Manager - Owns the sub-windows and drives the host frames

use std::collections::HashMap;

use tracing::{debug, trace};

use super::drag::{DragController, DragStart, DragState, DragUpdate};
use super::event::{FrameButton, PointerAction, PointerEvent, PointerTarget};
use super::geometry::{Point, Rect, Size};
use super::host::{Host, SettleKind, SettleToken};
use super::layout;
use super::options::LayoutOptions;
use super::placement::{RandomSource, SeededRandom};
use super::subwindow::{SubWindow, SubWindowId};

/// Window Manager - handles sub-window stacking, arrangement and gestures
pub struct WindowManager<H: Host, R: RandomSource = SeededRandom> {
    host: H,
    rng: R,
    options: LayoutOptions,
    /// Sub-windows in stacking order, topmost last
    windows: Vec<SubWindow<H::Content>>,
    /// Active sub-window
    current: Option<SubWindowId>,
    drag: DragController,
    /// Viewport plus every frame, anchored at the origin
    area_bounds: Rect,
    /// Outstanding settle callbacks
    pending_settles: HashMap<SettleToken, (SubWindowId, SettleKind)>,
    next_id: SubWindowId,
}

impl<H: Host> WindowManager<H> {
    /// Create a window manager with an unseeded random source
    pub fn new(host: H, options: LayoutOptions) -> Self {
        Self::with_rng(host, options, SeededRandom::new())
    }
}

impl<H: Host, R: RandomSource> WindowManager<H, R> {
    /// Create a window manager with an explicit random source
    pub fn with_rng(host: H, options: LayoutOptions, rng: R) -> Self {
        let viewport = host.viewport_size();
        Self {
            host,
            rng,
            options,
            windows: Vec::new(),
            current: None,
            drag: DragController::new(options.resize_threshold),
            area_bounds: Rect::from_parts(Point::default(), viewport),
            pending_settles: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Sub-windows in stacking order, topmost last
    pub fn windows(&self) -> impl Iterator<Item = &SubWindow<H::Content>> {
        self.windows.iter()
    }

    pub fn area_bounds(&self) -> Rect {
        self.area_bounds
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Add a sub-window wrapping `content` at a random spot
    pub fn add_window(&mut self, content: H::Content, label: impl Into<String>) -> SubWindowId {
        let id = self.next_id;
        self.next_id += 1;

        let viewport = self.host.viewport_size();
        let offset = self.options.cascade_offset;
        let (lo, hi) = layout::placement_range(offset, viewport.width);
        let x = self.rng.next_in_range(lo, hi);
        let (lo, hi) = layout::placement_range(offset, viewport.height);
        let y = self.rng.next_in_range(lo, hi);

        let size = self
            .host
            .preferred_size(&content)
            .max(self.options.min_window_size);
        let label_height = self.host.label_height(id);
        let window = SubWindow::new(id, content, label.into(), Rect::from_parts(Point::new(x, y), size), label_height);
        let rect = window.geometry();
        self.windows.push(window);
        self.host.attach(id, rect);

        // Host-assigned geometry is only known after its layout pass
        for kind in [SettleKind::Position, SettleKind::Size] {
            let token = self.host.schedule_settle(id, kind);
            self.pending_settles.insert(token, (id, kind));
        }

        debug!("Added window {} at {:?}", id, rect);
        self.update_area_size();
        id
    }

    /// Reconcile a frame with the geometry the host actually gave it.
    /// Returns false for unknown, cancelled or already-fired tokens.
    pub fn on_settled(&mut self, token: SettleToken, actual: Rect) -> bool {
        let Some((id, kind)) = self.pending_settles.remove(&token) else {
            trace!("Ignoring stale settle {:?}", token);
            return false;
        };
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        match kind {
            SettleKind::Position => window.move_to(actual.origin()),
            SettleKind::Size => window.resize(actual.size()),
        }
        trace!("Window {} settled {:?} to {:?}", id, kind, actual);
        self.update_area_size();
        true
    }

    /// Number of settle callbacks still outstanding
    pub fn pending_settle_count(&self) -> usize {
        self.pending_settles.len()
    }

    /// Remove a sub-window, returning its content
    pub fn remove_window(&mut self, id: SubWindowId) -> Option<H::Content> {
        let Some(pos) = self.position_of(id) else {
            trace!("remove_window: unknown window {}", id);
            return None;
        };
        let window = self.windows.remove(pos);

        let stale: Vec<SettleToken> = self
            .pending_settles
            .iter()
            .filter(|(_, (owner, _))| *owner == id)
            .map(|(token, _)| *token)
            .collect();
        for token in stale {
            self.pending_settles.remove(&token);
            // Already fired is fine
            let _ = self.host.cancel_settle(token);
        }

        if self.current == Some(id) {
            self.current = None;
        }
        if self.drag.active_window() == Some(id) {
            self.drag.cancel();
        }
        self.host.detach(id);

        debug!("Removed window {}", id);
        self.update_area_size();
        Some(window.into_content())
    }

    /// Remove the sub-window at `index`
    pub fn remove_page(&mut self, index: usize) -> Option<H::Content> {
        let id = self.windows.get(index)?.id();
        self.remove_window(id)
    }

    /// Close a sub-window
    pub fn close(&mut self, id: SubWindowId) -> Option<H::Content> {
        let content = self.remove_window(id);
        self.update_area_size();
        content
    }

    pub fn get_window(&self, index: usize) -> Option<&SubWindow<H::Content>> {
        self.windows.get(index)
    }

    pub fn window(&self, id: SubWindowId) -> Option<&SubWindow<H::Content>> {
        self.windows.iter().find(|w| w.id() == id)
    }

    fn window_mut(&mut self, id: SubWindowId) -> Option<&mut SubWindow<H::Content>> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// Content of the sub-window at `index`
    pub fn content_at(&self, index: usize) -> Option<&H::Content> {
        self.windows.get(index).map(|w| w.content())
    }

    /// Position of the sub-window wrapping `content`
    pub fn index_of(&self, content: &H::Content) -> Option<usize> {
        self.windows.iter().position(|w| w.content() == content)
    }

    /// Position of a sub-window in the stacking order
    pub fn position_of(&self, id: SubWindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    pub fn current(&self) -> Option<SubWindowId> {
        self.current
    }

    /// Present position of the current sub-window
    pub fn current_index(&self) -> Option<usize> {
        self.current.and_then(|id| self.position_of(id))
    }

    /// Make the sub-window at `index` current, raising it.
    /// Returns false if it already was current or does not exist.
    pub fn set_current(&mut self, index: usize) -> bool {
        let Some(id) = self.windows.get(index).map(|w| w.id()) else {
            return false;
        };
        if self.current == Some(id) {
            return false;
        }
        self.raise(id);
        self.current = Some(id);
        true
    }

    /// Make the bottom-most sub-window that is not current the current one.
    /// Because that raises it, repeated calls cycle through every window.
    pub fn focus_next(&mut self) -> bool {
        let current = self.current_index();
        match (0..self.windows.len()).find(|&i| Some(i) != current) {
            Some(index) => self.set_current(index),
            None => false,
        }
    }

    /// Bring a sub-window to the top of the stacking order
    pub fn raise(&mut self, id: SubWindowId) {
        let Some(pos) = self.position_of(id) else {
            return;
        };
        let window = self.windows.remove(pos);
        let rect = window.geometry();
        self.windows.push(window);

        // Hosts re-stack by detaching and re-attaching on top
        self.host.detach(id);
        self.host.attach(id, rect);
        trace!("Raised window {}", id);
    }

    /// Move a sub-window
    pub fn move_page(&mut self, id: SubWindowId, x: i32, y: i32) {
        let pos = Point::new(x, y);
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.move_to(pos);
        self.host.move_frame(id, pos);
    }

    /// Resize a sub-window; sizes below 1 are clamped
    pub fn resize_page(&mut self, id: SubWindowId, width: i32, height: i32) {
        let size = Size::new(width, height).clamped();
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.resize(size);
        self.host.resize_frame(id, size);
    }

    /// Arrange all sub-windows in a near-square grid over the viewport
    pub fn tile(&mut self) {
        let viewport = self.host.viewport_size();
        let Some(grid) = layout::tile_grid(self.windows.len(), viewport) else {
            return;
        };
        debug!("Tiling {} windows in {}x{} grid", self.windows.len(), grid.rows, grid.cols);

        let ids: Vec<SubWindowId> = self.windows.iter().map(|w| w.id()).collect();
        for (index, id) in ids.into_iter().enumerate() {
            let cell = grid.cell_rect(index);
            self.resize_page(id, cell.width, cell.height);
            self.move_page(id, cell.x, cell.y);
            self.raise(id);
        }
        self.update_area_size();
    }

    /// Stack sub-windows diagonally from the container origin
    pub fn cascade(&mut self) {
        let ids: Vec<SubWindowId> = self.windows.iter().map(|w| w.id()).collect();
        let positions = layout::cascade_positions(ids.len(), self.options.cascade_offset);
        debug!("Cascading {} windows", ids.len());

        for (id, pos) in ids.into_iter().zip(positions) {
            self.move_page(id, pos.x, pos.y);
            self.raise(id);
        }
        self.update_area_size();
    }

    /// Fill the viewport with a sub-window
    pub fn maximize(&mut self, id: SubWindowId) {
        if self.position_of(id).is_none() {
            return;
        }
        let viewport = self.host.viewport_size();
        self.raise(id);
        self.resize_page(id, viewport.width, viewport.height);
        self.move_page(id, 0, 0);
        debug!("Maximized window {}", id);
        self.update_area_size();
    }

    /// Collapse a sub-window to its label strip at the bottom of the viewport
    pub fn minimize(&mut self, id: SubWindowId) {
        let viewport = self.host.viewport_size();
        let label_height = self.host.label_height(id);
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.set_label_height(label_height);
        let x = window.geometry().x;
        let label_height = window.label_height();

        self.resize_page(id, self.options.minimized_width, label_height);
        self.move_page(id, x, viewport.height - label_height);
        debug!("Minimized window {}", id);
        self.update_area_size();
    }

    /// What lies under container position `(x, y)`
    pub fn window_at(&self, x: i32, y: i32) -> PointerTarget {
        layout::target_at(&self.windows, x, y, self.options.button_strip())
    }

    /// Route a host pointer event, hit-testing presses
    pub fn handle_pointer(&mut self, action: PointerAction, event: &PointerEvent) {
        match action {
            PointerAction::Down => {
                let target = self.window_at(event.x, event.y);
                self.pointer_down(target, event);
            }
            PointerAction::Move => self.pointer_move(event),
            PointerAction::Up => self.pointer_up(event),
        }
    }

    /// Press on `target`; may start a move or resize gesture or press a label button
    pub fn pointer_down(&mut self, target: PointerTarget, event: &PointerEvent) {
        let frame = match target {
            PointerTarget::Label(id) | PointerTarget::Frame(id) => self.window(id).map(|w| w.geometry()),
            PointerTarget::Button(id, button) => {
                if self.drag.is_idle() {
                    self.press_button(id, button);
                }
                return;
            }
            PointerTarget::Background => None,
        };
        match self.drag.pointer_down(target, frame, event) {
            Some(DragStart::Move(id)) => {
                self.raise(id);
                self.current = Some(id);
                debug!("Moving window {}", id);
            }
            Some(DragStart::Resize(id, handle)) => {
                debug!("Resizing window {} from {}", id, handle.code());
            }
            None => {}
        }
    }

    /// Pointer motion; applies live geometry during a gesture
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if let Some(update) = self.drag.pointer_move(event) {
            self.apply_drag(update);
        }
        self.update_area_size();
    }

    /// Pointer release; commits the gesture
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        if let Some(update) = self.drag.pointer_up(event) {
            if self.apply_drag(update) {
                if let Some(window) = self.window(update.id()) {
                    debug!("Window {} committed at {:?}", update.id(), window.geometry());
                }
            }
        }
        self.update_area_size();
    }

    /// Run the action behind a label strip button
    pub fn press_button(&mut self, id: SubWindowId, button: FrameButton) {
        debug!("Window {} button {:?}", id, button);
        match button {
            FrameButton::Close => {
                self.close(id);
            }
            FrameButton::Minimize => self.minimize(id),
            FrameButton::Maximize => self.maximize(id),
        }
    }

    /// Abandon the active gesture, keeping the last live geometry
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    fn apply_drag(&mut self, update: DragUpdate) -> bool {
        let id = update.id();
        if self.position_of(id).is_none() {
            self.drag.cancel();
            return false;
        }
        match update {
            DragUpdate::Move { pos, .. } => self.move_page(id, pos.x, pos.y),
            DragUpdate::Resize { outcome, .. } => {
                if outcome.moved {
                    self.move_page(id, outcome.rect.x, outcome.rect.y);
                }
                if outcome.resized {
                    self.resize_page(id, outcome.rect.width, outcome.rect.height);
                }
            }
        }
        true
    }

    /// Recompute area bounds after the host viewport changed size
    pub fn viewport_changed(&mut self) {
        self.update_area_size();
    }

    fn update_area_size(&mut self) {
        let bounds = layout::area_bounds(
            self.host.viewport_size(),
            self.windows.iter().map(|w| w.geometry()),
        );
        if bounds != self.area_bounds {
            trace!("Area bounds {:?} -> {:?}", self.area_bounds, bounds);
            self.area_bounds = bounds;
            self.host.set_area_size(bounds.size());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::event::PointerButtons;
    use crate::wm::host::testing::{Command, RecordingHost};
    use crate::wm::placement::FixedPlacement;

    type TestManager = WindowManager<RecordingHost, FixedPlacement>;

    fn manager() -> TestManager {
        WindowManager::with_rng(RecordingHost::new(1200, 800), LayoutOptions::default(), FixedPlacement)
    }

    fn manager_with(n: u32) -> (TestManager, Vec<SubWindowId>) {
        let mut wm = manager();
        let ids = (0..n).map(|i| wm.add_window(i, format!("w{}", i))).collect();
        (wm, ids)
    }

    fn order(wm: &TestManager) -> Vec<SubWindowId> {
        wm.windows().map(|w| w.id()).collect()
    }

    fn geometry(wm: &TestManager, id: SubWindowId) -> Rect {
        wm.window(id).unwrap().geometry()
    }

    fn held(x: i32, y: i32) -> PointerEvent {
        PointerEvent::at(x, y, PointerButtons::PRIMARY)
    }

    #[test]
    fn test_add_window_defaults() {
        let mut wm = manager();
        wm.host_mut().preferred.insert(9, Size::new(450, 120));
        let id = wm.add_window(9, "plot");

        let w = wm.window(id).unwrap();
        assert_eq!(w.geometry(), Rect::new(50, 50, 450, 300));
        assert_eq!(w.label(), "plot");
        assert_eq!(w.label_height(), 20);
        assert_eq!(wm.len(), 1);
        assert_eq!(order(&wm).last(), Some(&id));
        assert!(wm.host().commands.contains(&Command::Attach(id, Rect::new(50, 50, 450, 300))));
    }

    #[test]
    fn test_add_window_schedules_two_settles() {
        let (wm, ids) = manager_with(1);
        let kinds: Vec<_> = wm.host().scheduled.iter().map(|(_, id, k)| (*id, *k)).collect();
        assert_eq!(kinds, vec![(ids[0], SettleKind::Position), (ids[0], SettleKind::Size)]);
        assert_eq!(wm.pending_settle_count(), 2);
    }

    #[test]
    fn test_random_placement_within_range() {
        let mut wm = WindowManager::with_rng(
            RecordingHost::new(1000, 600),
            LayoutOptions::default(),
            SeededRandom::with_seed(11),
        );
        for i in 0..20 {
            let id = wm.add_window(i, "");
            let g = wm.window(id).unwrap().geometry();
            assert!((50..500).contains(&g.x), "x = {}", g.x);
            assert!((50..300).contains(&g.y), "y = {}", g.y);
        }
    }

    #[test]
    fn test_area_bounds_cover_new_window() {
        let mut wm = manager();
        wm.host_mut().preferred.insert(1, Size::new(1500, 900));
        let id = wm.add_window(1, "big");
        let g = geometry(&wm, id);
        let bounds = wm.area_bounds();
        assert!(bounds.width >= g.x + g.width);
        assert!(bounds.height >= g.y + g.height);
        assert_eq!(wm.host().commands.last(), Some(&Command::AreaSize(Size::new(1550, 950))));
    }

    #[test]
    fn test_settle_reconciles_geometry() {
        let (mut wm, ids) = manager_with(1);
        let fired = wm.host_mut().drain_settles();
        for (token, _, kind) in fired {
            let actual = match kind {
                SettleKind::Position => Rect::new(60, 70, 0, 0),
                SettleKind::Size => Rect::new(0, 0, 320, 310),
            };
            assert!(wm.on_settled(token, actual));
            // One-shot
            assert!(!wm.on_settled(token, actual));
        }
        assert_eq!(geometry(&wm, ids[0]), Rect::new(60, 70, 320, 310));
        assert_eq!(wm.pending_settle_count(), 0);
    }

    #[test]
    fn test_remove_cancels_pending_settles() {
        let (mut wm, ids) = manager_with(2);
        let tokens: Vec<SettleToken> = wm
            .host()
            .scheduled
            .iter()
            .filter(|(_, id, _)| *id == ids[0])
            .map(|(t, _, _)| *t)
            .collect();
        wm.remove_window(ids[0]);

        for token in &tokens {
            assert!(wm.host().cancelled.contains(token));
            assert!(!wm.on_settled(*token, Rect::new(1, 1, 1, 1)));
        }
        assert_eq!(wm.pending_settle_count(), 2);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (mut wm, _) = manager_with(2);
        wm.host_mut().take_commands();
        assert_eq!(wm.remove_window(999), None);
        assert_eq!(wm.remove_page(5), None);
        assert_eq!(wm.len(), 2);
        assert!(wm.host().commands.is_empty());
    }

    #[test]
    fn test_remove_current_clears_it() {
        let (mut wm, ids) = manager_with(3);
        assert!(wm.set_current(0));
        assert_eq!(wm.current(), Some(ids[0]));
        assert_eq!(wm.current_index(), Some(2));

        assert_eq!(wm.remove_window(ids[0]), Some(0));
        assert_eq!(wm.current(), None);
        assert_eq!(wm.current_index(), None);

        assert!(wm.set_current(0));
        assert_eq!(wm.current(), Some(ids[1]));
    }

    #[test]
    fn test_set_current_noop_when_already_current() {
        let (mut wm, ids) = manager_with(3);
        assert!(wm.set_current(1));
        wm.host_mut().take_commands();
        let idx = wm.current_index().unwrap();
        assert!(!wm.set_current(idx));
        assert!(wm.host().commands.is_empty());
        assert_eq!(wm.current(), Some(ids[1]));
        assert!(!wm.set_current(42));
    }

    #[test]
    fn test_raise_makes_topmost() {
        let (mut wm, ids) = manager_with(4);
        for &id in &[ids[0], ids[2], ids[3], ids[3], ids[1]] {
            wm.raise(id);
            assert_eq!(order(&wm).last(), Some(&id));
            assert_eq!(wm.host().stack.last(), Some(&id));
        }
        assert_eq!(order(&wm), vec![ids[0], ids[2], ids[3], ids[1]]);
    }

    #[test]
    fn test_raise_detaches_then_reattaches() {
        let (mut wm, ids) = manager_with(2);
        wm.host_mut().take_commands();
        wm.raise(ids[0]);
        assert_eq!(
            wm.host_mut().take_commands(),
            vec![Command::Detach(ids[0]), Command::Attach(ids[0], Rect::new(50, 50, 300, 300))]
        );
    }

    #[test]
    fn test_lookups() {
        let (wm, ids) = manager_with(3);
        assert_eq!(wm.index_of(&1), Some(1));
        assert_eq!(wm.index_of(&7), None);
        assert_eq!(wm.content_at(2), Some(&2));
        assert_eq!(wm.content_at(3), None);
        assert_eq!(wm.get_window(0).map(|w| w.id()), Some(ids[0]));
        assert!(wm.get_window(9).is_none());
    }

    #[test]
    fn test_resize_page_clamps() {
        let (mut wm, ids) = manager_with(1);
        wm.resize_page(ids[0], 0, -20);
        assert_eq!(geometry(&wm, ids[0]).size(), Size::new(1, 1));
        assert_eq!(wm.host().commands.last(), Some(&Command::Resize(ids[0], Size::new(1, 1))));
    }

    #[test]
    fn test_tile_four_and_five() {
        let (mut wm, ids) = manager_with(4);
        wm.tile();
        assert_eq!(geometry(&wm, ids[0]), Rect::new(0, 0, 600, 400));
        assert_eq!(geometry(&wm, ids[1]), Rect::new(600, 0, 600, 400));
        assert_eq!(geometry(&wm, ids[2]), Rect::new(0, 400, 600, 400));
        assert_eq!(geometry(&wm, ids[3]), Rect::new(600, 400, 600, 400));

        let (mut wm, ids) = manager_with(5);
        wm.tile();
        assert_eq!(geometry(&wm, ids[0]), Rect::new(0, 0, 400, 400));
        assert_eq!(geometry(&wm, ids[2]), Rect::new(800, 0, 400, 400));
        assert_eq!(geometry(&wm, ids[3]), Rect::new(0, 400, 400, 400));
        assert_eq!(geometry(&wm, ids[4]), Rect::new(400, 400, 400, 400));
        assert_eq!(order(&wm), ids);
        assert_eq!(wm.area_bounds(), Rect::new(0, 0, 1200, 800));
    }

    #[test]
    fn test_tile_is_idempotent() {
        let (mut wm, _) = manager_with(7);
        wm.raise(3);
        wm.tile();
        let first: Vec<(SubWindowId, Rect)> = wm.windows().map(|w| (w.id(), w.geometry())).collect();
        wm.tile();
        let second: Vec<(SubWindowId, Rect)> = wm.windows().map(|w| (w.id(), w.geometry())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tile_empty_is_noop() {
        let mut wm = manager();
        wm.tile();
        assert!(wm.host().commands.is_empty());
    }

    #[test]
    fn test_cascade() {
        let (mut wm, ids) = manager_with(3);
        wm.cascade();
        assert_eq!(geometry(&wm, ids[0]).origin(), Point::new(0, 0));
        assert_eq!(geometry(&wm, ids[1]).origin(), Point::new(50, 50));
        assert_eq!(geometry(&wm, ids[2]).origin(), Point::new(100, 100));
        assert_eq!(geometry(&wm, ids[2]).size(), Size::new(300, 300));
        assert_eq!(order(&wm), ids);
    }

    #[test]
    fn test_maximize() {
        let (mut wm, ids) = manager_with(3);
        wm.maximize(ids[0]);
        assert_eq!(geometry(&wm, ids[0]), Rect::new(0, 0, 1200, 800));
        assert_eq!(order(&wm).last(), Some(&ids[0]));
    }

    #[test]
    fn test_minimize_pins_label_to_bottom() {
        let (mut wm, ids) = manager_with(1);
        wm.move_page(ids[0], 333, 120);
        wm.minimize(ids[0]);
        assert_eq!(geometry(&wm, ids[0]), Rect::new(333, 780, 150, 20));
    }

    #[test]
    fn test_close() {
        let (mut wm, ids) = manager_with(2);
        assert_eq!(wm.close(ids[1]), Some(1));
        assert_eq!(order(&wm), vec![ids[0]]);
        assert!(wm.host().commands.contains(&Command::Detach(ids[1])));
        assert!(!wm.host().stack.contains(&ids[1]));
    }

    #[test]
    fn test_drag_label_moves_and_raises() {
        let (mut wm, ids) = manager_with(2);
        wm.move_page(ids[0], 400, 300);
        // ids[1] sits on top at (50, 50); press ids[0]'s label outside it
        wm.handle_pointer(PointerAction::Down, &held(500, 305));
        assert_eq!(wm.current(), Some(ids[0]));
        assert_eq!(order(&wm).last(), Some(&ids[0]));

        wm.handle_pointer(PointerAction::Move, &held(520, 345));
        assert_eq!(geometry(&wm, ids[0]).origin(), Point::new(420, 340));

        wm.handle_pointer(PointerAction::Up, &PointerEvent::at(900, 700, PointerButtons::empty()));
        assert_eq!(geometry(&wm, ids[0]).origin(), Point::new(800, 695));
        assert_eq!(wm.drag_state(), DragState::Idle);
        assert_eq!(wm.area_bounds(), Rect::new(0, 0, 1200, 995));
    }

    #[test]
    fn test_drag_grows_area_during_gesture() {
        let (mut wm, ids) = manager_with(1);
        wm.pointer_down(PointerTarget::Label(ids[0]), &held(60, 55));
        wm.pointer_move(&held(1060, 55));
        assert_eq!(wm.area_bounds().width, 1350);
        assert!(matches!(wm.drag_state(), DragState::Moving { .. }));
    }

    #[test]
    fn test_drag_resize_upper_left() {
        let (mut wm, ids) = manager_with(1);
        // frame (50, 50)-(350, 350); press near the upper-left corner
        wm.pointer_down(PointerTarget::Frame(ids[0]), &held(52, 52));
        assert!(matches!(wm.drag_state(), DragState::Resizing { .. }));
        wm.pointer_move(&held(32, 42));
        assert_eq!(geometry(&wm, ids[0]), Rect::new(30, 40, 320, 310));
        wm.pointer_up(&held(42, 62));
        assert_eq!(geometry(&wm, ids[0]), Rect::new(40, 60, 310, 290));
        assert_eq!(wm.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_press_ignored_while_active() {
        let (mut wm, ids) = manager_with(2);
        wm.pointer_down(PointerTarget::Label(ids[1]), &held(60, 55));
        let state = wm.drag_state();
        wm.pointer_down(PointerTarget::Label(ids[0]), &held(60, 55));
        assert_eq!(wm.drag_state(), state);
        assert_eq!(wm.current(), Some(ids[1]));
    }

    #[test]
    fn test_removing_dragged_window_resets_gesture() {
        let (mut wm, ids) = manager_with(1);
        wm.pointer_down(PointerTarget::Label(ids[0]), &held(60, 55));
        wm.remove_window(ids[0]);
        assert_eq!(wm.drag_state(), DragState::Idle);
        wm.pointer_move(&held(100, 100));
        wm.pointer_up(&held(100, 100));
        assert!(wm.is_empty());
    }

    #[test]
    fn test_background_press_does_nothing() {
        let (mut wm, _) = manager_with(1);
        wm.host_mut().take_commands();
        wm.handle_pointer(PointerAction::Down, &held(1100, 700));
        assert_eq!(wm.drag_state(), DragState::Idle);
        assert!(wm.host().commands.is_empty());
    }

    #[test]
    fn test_focus_next_cycles() {
        let (mut wm, ids) = manager_with(3);
        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(ids[0]));
        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(ids[1]));
        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(ids[2]));
    }

    #[test]
    fn test_focus_next_from_bottom_current() {
        let (mut wm, ids) = manager_with(2);
        assert!(wm.set_current(0));
        wm.maximize(ids[1]);
        assert_eq!(order(&wm), vec![ids[0], ids[1]]);
        assert_eq!(wm.current_index(), Some(0));

        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(ids[1]));
        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(ids[0]));
    }

    #[test]
    fn test_focus_next_single_and_empty() {
        let mut wm = manager();
        assert!(!wm.focus_next());
        let id = wm.add_window(0, "only");
        assert!(wm.focus_next());
        assert_eq!(wm.current(), Some(id));
        assert!(!wm.focus_next());
    }

    #[test]
    fn test_label_buttons_route_to_actions() {
        let (mut wm, ids) = manager_with(2);
        // Both frames start at (50, 50); ids[1] is on top
        wm.handle_pointer(PointerAction::Down, &held(100, 55));
        assert_eq!(geometry(&wm, ids[1]), Rect::new(0, 0, 1200, 800));
        assert_eq!(order(&wm), vec![ids[0], ids[1]]);

        // Maximized frame now covers the strip at the origin
        wm.handle_pointer(PointerAction::Down, &held(34, 5));
        assert_eq!(geometry(&wm, ids[1]), Rect::new(0, 780, 150, 20));
        assert_eq!(wm.drag_state(), DragState::Idle);

        wm.handle_pointer(PointerAction::Down, &held(54, 60));
        assert_eq!(wm.len(), 1);
        assert!(wm.window(ids[0]).is_none());
        assert!(wm.window(ids[1]).is_some());
    }

    #[test]
    fn test_button_press_ignored_during_gesture() {
        let (mut wm, ids) = manager_with(1);
        wm.pointer_down(PointerTarget::Label(ids[0]), &held(200, 55));
        wm.pointer_down(PointerTarget::Button(ids[0], FrameButton::Close), &held(55, 55));
        assert_eq!(wm.len(), 1);
    }

    #[test]
    fn test_cancel_drag_keeps_live_geometry() {
        let (mut wm, ids) = manager_with(1);
        wm.pointer_down(PointerTarget::Label(ids[0]), &held(60, 55));
        wm.pointer_move(&held(160, 75));
        wm.cancel_drag();
        assert_eq!(wm.drag_state(), DragState::Idle);
        wm.pointer_up(&held(400, 400));
        assert_eq!(geometry(&wm, ids[0]).origin(), Point::new(150, 70));
    }

    #[test]
    fn test_viewport_change_pushes_area_size() {
        let (mut wm, _) = manager_with(1);
        wm.host_mut().take_commands();
        wm.viewport_changed();
        assert!(wm.host().commands.is_empty());

        wm.host_mut().viewport = Size::new(1600, 900);
        wm.viewport_changed();
        assert_eq!(wm.area_bounds(), Rect::new(0, 0, 1600, 900));
        assert_eq!(wm.host_mut().take_commands(), vec![Command::AreaSize(Size::new(1600, 900))]);
    }
}
