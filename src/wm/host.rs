//! Host adapter - the commands and queries the manager needs from the host toolkit
//!
//! The manager never paints. It tells the host where frames go and asks it
//! how large things are. Z-order is expressed through `detach` followed by
//! `attach`, which re-stacks a frame on top.

use super::geometry::{Point, Rect, Size};
use super::subwindow::SubWindowId;

/// Which part of a frame's settled geometry a settle callback reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettleKind {
    Position,
    Size,
}

/// Handle for a one-shot settle callback scheduled with the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettleToken(pub u64);

/// Host collaborator driven by the window manager
pub trait Host {
    /// Opaque content handle wrapped by a frame
    type Content: PartialEq;

    /// Current size of the container viewport
    fn viewport_size(&self) -> Size;

    /// Size the content would like to have
    fn preferred_size(&self, content: &Self::Content) -> Size;

    /// Height of the label strip the host draws for this frame
    fn label_height(&self, id: SubWindowId) -> i32;

    /// Place a frame in the container at `rect`, on top of the stacking order
    fn attach(&mut self, id: SubWindowId, rect: Rect);

    /// Take a frame out of the container
    fn detach(&mut self, id: SubWindowId);

    /// Reposition a frame
    fn move_frame(&mut self, id: SubWindowId, pos: Point);

    /// Resize a frame
    fn resize_frame(&mut self, id: SubWindowId, size: Size);

    /// Size the scrollable container to the area bounds
    fn set_area_size(&mut self, size: Size);

    /// Schedule a one-shot notification for when the host has laid the frame out.
    /// The host answers with `WindowManager::on_settled(token, actual)`.
    fn schedule_settle(&mut self, id: SubWindowId, kind: SettleKind) -> SettleToken;

    /// Cancel a scheduled settle. Returns false if it already fired.
    fn cancel_settle(&mut self, token: SettleToken) -> bool;
}
