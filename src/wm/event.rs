//! Pointer input delivered by the host dispatcher

use bitflags::bitflags;

use super::subwindow::SubWindowId;

bitflags! {
    /// Button and modifier mask carried with every pointer event
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerButtons: u8 {
        const PRIMARY   = 0b0000_0001;
        const MIDDLE    = 0b0000_0010;
        const SECONDARY = 0b0000_0100;
        const SHIFT     = 0b0001_0000;
        const CTRL      = 0b0010_0000;
        const ALT       = 0b0100_0000;
    }
}

/// A pointer sample. `x`/`y` are container-local, `x_root`/`y_root` are screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub x_root: i32,
    pub y_root: i32,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32, x_root: i32, y_root: i32, buttons: PointerButtons) -> Self {
        Self { x, y, x_root, y_root, buttons }
    }

    /// Event whose local and root coordinates coincide
    pub fn at(x: i32, y: i32, buttons: PointerButtons) -> Self {
        Self::new(x, y, x, y, buttons)
    }

    pub fn primary_held(&self) -> bool {
        self.buttons.contains(PointerButtons::PRIMARY)
    }
}

/// Buttons packed at the start of a frame's label strip, in strip order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameButton {
    Close,
    Minimize,
    Maximize,
}

impl FrameButton {
    pub const ALL: [FrameButton; 3] = [FrameButton::Close, FrameButton::Minimize, FrameButton::Maximize];

    /// Glyph drawn on the button
    pub fn glyph(self) -> char {
        match self {
            FrameButton::Close => 'x',
            FrameButton::Minimize => 'v',
            FrameButton::Maximize => '^',
        }
    }
}

/// What a pointer press landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Label strip of a sub-window (starts a move)
    Label(SubWindowId),
    /// One of the label strip buttons
    Button(SubWindowId, FrameButton),
    /// Frame border or body of a sub-window (may start a resize)
    Frame(SubWindowId),
    /// Empty container area
    Background,
}

/// Kind of pointer event routed through the manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}
