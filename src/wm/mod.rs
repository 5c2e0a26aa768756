//! Window Manager - MDI-style sub-window management inside one container.
//!
//! This module provides the core layout engine:
//!
//! - **manager**: Top-level `WindowManager` owning sub-windows and z-order
//! - **subwindow**: A single managed pane (geometry + content handle)
//! - **drag**: Pointer gesture state machine (move / resize)
//! - **layout**: Stateless geometry (tile, cascade, resize handles, bounds)
//! - **host**: Adapter trait the host toolkit implements
//!
//! # Module Hierarchy
//!
//! ```text
//! wm/
//! ├── mod.rs        - Module exports
//! ├── manager.rs    - WindowManager (top-level coordinator)
//! ├── drag.rs       - DragController state machine
//! ├── layout.rs     - Geometry algorithms
//! ├── subwindow.rs  - SubWindow
//! ├── host.rs       - Host adapter trait and settle tokens
//! ├── event.rs      - Pointer events, targets and label buttons
//! ├── geometry.rs   - Point / Size / Rect
//! ├── placement.rs  - Random source for initial placement
//! └── options.rs    - Construction-time options
//! ```

pub mod drag;
pub mod event;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod manager;
pub mod options;
pub mod placement;
pub mod subwindow;

pub use drag::{DragController, DragState};
pub use event::{FrameButton, PointerAction, PointerButtons, PointerEvent, PointerTarget};
pub use geometry::{Point, Rect, Size};
pub use host::{Host, SettleKind, SettleToken};
pub use layout::{ButtonStrip, ResizeHandle, ResizeUpdates};
pub use manager::WindowManager;
pub use options::LayoutOptions;
pub use placement::{RandomSource, SeededRandom};
pub use subwindow::{SubWindow, SubWindowId};
