//! mdiwm - A multiple-document window layout manager
//!
//! Several independently sized sub-windows share one host container. They
//! can be moved and resized by pointer gestures, raised, minimized,
//! maximized, tiled and cascaded. The engine never paints: it drives an
//! injected [`wm::Host`] with attach/detach/move/resize commands.
//!
//! # Example
//!
//! ```ignore
//! use mdiwm::wm::{LayoutOptions, WindowManager};
//!
//! let mut wm = WindowManager::new(my_host, LayoutOptions::default());
//! let id = wm.add_window(content, "Plot");
//! wm.tile();
//! wm.maximize(id);
//! ```

pub mod config;
pub mod error;
pub mod ui;
pub mod wm;

pub use error::ConfigError;
