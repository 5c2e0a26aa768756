//! Terminal host for the window manager.
//!
//! - **term_host**: `Host` implementation over terminal cells
//! - **renderer**: Draws frames and the status bar with crossterm

pub mod renderer;
pub mod term_host;

pub use renderer::Renderer;
pub use term_host::{DocumentId, TermHost};
