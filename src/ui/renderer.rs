//! Renderer for the terminal host.
//!
//! Draws every attached frame bottom-to-top as a single-line box with its
//! label centred in the top border, then the status bar on the last row.
//!
//! ```text
//! begin_frame()  → Hide cursor, disable autowrap, start sync
//!     ↓
//! render content → Clear, frames, status bar
//!     ↓
//! end_frame()    → Show cursor, enable autowrap, end sync, flush
//! ```

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use unicode_width::UnicodeWidthChar;

use crate::wm::{ButtonStrip, FrameButton, Rect, RandomSource, SubWindow, WindowManager};

use super::term_host::{DocumentId, TermHost};

/// Begin a render frame (synchronized update, hide cursor, disable autowrap)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    write!(out, "\x1b[?7l")?;
    execute!(out, Hide)?;
    Ok(())
}

/// End a render frame (show cursor, enable autowrap, end synchronized update, flush)
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Show)?;
    write!(out, "\x1b[?7h")?;
    write!(out, "\x1b[?2026l")?;
    out.flush()?;
    Ok(())
}

/// Execute a render operation with frame guards, ensuring cleanup on error
fn with_frame<W: Write, F, R>(out: &mut W, f: F) -> io::Result<R>
where
    F: FnOnce(&mut W) -> io::Result<R>,
{
    begin_frame(out)?;
    let result = f(out);
    let _ = end_frame(out);
    result
}

/// Border characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// Truncate `text` to at most `max` display columns
pub fn fit_width(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

/// Terminal renderer
pub struct Renderer {
    initialized: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        stdout.flush()?;

        self.initialized = true;
        Ok(())
    }

    /// Cleanup
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let mut stdout = io::stdout();
        write!(stdout, "\x1b[?7h")?;
        write!(stdout, "\x1b[?2026l")?;
        stdout.flush()?;

        execute!(
            stdout,
            Show,
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        self.initialized = false;
        Ok(())
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Render the window manager state
    pub fn render<R: RandomSource>(&mut self, wm: &WindowManager<TermHost, R>) -> io::Result<()> {
        let mut stdout = io::stdout();
        with_frame(&mut stdout, |out| {
            queue!(out, Clear(ClearType::All))?;
            let viewport = wm.host().viewport_rect();
            for &id in wm.host().stacking_order() {
                let (Some(window), Some(rect)) = (wm.window(id), wm.host().frame(id)) else {
                    continue;
                };
                let current = wm.current() == Some(id);
                render_window(out, window, rect, viewport, wm.options().button_strip(), current)?;
            }
            render_status_bar(out, wm)?;
            Ok(())
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Text of a label strip button `width` cells wide
fn button_text(button: FrameButton, width: i32) -> String {
    let width = width.max(0) as usize;
    if width >= 3 {
        let inner = width - 3;
        format!("[{:>left$}{}{:right$}]", "", button.glyph(), "", left = inner / 2, right = inner - inner / 2)
    } else {
        let mut text = String::new();
        text.push(button.glyph());
        text.push_str(&" ".repeat(width.saturating_sub(1)));
        text.chars().take(width).collect()
    }
}

/// Top border: corner, label buttons, centred title, corner
fn title_row(window: &SubWindow<DocumentId>, rect: Rect, strip: ButtonStrip) -> String {
    let chars = BorderChars::single();
    let width = rect.width.max(2);
    let label = Rect::new(0, 0, width, window.label_height());

    let mut line = String::new();
    line.push(chars.top_left);
    let mut col = 1;
    for button in FrameButton::ALL {
        let Some(cell) = strip.button_rect(label, button) else {
            continue;
        };
        if cell.x < col || cell.right() > width - 1 {
            continue;
        }
        while col < cell.x {
            line.push(chars.horizontal);
            col += 1;
        }
        line.push_str(&button_text(button, cell.width));
        col += cell.width;
    }

    let room = (width - 1 - col).max(0);
    let title = fit_width(&window.display_title(), room.saturating_sub(2) as usize);
    let title_width: i32 = title.chars().map(|c| c.width().unwrap_or(0) as i32).sum();
    let left_pad = (room - title_width).max(0) / 2;
    let title_start = col + left_pad;
    while col < title_start {
        line.push(chars.horizontal);
        col += 1;
    }
    line.push_str(&title);
    col += title_width;
    while col < width - 1 {
        line.push(chars.horizontal);
        col += 1;
    }
    line.push(chars.top_right);
    line
}

/// Draw one frame, clipped to the viewport
fn render_window<W: Write>(
    out: &mut W,
    window: &SubWindow<DocumentId>,
    rect: Rect,
    viewport: Rect,
    strip: ButtonStrip,
    current: bool,
) -> io::Result<()> {
    let chars = BorderChars::single();
    let width = rect.width.max(2);
    let height = rect.height.max(2);

    if current {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }

    for row in 0..height {
        let y = rect.y + row;
        if y < viewport.y || y >= viewport.bottom() {
            continue;
        }
        let line = if row == 0 {
            title_row(window, rect, strip)
        } else {
            let (left, fill, right) = if row == height - 1 {
                (chars.bottom_left, chars.horizontal, chars.bottom_right)
            } else {
                (chars.vertical, ' ', chars.vertical)
            };
            let mut line = String::new();
            line.push(left);
            line.extend(std::iter::repeat(fill).take((width - 2) as usize));
            line.push(right);
            line
        };
        write_clipped(out, rect.x, y, &line, viewport)?;
    }

    if current {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Write a single-width line starting at column `x`, dropping cells outside the viewport
fn write_clipped<W: Write>(out: &mut W, x: i32, y: i32, line: &str, viewport: Rect) -> io::Result<()> {
    let skip = (viewport.x - x).max(0) as usize;
    let start = x.max(viewport.x);
    let room = (viewport.right() - start).max(0) as usize;
    let visible: String = line.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    queue!(out, MoveTo(start as u16, y as u16))?;
    write!(out, "{}", visible)
}

/// Render the status bar on the last terminal row
fn render_status_bar<W: Write, R: RandomSource>(out: &mut W, wm: &WindowManager<TermHost, R>) -> io::Result<()> {
    let viewport = wm.host().viewport_rect();
    let area = wm.area_bounds();
    let current = match wm.current_index() {
        Some(idx) => format!("{}", idx + 1),
        None => "-".to_string(),
    };
    let status = format!(
        " {} windows | current {} | area {}x{} ",
        wm.len(),
        current,
        area.width,
        area.height
    );
    let shortcuts = "n:new t:tile c:cascade m:max z:min x:close Tab:next q:quit ";
    let width = viewport.width.max(0) as usize;
    let padding = width.saturating_sub(status.len() + shortcuts.len());

    queue!(out, MoveTo(0, viewport.bottom() as u16), SetAttribute(Attribute::Reverse))?;
    let line = format!("{}{:padding$}{}", status, "", shortcuts, padding = padding);
    write!(out, "{}", fit_width(&line, width))?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    Ok(())
}
