//! mdiwm - An MDI window layout manager running in the terminal
//!
//! The terminal acts as the host container: each sub-window is drawn as a
//! box, dragged by its label row and resized from its edges with the mouse.
//! The `[x]`, `[v]` and `[^]` buttons in the label row close, minimize and
//! maximize the window.
//!
//! # Quick Start
//!
//! ```text
//! mdiwm                  # Start with three windows
//! mdiwm --windows 6      # Start with six windows
//! mdiwm --seed 42        # Deterministic initial placement
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | n | New window |
//! | t | Tile |
//! | c | Cascade |
//! | m | Maximize current |
//! | z | Minimize current |
//! | x | Close current |
//! | Tab | Next window |
//! | q / Esc | Quit |

use std::env;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use mdiwm::config::Config as MdiConfig;
use mdiwm::ui::{DocumentId, Renderer, TermHost};
use mdiwm::wm::{
    DragState, PointerAction, PointerButtons, PointerEvent, PointerTarget, SeededRandom, WindowManager,
};

type Manager = WindowManager<TermHost, SeededRandom>;

/// Command-line options
struct Args {
    /// Placement seed
    seed: Option<u64>,
    /// Windows opened at startup
    windows: u32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            seed: None,
            windows: 3,
        }
    }
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("mdiwm {}", VERSION);
}

fn print_help() {
    eprintln!("mdiwm {} - MDI window layout manager for the terminal", VERSION);
    eprintln!();
    eprintln!("Usage: mdiwm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --windows <N>         Windows opened at startup (default 3)");
    eprintln!("  --seed <N>            Seed for initial window placement");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  n new, t tile, c cascade, m maximize, z minimize, x close,");
    eprintln!("  Tab next window, q/Esc quit");
    eprintln!();
    eprintln!("Mouse:");
    eprintln!("  Drag a window's title row to move it, its border to resize it.");
    eprintln!("  Click [x] [v] [^] in the title row to close, minimize, maximize.");
    eprintln!();
    eprintln!("Config: ~/.mdiwm/config.toml   Log: ~/.mdiwm/mdiwm.log");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("Missing seed argument")?;
                parsed.seed = Some(value.parse().map_err(|_| format!("Invalid seed: {}", value))?);
            }
            "--windows" => {
                i += 1;
                let value = args.get(i).ok_or("Missing window count")?;
                parsed.windows = value.parse().map_err(|_| format!("Invalid window count: {}", value))?;
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn init_logging(config: &MdiConfig) {
    let log_path = MdiConfig::config_dir()
        .map(|dir| dir.join("mdiwm.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("mdiwm.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(config.tracing_level())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = MdiConfig::load();
    init_logging(&config);
    info!("mdiwm {} starting...", VERSION);

    let (cols, rows) = Renderer::size()?;
    info!("Terminal size: {}x{}", cols, rows);

    let seed = args.seed.or(config.seed);
    let rng = match seed {
        Some(seed) => SeededRandom::with_seed(seed),
        None => SeededRandom::new(),
    };
    let host = TermHost::new(cols, rows, config.layout.label_height);
    let mut wm: Manager = WindowManager::with_rng(host, config.layout.to_options(), rng);

    let mut next_doc: DocumentId = 0;
    for _ in 0..args.windows {
        open_document(&mut wm, &mut next_doc);
    }

    let mut renderer = Renderer::new();
    renderer.init()?;

    let result = run_main_loop(&mut wm, &mut renderer, &mut next_doc);

    let _ = renderer.cleanup();
    if let Err(ref e) = result {
        error!("Main loop failed: {}", e);
    }
    info!("mdiwm exiting");
    result
}

fn open_document(wm: &mut Manager, next_doc: &mut DocumentId) {
    let doc = *next_doc;
    *next_doc += 1;
    let id = wm.add_window(doc, format!("Document {}", doc + 1));
    if let Some(index) = wm.position_of(id) {
        wm.set_current(index);
    }
}

/// Main event loop
fn run_main_loop(wm: &mut Manager, renderer: &mut Renderer, next_doc: &mut DocumentId) -> anyhow::Result<()> {
    let poll_timeout = Duration::from_millis(50);
    let mut dirty = true;

    loop {
        if dirty {
            renderer.render(wm)?;
            dirty = false;

            // The frames are now laid out; report their real geometry
            for (token, rect) in wm.host_mut().take_settles() {
                if wm.on_settled(token, rect) {
                    dirty = true;
                }
            }
        }

        if !event::poll(poll_timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
                    break;
                }
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('n') => open_document(wm, next_doc),
                    KeyCode::Char('t') => wm.tile(),
                    KeyCode::Char('c') => wm.cascade(),
                    KeyCode::Char('m') => {
                        if let Some(id) = wm.current() {
                            wm.maximize(id);
                        }
                    }
                    KeyCode::Char('z') => {
                        if let Some(id) = wm.current() {
                            wm.minimize(id);
                        }
                    }
                    KeyCode::Char('x') => {
                        if let Some(id) = wm.current() {
                            wm.close(id);
                        }
                    }
                    KeyCode::Tab => {
                        wm.focus_next();
                    }
                    _ => continue,
                }
                dirty = true;
            }
            Event::Mouse(mouse_event) => {
                if handle_mouse(wm, &mouse_event) {
                    dirty = true;
                }
            }
            Event::Resize(cols, rows) => {
                info!("Terminal resized to {}x{}", cols, rows);
                wm.host_mut().set_terminal_size(cols, rows);
                wm.viewport_changed();
                dirty = true;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Convert crossterm modifiers to the pointer mask
fn modifier_buttons(mods: KeyModifiers) -> PointerButtons {
    let mut buttons = PointerButtons::empty();
    if mods.contains(KeyModifiers::SHIFT) {
        buttons |= PointerButtons::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        buttons |= PointerButtons::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        buttons |= PointerButtons::ALT;
    }
    buttons
}

fn button_mask(button: MouseButton) -> PointerButtons {
    match button {
        MouseButton::Left => PointerButtons::PRIMARY,
        MouseButton::Middle => PointerButtons::MIDDLE,
        MouseButton::Right => PointerButtons::SECONDARY,
    }
}

/// Translate a crossterm mouse event into a pointer action.
/// The terminal is the screen, so local and root coordinates coincide.
fn translate_mouse(mouse: &MouseEvent) -> Option<(PointerAction, PointerEvent)> {
    let x = mouse.column as i32;
    let y = mouse.row as i32;
    let mods = modifier_buttons(mouse.modifiers);

    let (action, buttons) = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => (PointerAction::Down, PointerButtons::PRIMARY),
        MouseEventKind::Drag(button) => (PointerAction::Move, button_mask(button)),
        MouseEventKind::Up(_) => (PointerAction::Up, PointerButtons::empty()),
        _ => return None,
    };
    Some((action, PointerEvent::at(x, y, buttons | mods)))
}

/// Route a mouse event into the manager; returns true if a redraw is needed
fn handle_mouse(wm: &mut Manager, mouse: &MouseEvent) -> bool {
    let Some((action, pointer)) = translate_mouse(mouse) else {
        return false;
    };

    if action != PointerAction::Down {
        wm.handle_pointer(action, &pointer);
        return true;
    }

    let target = wm.window_at(pointer.x, pointer.y);
    wm.pointer_down(target, &pointer);
    // A press inside a frame but away from its edges just focuses it
    if let PointerTarget::Frame(id) = target {
        if wm.drag_state() == DragState::Idle {
            if let Some(index) = wm.position_of(id) {
                wm.set_current(index);
            }
        }
    }
    true
}
