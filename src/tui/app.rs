//! Interactive terminal front-end: application state and event loop.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store_io::{self, StoreError};
use crate::io::config_io;
use crate::model::config::Config;
use crate::model::store::TaskStore;
use crate::model::task::Priority;
use crate::mood::MoodEngine;
use crate::tui::input;
use crate::tui::render::{self, MIN_HEIGHT, MIN_WIDTH};
use crate::tui::snapshot::RedrawSnapshot;
use crate::tui::theme::Theme;

/// How long each tick blocks waiting for input
const POLL_INTERVAL: Duration = Duration::from_millis(80);

/// Minimum gap between repaints; dirtiness is re-checked next tick
const MIN_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// How long a status message stays on screen
const STATUS_TTL: Duration = Duration::from_secs(2);

/// Which input map is active and which panel (if any) is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Normal,
    Input,
    Edit,
    ConfirmDelete,
}

pub struct App {
    pub store: TaskStore,
    pub mood: MoodEngine,
    pub theme: Theme,
    pub mode: Mode,
    /// Text being composed in the Input/Edit panel
    pub input_buffer: String,
    /// Byte offset into `input_buffer`, always on a grapheme boundary
    pub input_cursor: usize,
    /// Priority the Input panel will assign on commit
    pub input_priority: Priority,
    pub default_priority: Priority,
    pub show_help: bool,
    pub should_quit: bool,
    /// One-shot: skip change detection and the repaint rate limit once
    pub force_redraw: bool,
    /// Rows jumped by PageUp/PageDown, derived from the terminal height
    pub page_jump: usize,
    pub status_message: Option<String>,
    status_set_at: Option<Instant>,
    data_path: PathBuf,
}

impl App {
    pub fn new(store: TaskStore, mood: MoodEngine, config: &Config, data_path: PathBuf) -> App {
        App {
            store,
            mood,
            theme: Theme::default(),
            mode: Mode::Normal,
            input_buffer: String::new(),
            input_cursor: 0,
            input_priority: config.default_priority,
            default_priority: config.default_priority,
            show_help: false,
            should_quit: false,
            force_redraw: false,
            page_jump: 1,
            status_message: None,
            status_set_at: None,
            data_path,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn expire_status(&mut self, now: Instant) {
        if let Some(set_at) = self.status_set_at {
            if now.duration_since(set_at) >= STATUS_TTL {
                self.status_message = None;
                self.status_set_at = None;
            }
        }
    }

    /// Leave the Input/Edit panel and drop its transient state
    pub fn close_input(&mut self) {
        self.mode = Mode::Normal;
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.input_priority = self.default_priority;
    }

    /// Persistence choke point: every mutation marks the store dirty and
    /// the next pass through here writes it out.
    pub fn persist_if_dirty(&mut self) {
        if self.store.take_dirty() {
            if let Err(err) = self.store.save(&self.data_path) {
                self.set_status(format!("Save failed: {}", err));
            }
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.data_path)
    }
}

pub fn run() -> io::Result<()> {
    let config = config_io::load_config();
    let data_path = store_io::data_path(&config);
    let store = TaskStore::load(&data_path);
    let mood = MoodEngine::new(config.mood_animation);
    let mut app = App::new(store, mood, &config, data_path);

    install_panic_hook();
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Unconditional save on the way out; a failure is reported after the
    // terminal is back in cooked mode so the message survives.
    let save_result = app.save();
    restore_terminal()?;
    if let Err(err) = save_result {
        eprintln!("warning: could not save tasks: {}", err);
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_snapshot: Option<RedrawSnapshot> = None;
    let mut last_repaint: Option<Instant> = None;
    let mut last_autosave = Instant::now();

    loop {
        let now = Instant::now();
        app.expire_status(now);

        if now.duration_since(last_autosave) >= AUTOSAVE_INTERVAL {
            match app.save() {
                Ok(()) => {
                    app.store.take_dirty();
                    app.set_status("Auto-saved");
                }
                Err(err) => app.set_status(format!("Save failed: {}", err)),
            }
            last_autosave = now;
        }

        let size = terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            terminal.draw(|f| render::render_too_small(f, &app.theme))?;
            last_snapshot = None;
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                }
            }
            continue;
        }

        app.page_jump = (size.height as usize).saturating_sub(3).max(1);
        app.mood.update(&app.store.tasks);

        let snapshot = RedrawSnapshot::capture(app, size.width, size.height);
        let changed = last_snapshot.as_ref() != Some(&snapshot);
        let interval_ok =
            last_repaint.is_none_or(|t| now.duration_since(t) >= MIN_REPAINT_INTERVAL);
        if std::mem::take(&mut app.force_redraw) || (changed && interval_ok) {
            terminal.draw(|f| render::render(f, app))?;
            last_snapshot = Some(snapshot);
            last_repaint = Some(now);
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = input::map_key(app.mode, key) {
                        input::apply(app, cmd);
                        app.persist_if_dirty();
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Put the terminal back together before the default panic output runs,
/// otherwise the message is lost to the alternate screen.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

#[cfg(test)]
pub fn test_app() -> App {
    App::new(
        TaskStore::default(),
        MoodEngine::with_seed(false, 7),
        &Config::default(),
        PathBuf::from("/dev/null"),
    )
}
