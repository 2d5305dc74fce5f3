use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::{info, warn};

use crate::io::store_io::{self, StoreFileError};
use crate::model::Config;
use crate::ops::store::{Store, StoreError};

use super::draft::Draft;
use super::input;
use super::panels::{GroupPanel, TaskPanel};
use super::render;
use super::theme::Theme;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Groups,
    Tasks,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the focused panel's edit drafts
    Edit,
    /// Typing the task search query
    Search,
    /// Choosing required tags for the task list
    TagPicker,
    /// Typing a path to import from
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state
pub struct App {
    pub store: Store,
    /// Export target and default import source
    pub data_path: PathBuf,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub focus: Focus,
    pub mode: Mode,
    pub groups: GroupPanel,
    pub tasks: TaskPanel,
    /// Path being typed in Import mode
    pub import_input: Draft,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    /// Set after a quit attempt with unsaved changes; a second `q` quits
    pub quit_armed: bool,
    /// `data_path` exists but could not be loaded. Saving over it needs a
    /// second `S` until a save or import succeeds.
    pub data_unreadable: bool,
    pub overwrite_armed: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store, data_path: PathBuf, config: &Config) -> Self {
        App {
            store,
            data_path,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            focus: Focus::Groups,
            mode: Mode::Navigate,
            groups: GroupPanel::default(),
            tasks: TaskPanel::default(),
            import_input: Draft::default(),
            status: None,
            show_help: false,
            quit_armed: false,
            data_unreadable: false,
            overwrite_armed: false,
            should_quit: false,
        }
    }

    /// Load `data_path` and build the app around it. A missing file starts
    /// empty; an unreadable one starts empty with the error shown and the
    /// file protected from `S`.
    pub fn open(data_path: PathBuf, config: &Config) -> Self {
        match store_io::load_or_empty(&data_path) {
            Ok(store) => App::new(store, data_path, config),
            Err(e) => {
                warn!(error = %e, "could not load data file");
                let mut app = App::new(Store::new(), data_path, config);
                app.data_unreadable = true;
                app.error(format!("Error loading data: {}", e));
                app
            }
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    /// Report a declined store operation. Blank input is not worth a
    /// message: the draft simply stays open.
    pub fn report(&mut self, err: StoreError) {
        match err {
            StoreError::EmptyName | StoreError::EmptyText => {}
            other => self.error(other.to_string()),
        }
    }

    /// Bring both panels in line with the store after any change
    pub fn sync_panels(&mut self) {
        let len = self.store.groups().len();
        self.groups.clamp(len);
        if self.tasks.sync(self.store.selected_index()) {
            if self.mode != Mode::Navigate && self.focus == Focus::Tasks {
                self.mode = Mode::Navigate;
            }
        } else {
            self.tasks.clamp(&self.store);
        }
    }

    /// Select the group under the group cursor and move focus to its tasks
    pub fn select_current_group(&mut self) {
        match self.store.select_group(self.groups.cursor) {
            Ok(()) => {
                self.groups.cancel();
                self.focus = Focus::Tasks;
            }
            Err(e) => self.report(e),
        }
        self.sync_panels();
    }

    pub fn delete_current_group(&mut self) {
        let index = self.groups.cursor;
        match self.store.delete_group(index) {
            Ok(group) => {
                self.groups.group_deleted(index, self.store.groups().len());
                self.tasks.group_deleted(index);
                self.info(format!("Deleted group \"{}\"", group.name));
            }
            Err(e) => self.report(e),
        }
        self.sync_panels();
    }

    /// Write the store to the data file
    pub fn export(&mut self) {
        let path = self.data_path.clone();
        match store_io::save_file(&mut self.store, &path) {
            Ok(()) => {
                self.data_unreadable = false;
                self.info(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.error(format!("Error saving data: {}", e));
            }
        }
    }

    /// Replace the store with the contents of `path`; on failure nothing
    /// changes and the error is shown.
    pub fn import_from(&mut self, path: PathBuf) {
        match store_io::load_file(&mut self.store, &path) {
            Ok(_) => {
                self.groups = GroupPanel::default();
                self.sync_panels();
                self.focus = Focus::Groups;
                self.data_path = path;
                self.data_unreadable = false;
                self.info("Data loaded successfully!");
            }
            Err(StoreFileError::Interchange { .. }) => {
                self.error("Error loading data: Invalid JSON");
            }
            Err(e) => self.error(format!("Error loading data: {}", e)),
        }
    }

    /// Case-insensitive literal regex for the current search query, used to
    /// highlight matches
    pub fn search_re(&self) -> Option<Regex> {
        let query = self.tasks.filter.query.trim();
        if query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(query))).ok()
    }
}

/// Run the TUI application
pub fn run(data_path: PathBuf, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open(data_path, config);
    info!(path = %app.data_path.display(), groups = app.store.groups().len(), "tui starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    info!(unsaved = app.store.is_dirty(), "tui exiting");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
