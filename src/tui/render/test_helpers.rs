use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, TaskGroup};
use crate::ops::store::Store;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over the given store.
pub fn app_with_store(store: Store) -> App {
    App::new(store, PathBuf::from("taskGroups.json"), &Config::default())
}

/// Two groups, "Home" with three tasks (one done) and an empty "Work".
pub fn sample_store() -> Store {
    let mut store = Store::from_groups(vec![TaskGroup::new("Home"), TaskGroup::new("Work")]);
    store.add_task(0, "Buy milk", "errand").unwrap();
    store.add_task(0, "Wash car", "chore, outside").unwrap();
    store.add_task(0, "Pay rent", "").unwrap();
    store.toggle_complete(0, 2).unwrap();
    store.mark_clean();
    store
}

pub fn sample_app() -> App {
    app_with_store(sample_store())
}

/// The sample app with "Home" selected and focused.
pub fn sample_app_selected() -> App {
    let mut app = sample_app();
    app.select_current_group();
    app
}
