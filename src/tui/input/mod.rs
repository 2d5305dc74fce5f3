mod edit;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use prompt::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Feedback lasts until the next key press
    app.status = None;

    if app.show_help {
        app.show_help = false;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Search => handle_search(app, key),
        Mode::TagPicker => handle_tag_picker(app, key),
        Mode::Import => handle_import(app, key),
    }
}

/// Handle a bracketed paste: the text goes into whichever input is active.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Edit => {
            if let Some(draft) = active_draft(app) {
                draft.insert_str(text);
            }
        }
        Mode::Search => {
            app.tasks.filter.query.push_str(&text.replace(['\n', '\r'], " "));
            app.tasks.clamp(&app.store);
        }
        Mode::Import => app.import_input.insert_str(text),
        Mode::Navigate | Mode::TagPicker => {}
    }
}

/// Shift+letter arrives as lowercase with SHIFT on some terminals
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
