use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::text::prev_grapheme_boundary;

use super::*;

/// Live search: the task list narrows as the query is typed
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let query = &mut app.tasks.filter.query;
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            query.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => app.mode = Mode::Navigate,
        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_grapheme_boundary(query, query.len()) {
                query.truncate(prev);
            }
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => query.clear(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => query.push(c),
        _ => {}
    }
    app.tasks.clamp(&app.store);
}

/// Pick required tags from the tags used in the current group
pub(super) fn handle_tag_picker(app: &mut App, key: KeyEvent) {
    let Some(group) = app.tasks.group else {
        app.mode = Mode::Navigate;
        return;
    };
    let count = app.store.distinct_tags(group).len();

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('#') | KeyCode::Char('q') => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.tasks.tag_cursor = (app.tasks.tag_cursor + 1).min(count.saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tasks.tag_cursor = app.tasks.tag_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            app.tasks.toggle_tag_filter(&app.store);
        }
        KeyCode::Char('c') => {
            app.tasks.filter.tags.clear();
            app.tasks.clamp(&app.store);
        }
        _ => {}
    }
}

/// Path prompt for loading an interchange file
pub(super) fn handle_import(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.mode = Mode::Navigate,
        (_, KeyCode::Enter) => {
            let path = app.import_input.as_str().trim().to_string();
            app.mode = Mode::Navigate;
            if path.is_empty() {
                return;
            }
            app.import_from(PathBuf::from(path));
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => app.import_input.clear(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => app.import_input.insert(c),
        (_, code) => edit_draft(&mut app.import_input, code),
    }
}
