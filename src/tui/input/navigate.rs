use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::draft::Draft;

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let quit_armed = std::mem::take(&mut app.quit_armed);
    let overwrite_armed = std::mem::take(&mut app.overwrite_armed);

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => request_quit(app, quit_armed),
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Import / export
        (_, KeyCode::Char('S')) => request_export(app, overwrite_armed),
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => {
            request_export(app, overwrite_armed)
        }
        (_, KeyCode::Char('L')) => {
            app.import_input = Draft::new(app.data_path.display().to_string());
            app.mode = Mode::Import;
        }

        // Focus
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            app.focus = match app.focus {
                Focus::Groups => Focus::Tasks,
                Focus::Tasks => Focus::Groups,
            };
        }
        (_, KeyCode::Char('h')) | (_, KeyCode::Left) => app.focus = Focus::Groups,
        (_, KeyCode::Char('l')) | (_, KeyCode::Right) => app.focus = Focus::Tasks,

        // Cursor
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => move_cursor(app, isize::MIN),
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => move_cursor(app, isize::MAX),

        _ => match app.focus {
            Focus::Groups => handle_group_key(app, key),
            Focus::Tasks => handle_task_key(app, key),
        },
    }
}

fn request_quit(app: &mut App, armed: bool) {
    if !app.store.is_dirty() || armed {
        app.should_quit = true;
        return;
    }
    app.quit_armed = true;
    app.error("Unsaved changes: press q again to quit, S to save");
}

fn request_export(app: &mut App, armed: bool) {
    if app.data_unreadable && !armed {
        app.overwrite_armed = true;
        app.error(format!(
            "{} could not be loaded: press S again to overwrite it",
            app.data_path.display()
        ));
        return;
    }
    app.export();
}

fn move_cursor(app: &mut App, delta: isize) {
    match app.focus {
        Focus::Groups => {
            let len = app.store.groups().len();
            app.groups.move_by(delta, len);
        }
        Focus::Tasks => app.tasks.move_by(delta, &app.store),
    }
}

fn handle_group_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.select_current_group(),
        KeyCode::Char('a') => {
            app.groups.start_new();
            app.mode = Mode::Edit;
        }
        KeyCode::Char('r') | KeyCode::Char('e') => {
            if app.groups.start_rename(&app.store) {
                app.mode = Mode::Edit;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_current_group(),
        _ => {}
    }
}

fn handle_task_key(app: &mut App, key: KeyEvent) {
    let Some(group) = app.tasks.group else {
        if matches!(key.code, KeyCode::Char('a')) {
            app.error("Select a task group first");
        }
        return;
    };

    match key.code {
        KeyCode::Char('a') => {
            if app.tasks.start_new() {
                app.mode = Mode::Edit;
            }
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if app.tasks.start_edit(&app.store) {
                app.mode = Mode::Edit;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Err(e) = app.tasks.delete_current(&mut app.store) {
                app.report(e);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Err(e) = app.tasks.toggle_current(&mut app.store) {
                app.report(e);
            }
        }
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char('#') => {
            if app.store.distinct_tags(group).is_empty() {
                app.info("No tags in this group");
            } else {
                app.tasks.tag_cursor = 0;
                app.mode = Mode::TagPicker;
            }
        }
        KeyCode::Esc => {
            app.tasks.filter.clear();
            app.tasks.clamp(&app.store);
        }
        _ => {}
    }
}
