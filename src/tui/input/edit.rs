use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::draft::Draft;

use super::*;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel_edit(app),
        (_, KeyCode::Enter) => save_edit(app),
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            if let Some(edit) = &mut app.tasks.edit
                && app.focus == Focus::Tasks
            {
                edit.switch_field();
            }
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            if let Some(draft) = active_draft(app) {
                draft.clear();
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            if let Some(draft) = active_draft(app) {
                draft.insert(c);
            }
        }
        (_, code) => {
            if let Some(draft) = active_draft(app) {
                edit_draft(draft, code);
            }
        }
    }
}

/// Cursor movement and deletion shared by every text input
pub(super) fn edit_draft(draft: &mut Draft, code: KeyCode) {
    match code {
        KeyCode::Backspace => draft.backspace(),
        KeyCode::Delete => draft.delete(),
        KeyCode::Left => draft.left(),
        KeyCode::Right => draft.right(),
        KeyCode::Home => draft.home(),
        KeyCode::End => draft.end(),
        _ => {}
    }
}

/// The draft receiving typed text in the focused panel
pub(super) fn active_draft(app: &mut App) -> Option<&mut Draft> {
    match app.focus {
        Focus::Groups => app.groups.edit.as_mut().map(|e| &mut e.draft),
        Focus::Tasks => app.tasks.edit.as_mut().map(|e| e.focused_mut()),
    }
}

fn cancel_edit(app: &mut App) {
    match app.focus {
        Focus::Groups => app.groups.cancel(),
        Focus::Tasks => app.tasks.cancel(),
    }
    app.mode = Mode::Navigate;
}

fn save_edit(app: &mut App) {
    let result = match app.focus {
        Focus::Groups => app.groups.save(&mut app.store),
        Focus::Tasks => app.tasks.save(&mut app.store),
    };
    match result {
        Ok(()) => {
            app.mode = Mode::Navigate;
            app.sync_panels();
        }
        Err(e) => app.report(e),
    }
}
