use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus, Mode};
use crate::tui::panels::{GroupEdit, GroupEditKind};
use crate::util::text::{display_width, truncate_to_width};

use super::{push_draft_spans, scroll_offset};

/// Render the task group list (left panel)
pub fn render_group_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Groups;
    let border_color = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Groups ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let groups = app.store.groups();
    let editing = app.groups.edit.as_ref().filter(|_| focused && app.mode == Mode::Edit);

    if groups.is_empty() && editing.is_none() {
        let empty = Paragraph::new(vec![
            Line::from(" No task groups"),
            Line::from(" Press a to add one"),
        ])
        .style(Style::default().fg(app.theme.muted).bg(bg));
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width as usize;
    let selected = app.store.selected_index();
    let mut lines: Vec<Line> = Vec::with_capacity(groups.len() + 1);

    for (i, group) in groups.iter().enumerate() {
        if let Some(edit) = editing
            && edit.kind == GroupEditKind::Rename(i)
        {
            lines.push(edit_line(app, edit, width));
            continue;
        }

        let is_cursor = i == app.groups.cursor && editing.is_none();
        let row_bg = if is_cursor && focused {
            app.theme.accent
        } else if is_cursor {
            app.theme.row_bg
        } else {
            bg
        };
        let is_selected = selected == Some(i);

        let marker = if is_selected { "\u{25B8} " } else { "  " };
        let count = format!(" {}/{}", group.completed_count(), group.tasks.len());
        let name_width = width.saturating_sub(2 + count.len() + 1);
        let name = truncate_to_width(&group.name, name_width);

        let mut name_style = Style::default().fg(app.theme.text).bg(row_bg);
        if is_selected {
            name_style = name_style.fg(app.theme.text_bright).add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {}", marker),
                Style::default().fg(app.theme.accent).bg(row_bg),
            ),
            Span::styled(name.clone(), name_style),
        ];
        let used = 1 + display_width(marker) + display_width(&name);
        let pad = width.saturating_sub(used + count.len());
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(row_bg)));
        spans.push(Span::styled(
            count,
            Style::default().fg(app.theme.muted).bg(row_bg),
        ));
        lines.push(Line::from(spans));
    }

    let mut cursor_row = app.groups.cursor;
    if let Some(edit) = editing
        && edit.kind == GroupEditKind::New
    {
        cursor_row = lines.len();
        lines.push(edit_line(app, edit, width));
    }

    let offset = scroll_offset(cursor_row, inner.height as usize);
    let lines: Vec<Line> = lines.into_iter().skip(offset).collect();
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

/// The inline name input for a new or renamed group
fn edit_line<'a>(app: &App, edit: &GroupEdit, width: usize) -> Line<'a> {
    let bg = app.theme.row_bg;
    let prefix = match edit.kind {
        GroupEditKind::New => " + ",
        GroupEditKind::Rename(_) => " \u{270E} ",
    };
    let mut spans = vec![Span::styled(
        prefix,
        Style::default().fg(app.theme.accent).bg(bg),
    )];
    push_draft_spans(
        &mut spans,
        &edit.draft,
        Style::default().fg(app.theme.text_bright).bg(bg),
        Style::default().fg(app.theme.accent).bg(bg),
        true,
    );
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::store::Store;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(32, 10, |frame, area| render_group_panel(frame, app, area))
    }

    #[test]
    fn empty_list_shows_hint() {
        let app = app_with_store(Store::new());
        let output = render(&app);
        assert!(output.contains("No task groups"));
        assert!(output.contains("Press a to add one"));
    }

    #[test]
    fn lists_groups_with_counts() {
        let app = sample_app();
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("Groups"));
        assert!(lines[1].contains("Home"));
        assert!(lines[1].ends_with("1/3\u{2502}"));
        assert!(lines[2].contains("Work"));
        assert!(lines[2].contains("0/0"));
    }

    #[test]
    fn selected_group_is_marked() {
        let app = sample_app_selected();
        let output = render(&app);
        assert!(output.contains("\u{25B8} Home"));
        assert!(!output.contains("\u{25B8} Work"));
    }

    #[test]
    fn new_group_draft_is_shown_last() {
        let mut app = sample_app();
        app.groups.start_new();
        app.mode = Mode::Edit;
        app.groups.edit.as_mut().unwrap().draft.insert_str("Garden");
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[3].contains("+ Garden\u{258C}"));
    }

    #[test]
    fn rename_draft_replaces_row() {
        let mut app = sample_app();
        assert!(app.groups.start_rename(&app.store));
        app.mode = Mode::Edit;
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("Home\u{258C}"));
        assert!(!lines[1].contains("1/3"));
    }

    #[test]
    fn long_names_are_truncated() {
        let app = app_with_store(Store::from_groups(vec![crate::model::TaskGroup::new(
            "A very long group name that cannot fit",
        )]));
        let output = render(&app);
        assert!(output.contains('\u{2026}'));
    }
}
