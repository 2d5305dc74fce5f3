use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Task;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::panels::{TaskEdit, TaskEditKind, TaskField};
use crate::util::text::display_width;

use super::{push_draft_spans, push_highlighted_spans, scroll_offset};

/// Render the tasks of the selected group (right panel)
pub fn render_task_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Tasks;
    let border_color = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let group = app.tasks.group.and_then(|g| app.store.group(g));
    let title = match group {
        Some(group) => format!(" {} ", group.name),
        None => " Tasks ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(group) = group else {
        let hint = Paragraph::new(" Select a task group from the menu.")
            .style(Style::default().fg(app.theme.muted).bg(bg));
        frame.render_widget(hint, inner);
        return;
    };

    let width = inner.width as usize;
    let visible = app.tasks.visible(&app.store);
    let editing = app.tasks.edit.as_ref().filter(|_| focused && app.mode == Mode::Edit);
    let search_re = app.search_re();

    let mut lines: Vec<Line> = Vec::new();
    if !app.tasks.filter.is_empty() || app.mode == Mode::Search {
        lines.push(filter_line(app, visible.len(), group.tasks.len()));
    }
    let header_rows = lines.len();
    let mut cursor_row = header_rows;

    for (row, (index, task)) in visible.iter().enumerate() {
        let is_cursor = row == app.tasks.cursor;
        if is_cursor {
            cursor_row = lines.len();
        }
        if let Some(edit) = editing
            && edit.kind == TaskEditKind::Edit(*index)
        {
            lines.extend(edit_lines(app, edit, width));
            continue;
        }

        let row_bg = match (is_cursor, focused && editing.is_none()) {
            (true, true) => app.theme.accent,
            (true, false) => app.theme.row_bg,
            _ => bg,
        };
        lines.push(task_line(app, task, row_bg, width, search_re.as_ref()));
    }

    if let Some(edit) = editing
        && edit.kind == TaskEditKind::New
    {
        cursor_row = lines.len() + 1;
        lines.extend(edit_lines(app, edit, width));
    }

    if lines.len() == header_rows {
        let msg = if group.tasks.is_empty() {
            " No tasks yet. Press a to add one"
        } else {
            " No tasks match"
        };
        lines.push(Line::from(Span::styled(
            msg,
            Style::default().fg(app.theme.muted).bg(bg),
        )));
    }

    // The filter line stays pinned; only the rows below it scroll.
    let body_height = (inner.height as usize).saturating_sub(header_rows);
    let offset = scroll_offset(cursor_row.saturating_sub(header_rows), body_height);
    let mut shown: Vec<Line> = lines[..header_rows].to_vec();
    shown.extend(lines.into_iter().skip(header_rows + offset));

    let paragraph = Paragraph::new(shown).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

/// ` /query  #tag  2 of 5` summary above the list
fn filter_line<'a>(app: &App, shown: usize, total: usize) -> Line<'a> {
    let bg = app.theme.background;
    let searching = app.mode == Mode::Search;
    let query_color = if searching {
        app.theme.text_bright
    } else {
        app.theme.muted
    };

    let mut spans = vec![Span::styled(
        format!(" /{}", app.tasks.filter.query),
        Style::default().fg(query_color).bg(bg),
    )];
    if searching {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }
    for tag in &app.tasks.filter.tags {
        spans.push(Span::styled(
            format!("  #{}", tag),
            Style::default()
                .fg(app.theme.tag_color(tag))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        format!("  {} of {}", shown, total),
        Style::default().fg(app.theme.muted).bg(bg),
    ));
    Line::from(spans)
}

fn task_line<'a>(
    app: &App,
    task: &Task,
    row_bg: Color,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let (check, check_color) = if task.completed {
        ("[x]", app.theme.done)
    } else {
        ("[ ]", app.theme.muted)
    };

    let mut text_style = Style::default()
        .fg(app.theme.task_color(task.completed))
        .bg(row_bg);
    if task.completed {
        text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
    }
    let match_style = Style::default()
        .fg(app.theme.match_fg)
        .bg(app.theme.match_bg);

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(check, Style::default().fg(check_color).bg(row_bg)),
        Span::styled(" ", Style::default().bg(row_bg)),
    ];
    push_highlighted_spans(&mut spans, &task.text, text_style, match_style, search_re);

    for tag in &task.tags {
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        let tag_style = Style::default().fg(app.theme.tag_color(tag)).bg(row_bg);
        let mut tag_spans = vec![Span::styled("#", tag_style)];
        push_highlighted_spans(&mut tag_spans, tag, tag_style, match_style, search_re);
        spans.extend(tag_spans);
    }

    pad(&mut spans, width, row_bg);
    Line::from(spans)
}

/// The two inputs of a task being added or edited
fn edit_lines<'a>(app: &App, edit: &TaskEdit, width: usize) -> Vec<Line<'a>> {
    let bg = app.theme.row_bg;
    let label_style = Style::default().fg(app.theme.muted).bg(bg);
    let input_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.accent).bg(bg);

    let mut text = vec![Span::styled(" Task: ", label_style)];
    push_draft_spans(
        &mut text,
        &edit.text,
        input_style,
        cursor_style,
        edit.field == TaskField::Text,
    );
    pad(&mut text, width, bg);

    let mut tags = vec![Span::styled(" Tags: ", label_style)];
    if edit.tags.as_str().is_empty() && edit.field == TaskField::Text {
        tags.push(Span::styled("comma, separated", label_style));
    } else {
        push_draft_spans(
            &mut tags,
            &edit.tags,
            input_style,
            cursor_style,
            edit.field == TaskField::Tags,
        );
    }
    pad(&mut tags, width, bg);

    vec![Line::from(text), Line::from(tags)]
}

fn pad(spans: &mut Vec<Span>, width: usize, bg: Color) {
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(48, 10, |frame, area| render_task_panel(frame, app, area))
    }

    #[test]
    fn no_selection_shows_hint() {
        let app = sample_app();
        let output = render(&app);
        assert!(output.contains(" Tasks "));
        assert!(output.contains("Select a task group from the menu."));
    }

    #[test]
    fn lists_tasks_of_selected_group() {
        let app = sample_app_selected();
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains(" Home "));
        assert!(lines[1].contains("[ ] Buy milk #errand"));
        assert!(lines[2].contains("[ ] Wash car #chore #outside"));
        assert!(lines[3].contains("[x] Pay rent"));
    }

    #[test]
    fn empty_group_invites_adding() {
        let mut app = sample_app();
        app.groups.cursor = 1;
        app.select_current_group();
        let output = render(&app);
        assert!(output.contains(" Work "));
        assert!(output.contains("No tasks yet. Press a to add one"));
    }

    #[test]
    fn filter_summary_and_matches() {
        let mut app = sample_app_selected();
        app.tasks.filter.query = "car".into();
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("/car"));
        assert!(lines[1].contains("1 of 3"));
        assert!(lines[2].contains("Wash car"));
        assert!(!output.contains("Buy milk"));
    }

    #[test]
    fn tag_filter_shown_in_summary() {
        let mut app = sample_app_selected();
        app.tasks.filter.toggle_tag("errand");
        let output = render(&app);
        assert!(output.contains("#errand  1 of 3"));
    }

    #[test]
    fn nothing_matching() {
        let mut app = sample_app_selected();
        app.tasks.filter.query = "zzz".into();
        let output = render(&app);
        assert!(output.contains("No tasks match"));
    }

    #[test]
    fn edit_rows_show_both_drafts() {
        let mut app = sample_app_selected();
        assert!(app.tasks.start_edit(&app.store));
        app.mode = Mode::Edit;
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("Task: Buy milk\u{258C}"));
        assert!(lines[2].contains("Tags: errand"));
        assert!(lines[3].contains("Wash car"));
    }

    #[test]
    fn new_task_rows_come_last() {
        let mut app = sample_app_selected();
        assert!(app.tasks.start_new());
        app.mode = Mode::Edit;
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[4].contains("Task: \u{258C}"));
        assert!(lines[5].contains("Tags: comma, separated"));
    }
}
