pub mod group_panel;
pub mod help_overlay;
pub mod status_row;
pub mod tag_picker;
pub mod task_panel;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};
use super::draft::Draft;

/// Width of the group panel including its borders
const GROUP_PANEL_WIDTH: u16 = 32;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: panels | status row (1 row)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // Groups on the left, tasks of the selected group on the right
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GROUP_PANEL_WIDTH.min(area.width / 2)),
            Constraint::Min(1),
        ])
        .split(rows[0]);

    group_panel::render_group_panel(frame, app, cols[0]);
    task_panel::render_task_panel(frame, app, cols[1]);

    if app.mode == Mode::TagPicker {
        tag_picker::render_tag_picker(frame, app, cols[1]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, rows[1]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if !has_match || last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Spans for a draft with a ▌ cursor, or without one when `focused` is false
pub(super) fn push_draft_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    draft: &Draft,
    style: Style,
    cursor_style: Style,
    focused: bool,
) {
    let (before, after) = draft.as_str().split_at(draft.cursor());
    spans.push(Span::styled(before.to_string(), style));
    if focused {
        spans.push(Span::styled("\u{258C}", cursor_style));
    }
    if !after.is_empty() {
        spans.push(Span::styled(after.to_string(), style));
    }
}

/// First row to draw so that `cursor` stays visible in `height` rows
pub(super) fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    cursor.saturating_sub(height - 1)
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn highlight_splits_at_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Buy MILK now",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        assert_eq!(contents(&spans), vec!["Buy ", "MILK", " now"]);
    }

    #[test]
    fn highlight_without_match_is_one_span() {
        let re = Regex::new("xyz").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Buy milk", Style::default(), Style::default(), Some(&re));
        assert_eq!(contents(&spans), vec!["Buy milk"]);

        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Buy milk", Style::default(), Style::default(), None);
        assert_eq!(contents(&spans), vec!["Buy milk"]);
    }

    #[test]
    fn draft_cursor_sits_at_offset() {
        let mut draft = Draft::new("Home");
        draft.left();
        let mut spans = Vec::new();
        push_draft_spans(&mut spans, &draft, Style::default(), Style::default(), true);
        assert_eq!(contents(&spans), vec!["Hom", "\u{258C}", "e"]);
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn full_screen_shows_both_panels() {
        let app = sample_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Groups"));
        assert!(output.contains("Home"));
        assert!(output.contains("Select a task group from the menu."));
    }
}
