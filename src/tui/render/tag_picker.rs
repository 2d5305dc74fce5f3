use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::text::display_width;

use super::scroll_offset;

/// Render the tag filter popup over the task panel
pub fn render_tag_picker(frame: &mut Frame, app: &App, area: Rect) {
    let Some(group) = app.tasks.group else {
        return;
    };
    let tags = app.store.distinct_tags(group);

    let bg = app.theme.background;
    let sel_bg = app.theme.row_bg;

    // Sizing: wide enough for the longest tag, at most the panel
    let longest = tags.iter().map(|t| display_width(t)).max().unwrap_or(0);
    let inner_w = (longest + 8).clamp(24, area.width.saturating_sub(4) as usize);
    let inner_h = tags.len().min(area.height.saturating_sub(4) as usize).max(1);
    let popup_w = inner_w as u16 + 2;
    let popup_h = inner_h as u16 + 2;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };

    let mut lines: Vec<Line> = Vec::with_capacity(tags.len());
    for (i, tag) in tags.iter().enumerate() {
        let is_cursor = i == app.tasks.tag_cursor;
        let row_bg = if is_cursor { sel_bg } else { bg };
        let active = app.tasks.filter.tags.contains(tag);
        let check = if active { "[x]" } else { "[ ]" };

        let mut tag_style = Style::default().fg(app.theme.tag_color(tag)).bg(row_bg);
        if active {
            tag_style = tag_style.add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![
            Span::styled(
                format!(" {} ", check),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
            Span::styled(format!("#{}", tag), tag_style),
        ];
        let used = 5 + 1 + display_width(tag);
        if used < inner_w {
            spans.push(Span::styled(
                " ".repeat(inner_w - used),
                Style::default().bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    let offset = scroll_offset(app.tasks.tag_cursor, inner_h);
    let lines: Vec<Line> = lines.into_iter().skip(offset).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Filter by tag ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.border_focused).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_group_tags_with_active_marked() {
        let mut app = sample_app_selected();
        app.tasks.filter.toggle_tag("chore");
        let output = render_to_string(48, 12, |frame, area| render_tag_picker(frame, &app, area));
        assert!(output.contains("Filter by tag"));
        assert!(output.contains("[ ] #errand"));
        assert!(output.contains("[x] #chore"));
        assert!(output.contains("[ ] #outside"));
    }

    #[test]
    fn nothing_without_selection() {
        let app = sample_app();
        let output = render_to_string(48, 12, |frame, area| render_tag_picker(frame, &app, area));
        assert!(output.is_empty());
    }
}
