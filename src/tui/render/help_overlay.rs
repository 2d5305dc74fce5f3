use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Focus};

use super::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.focus {
        Focus::Groups => {
            lines.push(Line::from(Span::styled(" Task Groups", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " Enter/Space", "Open group", key_style, desc_style);
            add_binding(&mut lines, " a", "Add group", key_style, desc_style);
            add_binding(&mut lines, " r", "Rename group", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete group", key_style, desc_style);
        }
        Focus::Tasks => {
            lines.push(Line::from(Span::styled(" Tasks", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " a", "Add task", key_style, desc_style);
            add_binding(&mut lines, " e/Enter", "Edit task", key_style, desc_style);
            add_binding(&mut lines, " Space/x", "Toggle done", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete task", key_style, desc_style);
            add_binding(&mut lines, " /", "Search text and tags", key_style, desc_style);
            add_binding(&mut lines, " #", "Filter by tag", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Clear filter", key_style, desc_style);
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Editing", header_style)));
    add_binding(&mut lines, " Enter", "Save", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Text / tags field", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab/h/l", "Switch panel", key_style, desc_style);
    add_binding(&mut lines, " S", "Save to data file", key_style, desc_style);
    add_binding(&mut lines, " L", "Load from file", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.muted).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_follows_focus() {
        let app = sample_app();
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(output.contains("Rename group"));
        assert!(!output.contains("Toggle done"));

        let app = sample_app_selected();
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(output.contains("Toggle done"));
        assert!(output.contains("Save to data file"));
    }
}
