use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, Mode, StatusKind};
use crate::util::text::display_width;

use super::push_draft_spans;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if app.mode == Mode::Import {
        // Path prompt: Load from: path▌
        spans.push(Span::styled(
            " Load from: ",
            Style::default().fg(app.theme.muted).bg(bg),
        ));
        push_draft_spans(
            &mut spans,
            &app.import_input,
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.accent).bg(bg),
            true,
        );
    } else if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => app.theme.done,
            StatusKind::Error => app.theme.error,
        };
        spans.push(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).bg(bg),
        ));
    }

    let hint = if app.show_key_hints {
        key_hints(app)
    } else {
        ""
    };
    let dirty = if app.store.is_dirty() && app.mode == Mode::Navigate {
        "[unsaved] "
    } else {
        ""
    };

    // Right-align hints and the unsaved marker when there is room
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right = format!("{}{} ", dirty, hint);
    let right_width = display_width(&right);
    if content_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(dirty, Style::default().fg(app.theme.warning).bg(bg)));
        spans.push(Span::styled(
            format!("{} ", hint),
            Style::default().fg(app.theme.muted).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(app: &App) -> &'static str {
    match (app.mode, app.focus) {
        (Mode::Navigate, Focus::Groups) => "a add  r rename  d delete  Enter open  ? help",
        (Mode::Navigate, Focus::Tasks) if app.tasks.group.is_none() => "Tab groups  ? help",
        (Mode::Navigate, Focus::Tasks) => "a add  e edit  Space done  / search  # tags  ? help",
        (Mode::Edit, Focus::Groups) => "Enter save  Esc cancel",
        (Mode::Edit, Focus::Tasks) => "Tab switch field  Enter save  Esc cancel",
        (Mode::Search, _) => "Enter keep  Esc clear",
        (Mode::TagPicker, _) => "Space toggle  c clear  Esc close",
        (Mode::Import, _) => "Enter load  Esc cancel",
    }
}
