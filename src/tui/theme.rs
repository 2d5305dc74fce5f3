use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Colors used by the panels, keyed by role rather than hue
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Cursor row in the focused panel, input cursors, key names
    pub accent: Color,
    /// Hints, counts, completed tasks
    pub muted: Color,
    pub error: Color,
    /// Unsaved-changes marker
    pub warning: Color,
    /// Checked boxes and info messages
    pub done: Color,
    /// Cursor row in an unfocused panel and the edit rows
    pub row_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub match_bg: Color,
    pub match_fg: Color,
    /// Tags without an entry in `tag_colors`
    pub tag_default: Color,
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let tag_colors = [
            ("urgent", Color::Rgb(0xF8, 0x71, 0x71)),
            ("errand", Color::Rgb(0x38, 0xBD, 0xF8)),
            ("chore", Color::Rgb(0x4A, 0xDE, 0x80)),
            ("work", Color::Rgb(0x81, 0x8C, 0xF8)),
        ]
        .into_iter()
        .map(|(tag, color)| (tag.to_string(), color))
        .collect();

        Theme {
            background: Color::Rgb(0x11, 0x18, 0x27),
            text: Color::Rgb(0xE5, 0xE7, 0xEB),
            text_bright: Color::White,
            accent: Color::Rgb(0x25, 0x63, 0xEB),
            muted: Color::Rgb(0x9C, 0xA3, 0xAF),
            error: Color::Rgb(0xEF, 0x44, 0x44),
            warning: Color::Rgb(0xF5, 0x9E, 0x0B),
            done: Color::Rgb(0x22, 0xC5, 0x5E),
            row_bg: Color::Rgb(0x37, 0x41, 0x51),
            border: Color::Rgb(0x37, 0x41, 0x51),
            border_focused: Color::Rgb(0x3B, 0x82, 0xF6),
            match_bg: Color::Rgb(0xFA, 0xCC, 0x15),
            match_fg: Color::Rgb(0x11, 0x18, 0x27),
            tag_default: Color::Rgb(0x22, 0xD3, 0xEE),
            tag_colors,
        }
    }
}

/// `#RRGGBB` or `#RGB`
fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel =
        |i: usize, len: usize| u8::from_str_radix(&digits[i * len..(i + 1) * len], 16).ok();
    match digits.len() {
        6 => Some(Color::Rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
        3 => {
            // #abc is #aabbcc
            let short = |i| channel(i, 1).map(|v| v * 0x11);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

impl Theme {
    /// Defaults with `[ui.colors]` and `[ui.tag_colors]` applied. Unknown
    /// roles and unparsable values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (role, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value)
                && let Some(slot) = theme.role_mut(role)
            {
                *slot = color;
            }
        }
        theme.tag_colors.extend(
            ui.tag_colors
                .iter()
                .filter_map(|(tag, value)| Some((tag.clone(), parse_hex_color(value)?))),
        );

        theme
    }

    fn role_mut(&mut self, role: &str) -> Option<&mut Color> {
        Some(match role {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "accent" => &mut self.accent,
            "muted" => &mut self.muted,
            "error" => &mut self.error,
            "warning" => &mut self.warning,
            "done" => &mut self.done,
            "row_bg" => &mut self.row_bg,
            "border" => &mut self.border,
            "border_focused" => &mut self.border_focused,
            "match_bg" => &mut self.match_bg,
            "match_fg" => &mut self.match_fg,
            "tag_default" => &mut self.tag_default,
            _ => return None,
        })
    }

    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.tag_default)
    }

    /// Text color of a task row
    pub fn task_color(&self, completed: bool) -> Color {
        if completed { self.muted } else { self.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#F87171"), Some(Color::Rgb(0xF8, 0x71, 0x71)));
        assert_eq!(parse_hex_color("#0af"), Some(Color::Rgb(0x00, 0xAA, 0xFF)));
        assert_eq!(parse_hex_color("F87171"), None);
        assert_eq!(parse_hex_color("#F871"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn config_overrides_roles_and_tags() {
        let mut ui = UiConfig::default();
        ui.colors.insert("accent".into(), "#000000".into());
        ui.colors.insert("nonsense".into(), "#111111".into());
        ui.colors.insert("muted".into(), "grey".into());
        ui.tag_colors.insert("garden".into(), "#123".into());
        ui.tag_colors.insert("broken".into(), "red".into());

        let theme = Theme::from_config(&ui);
        let defaults = Theme::default();
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.muted, defaults.muted);
        assert_eq!(theme.tag_color("garden"), Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.tag_color("broken"), theme.tag_default);
        assert_eq!(theme.tag_color("errand"), defaults.tag_color("errand"));
    }

    #[test]
    fn completed_tasks_are_muted() {
        let theme = Theme::default();
        assert_eq!(theme.task_color(true), theme.muted);
        assert_eq!(theme.task_color(false), theme.text);
        assert_eq!(theme.tag_color("unknown"), theme.tag_default);
    }
}
