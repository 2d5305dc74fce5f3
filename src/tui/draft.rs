use crate::util::text::{display_width, next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text input with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
}

impl Draft {
    /// A draft holding `text` with the cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Draft { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells from the start of the text
    pub fn cursor_col(&self) -> usize {
        display_width(&self.text[..self.cursor])
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert(&mut self, c: char) {
        // Newlines never belong in a name, task text or tag list.
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace(['\n', '\r'], " ");
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puts_cursor_at_end() {
        let draft = Draft::new("Home");
        assert_eq!(draft.cursor(), 4);
        assert_eq!(draft.cursor_col(), 4);
    }

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut draft = Draft::new("Hme");
        draft.left();
        draft.left();
        draft.insert('o');
        assert_eq!(draft.as_str(), "Home");
        draft.end();
        draft.backspace();
        assert_eq!(draft.as_str(), "Hom");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut draft = Draft::new("xHome");
        draft.home();
        draft.delete();
        assert_eq!(draft.as_str(), "Home");
        draft.end();
        draft.delete();
        assert_eq!(draft.as_str(), "Home");
    }

    #[test]
    fn moves_over_whole_graphemes() {
        let mut draft = Draft::new("a🎉");
        draft.left();
        assert_eq!(draft.cursor(), 1);
        draft.backspace();
        assert_eq!(draft.as_str(), "🎉");
        draft.right();
        assert_eq!(draft.cursor(), "🎉".len());
        assert_eq!(draft.cursor_col(), 2);
    }

    #[test]
    fn newlines_become_spaces() {
        let mut draft = Draft::default();
        draft.insert_str("Buy\nmilk");
        draft.insert('\r');
        assert_eq!(draft.as_str(), "Buy milk ");
    }

    #[test]
    fn blank_detection() {
        assert!(Draft::new("   ").is_blank());
        assert!(!Draft::new(" a ").is_blank());
        let mut draft = Draft::new("x");
        draft.clear();
        assert!(draft.is_blank());
        assert_eq!(draft.cursor(), 0);
    }
}
