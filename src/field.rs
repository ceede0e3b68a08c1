// Editable single-line text buffer
//
// Owned by the state machines (DNI input, search box, form fields) so that
// edits flow through their transition functions. The TUI only translates
// keys into `FieldEdit`s and renders `value()` / `cursor_column()`.

use unicode_width::UnicodeWidthStr;

/// One editing operation on a `TextField`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Text plus a cursor position counted in chars (not bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Display column of the cursor (accounts for wide characters)
    pub fn cursor_column(&self) -> usize {
        self.value[..self.byte_index()].width()
    }

    /// Apply an edit; returns true if the text changed
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        let len = self.value.chars().count();
        match edit {
            FieldEdit::Insert(c) => {
                if c.is_control() {
                    return false;
                }
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            FieldEdit::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index();
                self.value.remove(at);
                true
            }
            FieldEdit::Delete => {
                if self.cursor >= len {
                    return false;
                }
                let at = self.byte_index();
                self.value.remove(at);
                true
            }
            FieldEdit::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            FieldEdit::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            FieldEdit::Home => {
                self.cursor = 0;
                false
            }
            FieldEdit::End => {
                self.cursor = len;
                false
            }
            FieldEdit::Clear => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextField {
        let mut field = TextField::new();
        for c in text.chars() {
            field.apply(FieldEdit::Insert(c));
        }
        field
    }

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut field = typed("Dia");
        field.apply(FieldEdit::Left);
        field.apply(FieldEdit::Insert('z'));
        assert_eq!(field.value(), "Diza");

        assert!(field.apply(FieldEdit::Backspace));
        assert_eq!(field.value(), "Dia");

        field.apply(FieldEdit::Home);
        assert!(!field.apply(FieldEdit::Backspace));
        assert!(field.apply(FieldEdit::Delete));
        assert_eq!(field.value(), "ia");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = typed("Muñoz");
        field.apply(FieldEdit::Left);
        field.apply(FieldEdit::Left);
        assert!(field.apply(FieldEdit::Backspace));
        assert_eq!(field.value(), "Muoz");

        let wide = typed("日本");
        assert_eq!(wide.cursor_column(), 4);
    }

    #[test]
    fn test_navigation_does_not_change_text() {
        let mut field = TextField::with_value("123");
        assert!(!field.apply(FieldEdit::Right));
        assert!(!field.apply(FieldEdit::Home));
        assert_eq!(field.cursor_column(), 0);
        assert!(!field.apply(FieldEdit::Insert('\n')));
        assert_eq!(field.value(), "123");
        assert!(field.apply(FieldEdit::Clear));
        assert!(!field.apply(FieldEdit::Clear));
    }
}
