//! UTF-8 safe single-line text input with cursor management.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    input: String,
    /// Byte index into `input`, always on a char boundary.
    cursor: usize,
}

impl TextInputState {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the text and park the cursor at the end.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.cursor = self.input.len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn cursor_columns(&self) -> u16 {
        u16::try_from(self.input[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor.
    pub fn backspace(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            let start = self.cursor - previous.len_utf8();
            self.input.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Remove the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.input.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut state = TextInputState::default();
        state.set_input("Zoë");
        state.move_left();
        state.backspace();
        assert_eq!(state.input(), "Zë");
        state.insert_char('o');
        assert_eq!(state.input(), "Zoë");
        state.delete();
        assert_eq!(state.input(), "Zo");
        state.move_home();
        state.delete();
        assert_eq!(state.input(), "o");
        state.move_end();
        state.move_right();
        assert_eq!(state.cursor_columns(), 1);
    }

    #[test]
    fn cursor_columns_follow_display_width() {
        let mut state = TextInputState::default();
        state.set_input("日本");
        assert_eq!(state.cursor_columns(), 4);
        state.move_left();
        assert_eq!(state.cursor_columns(), 2);
    }
}
