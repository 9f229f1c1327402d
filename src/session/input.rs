/// One editing action on the answer line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// The typed-answer buffer with its caret.
#[derive(Clone, Debug, Default)]
pub struct AnswerInput {
    text: String,
    /// Caret position as a char index (0 = before first char).
    caret: usize,
}

impl AnswerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole text; caret goes to `caret` (clamped) or the end.
    pub fn set(&mut self, text: &str, caret: Option<usize>) {
        self.text = text.to_string();
        let len = self.len();
        self.caret = caret.unwrap_or(len).min(len);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    /// Returns (before_caret, caret_char, after_caret) for styled rendering.
    /// When the caret is at the end of the text, caret_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.caret);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn apply(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(ch) => {
                let byte_offset = self.char_to_byte(self.caret);
                self.text.insert(byte_offset, ch);
                self.caret += 1;
            }
            InputEdit::Backspace => {
                if self.caret > 0 {
                    self.remove_char_at(self.caret - 1);
                    self.caret -= 1;
                }
            }
            InputEdit::Delete => {
                if self.caret < self.len() {
                    self.remove_char_at(self.caret);
                }
            }
            InputEdit::Left => {
                self.caret = self.caret.saturating_sub(1);
            }
            InputEdit::Right => {
                if self.caret < self.len() {
                    self.caret += 1;
                }
            }
            InputEdit::Home => self.caret = 0,
            InputEdit::End => self.caret = self.len(),
            InputEdit::Clear => self.clear(),
        }
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[start..].chars().next() {
            self.text.replace_range(start..start + ch.len_utf8(), "");
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> AnswerInput {
        let mut input = AnswerInput::new();
        for ch in s.chars() {
            input.apply(InputEdit::Insert(ch));
        }
        input
    }

    #[test]
    fn insert_in_middle_moves_caret() {
        let mut input = typed("cat");
        input.apply(InputEdit::Left);
        input.apply(InputEdit::Left);
        input.apply(InputEdit::Insert('h'));
        assert_eq!(input.value(), "chat");
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = typed("ab");
        input.apply(InputEdit::Home);
        input.apply(InputEdit::Backspace);
        assert_eq!(input.value(), "ab");
        assert_eq!(input.caret(), 0);
        input.apply(InputEdit::Delete);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn caret_never_leaves_text() {
        let mut input = typed("x");
        input.apply(InputEdit::Right);
        input.apply(InputEdit::Right);
        assert_eq!(input.caret(), 1);
        input.set("hello", Some(99));
        assert_eq!(input.caret(), 5);
    }

    #[test]
    fn render_parts_split_on_multibyte_text() {
        let mut input = typed("é猫b");
        input.apply(InputEdit::Left);
        input.apply(InputEdit::Left);
        assert_eq!(input.render_parts(), ("é", Some('猫'), "b"));
        input.apply(InputEdit::End);
        assert_eq!(input.render_parts(), ("é猫b", None, ""));
    }

    #[test]
    fn clear_resets_caret() {
        let mut input = typed("word");
        input.apply(InputEdit::Clear);
        assert_eq!(input.value(), "");
        assert_eq!(input.caret(), 0);
    }
}
