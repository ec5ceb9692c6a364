//! Single-line text entry.

use super::behavior::{Effect, LocalPointer, Phase, Response};
use crate::config::TextConfig;
use crate::input::{Key, KeyInput};

/// Host-supplied input check. Runs after every edit; a field whose text
/// fails it is drawn with the invalid background.
pub type Validator = Box<dyn Fn(&str) -> bool + Send>;

/// Result of feeding a key to a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key had no effect.
    Ignored,
    /// Cursor moved; text unchanged.
    Moved,
    /// Text changed.
    Changed,
    /// Enter pressed; the text should be reported as final.
    Commit,
    /// Escape pressed; focus should be released.
    Blur,
}

/// Text field state.
pub struct TextField {
    text: String,
    /// Cursor position in characters.
    cursor: usize,
    validator: Option<Validator>,
    valid: bool,
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("valid", &self.valid)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            validator: None,
            valid: true,
        }
    }
}

impl TextField {
    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Result of the validator on the current text (true without one).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replaces the text and moves the cursor to its end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
        self.revalidate();
    }

    /// Installs or removes the validator.
    pub fn set_validator(&mut self, validator: Option<Validator>) {
        self.validator = validator;
        self.revalidate();
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn revalidate(&mut self) {
        self.valid = self.validator.as_ref().map_or(true, |check| check(&self.text));
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Local x of the caret.
    #[must_use]
    pub fn caret_x(&self, text: &TextConfig) -> f32 {
        text.padding + self.cursor as f32 * text.char_width
    }

    /// Applies one key.
    pub fn key(&mut self, input: KeyInput) -> KeyOutcome {
        match input {
            KeyInput::Typed(ch) if !ch.is_control() => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
                self.revalidate();
                KeyOutcome::Changed
            }
            KeyInput::Typed(_) | KeyInput::Released(_) => KeyOutcome::Ignored,
            KeyInput::Pressed(key) => self.press(key),
        }
    }

    fn press(&mut self, key: Key) -> KeyOutcome {
        let len = self.len();
        match key {
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
                self.revalidate();
                KeyOutcome::Changed
            }
            Key::Delete if self.cursor < len => {
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
                self.revalidate();
                KeyOutcome::Changed
            }
            Key::Left if self.cursor > 0 => {
                self.cursor -= 1;
                KeyOutcome::Moved
            }
            Key::Right if self.cursor < len => {
                self.cursor += 1;
                KeyOutcome::Moved
            }
            Key::Home if self.cursor > 0 => {
                self.cursor = 0;
                KeyOutcome::Moved
            }
            Key::End if self.cursor < len => {
                self.cursor = len;
                KeyOutcome::Moved
            }
            Key::Enter => KeyOutcome::Commit,
            Key::Escape => KeyOutcome::Blur,
            _ => KeyOutcome::Ignored,
        }
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer, text: &TextConfig) -> Response {
        match phase {
            Phase::Press => {
                let slot = ((p.x - text.padding) / text.char_width).round().max(0.0) as usize;
                self.cursor = slot.min(self.len());
                Response { redraw: true, ..Response::NONE }.with_effect(Effect::Focus)
            }
            Phase::Release => Response { redraw: true, ..Response::NONE },
            Phase::Drag | Phase::Wheel(_) => Response::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::behavior::pointer_at;

    fn typed(field: &mut TextField, s: &str) {
        for ch in s.chars() {
            field.key(KeyInput::Typed(ch));
        }
    }

    #[test]
    fn test_editing() {
        let mut f = TextField::default();
        typed(&mut f, "héllo");
        assert_eq!(f.text(), "héllo");
        assert_eq!(f.cursor(), 5);

        f.key(KeyInput::Pressed(Key::Left));
        f.key(KeyInput::Pressed(Key::Backspace));
        assert_eq!(f.text(), "hélo");
        f.key(KeyInput::Pressed(Key::Home));
        f.key(KeyInput::Pressed(Key::Delete));
        assert_eq!(f.text(), "élo");
        assert_eq!(f.key(KeyInput::Pressed(Key::Left)), KeyOutcome::Ignored);
        assert_eq!(f.key(KeyInput::Pressed(Key::Enter)), KeyOutcome::Commit);
        assert_eq!(f.key(KeyInput::Typed('\u{8}')), KeyOutcome::Ignored);
    }

    #[test]
    fn test_validator() {
        let mut f = TextField::default();
        f.set_validator(Some(Box::new(|s: &str| s.parse::<u32>().is_ok())));
        assert!(!f.is_valid());
        typed(&mut f, "42");
        assert!(f.is_valid());
        typed(&mut f, "x");
        assert!(!f.is_valid());
    }

    #[test]
    fn test_click_places_cursor() {
        let text = TextConfig::default();
        let mut f = TextField::default();
        f.set_text("abcdef");
        let r = f.pointer(Phase::Press, &pointer_at(text.padding + 2.0 * text.char_width + 1.0, 5.0, 100.0, 20.0, Some(0)), &text);
        assert_eq!(r.effect, Effect::Focus);
        assert_eq!(f.cursor(), 2);
        f.pointer(Phase::Press, &pointer_at(99.0, 5.0, 100.0, 20.0, Some(0)), &text);
        assert_eq!(f.cursor(), 6);
    }
}
