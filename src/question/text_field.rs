//! Single-line text field used by the free-text and tag questions.

use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in chars, `0..=len`.
    cursor: usize,
    placeholder: String,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false for keys the field does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => return false,
        }
        true
    }

    /// Render the value, or the placeholder when empty. A focused field shows
    /// its cursor as a reversed cell.
    pub fn line(&self, focused: bool, theme: &Theme) -> Line<'static> {
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        if self.value.is_empty() {
            let placeholder = Style::default()
                .fg(theme.fg_dim)
                .add_modifier(Modifier::ITALIC);
            if !focused {
                return Line::from(Span::styled(self.placeholder.clone(), placeholder));
            }
            let mut chars = self.placeholder.chars();
            let first = chars.next().map_or(" ".to_string(), |c| c.to_string());
            return Line::from(vec![
                Span::styled(first, placeholder.patch(cursor_style)),
                Span::styled(chars.collect::<String>(), placeholder),
            ]);
        }

        let text = Style::default().fg(theme.fg);
        if !focused {
            return Line::from(Span::styled(self.value.clone(), text));
        }

        let left: String = self.value.chars().take(self.cursor).collect();
        let under: String = self
            .value
            .chars()
            .nth(self.cursor)
            .map_or(" ".to_string(), |c| c.to_string());
        let right: String = self.value.chars().skip(self.cursor + 1).collect();
        Line::from(vec![
            Span::styled(left, text),
            Span::styled(under, text.patch(cursor_style)),
            Span::styled(right, text),
        ])
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }
}
