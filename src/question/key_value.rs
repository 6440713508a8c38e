//! # Tag Editor
//!
//! Collects `key|value` pairs. The screen stacks three focus regions:
//!
//! ```text
//!   env = prod          focus -2   (tags, only for deleting)
//!   owner = team1       focus -1
//! Key   [          ]    focus  0
//! Value [          ]    focus  1
//! [ Add ]  [ Submit ]   focus  2   (←/→ arms one of the two)
//! ```
//!
//! Focus moves with Up/Down/Tab/Shift-Tab and is clamped to the rows that
//! currently exist, so deleting tags shrinks the negative range.

use crate::question::list::SelectableList;
use crate::question::text_field::TextField;
use crate::question::{is_cancel_key, Initialize, Question, QuestionError, QuestionInput, Tick};
use crate::ui::render::{hint_line, option_line, question_line};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};
use std::fmt;

const KEY_FIELD: i32 = 0;
const VALUE_FIELD: i32 = 1;
/// Focus value of the shared Add/Submit slot, equal to the field count.
const ACTION_SLOT: i32 = 2;

const KEY_PLACEHOLDER: &str = "key";
const VALUE_PLACEHOLDER: &str = "value";
const KEY_PROMPT: &str = "please enter a key";
const VALUE_PROMPT: &str = "please enter a value";
const KEY_SEPARATOR_PROMPT: &str = "a key can't contain '|' or ','";
const VALUE_SEPARATOR_PROMPT: &str = "a value can't contain '|' or ','";

/// Characters that delimit pairs in the `key|value, key|value` form.
const SEPARATORS: [char; 2] = ['|', ','];

/// Why one side of a pair can't be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldProblem {
    Blank,
    Separator,
}

fn field_problem(text: &str) -> Option<FieldProblem> {
    let text = text.trim();
    if text.is_empty() {
        Some(FieldProblem::Blank)
    } else if text.contains(&SEPARATORS[..]) {
        Some(FieldProblem::Separator)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Trimmed pair, or `None` when either side is blank or contains a
    /// separator.
    pub fn new(key: &str, value: &str) -> Option<Self> {
        let (key, value) = (key.trim(), value.trim());
        if field_problem(key).is_some() || field_problem(value).is_some() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Ordered tag list, written as `key1|value1, key2|value2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(pub Vec<Tag>);

impl Tags {
    /// Parse `key|value, key|value`. Pairs that do not split into exactly two
    /// non-blank parts are skipped.
    pub fn parse(input: &str) -> Self {
        let tags = input
            .split(',')
            .filter_map(|pair| {
                let parts: Vec<&str> = pair.split('|').collect();
                match parts.as_slice() {
                    [key, value] => Tag::new(key, value),
                    _ => None,
                }
            })
            .collect();
        Self(tags)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}|{}", tag.key, tag.value)?;
        }
        Ok(())
    }
}

pub struct KeyValueQuestion {
    question: String,
    key: TextField,
    value: TextField,
    tags: SelectableList<Tag>,
    focus: i32,
    submit_armed: bool,
    error: Option<QuestionError>,
}

impl KeyValueQuestion {
    pub fn focus(&self) -> i32 {
        self.focus
    }

    pub fn submit_armed(&self) -> bool {
        self.submit_armed
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.items()
    }

    pub fn tags_to_string(&self) -> String {
        Tags(self.tags.items().to_vec()).to_string()
    }

    /// Append the field contents as a tag when both are usable, then clear
    /// both fields. A blank field, or one containing `|` or `,`, gets a prompt
    /// as its placeholder; a usable one gets its plain placeholder back.
    pub fn add_tag(&mut self) -> bool {
        let tag = Tag::new(self.key.value(), self.value.value());
        let key_placeholder = match field_problem(self.key.value()) {
            Some(FieldProblem::Blank) => KEY_PROMPT,
            Some(FieldProblem::Separator) => KEY_SEPARATOR_PROMPT,
            None => KEY_PLACEHOLDER,
        };
        let value_placeholder = match field_problem(self.value.value()) {
            Some(FieldProblem::Blank) => VALUE_PROMPT,
            Some(FieldProblem::Separator) => VALUE_SEPARATOR_PROMPT,
            None => VALUE_PLACEHOLDER,
        };
        self.key.set_placeholder(key_placeholder);
        self.value.set_placeholder(value_placeholder);
        self.key.clear();
        self.value.clear();

        let Some(tag) = tag else {
            tracing::debug!("tag rejected");
            return false;
        };
        tracing::debug!(key = %tag.key, value = %tag.value, "tag added");
        self.tags.push(tag);
        self.set_focus(KEY_FIELD);
        true
    }

    /// Remove the highlighted tag. Focus follows the list cursor up, or
    /// returns to the key field once no tags remain.
    pub fn delete_selected(&mut self) {
        if self.focus >= 0 {
            return;
        }
        if let Some(tag) = self.tags.remove_selected() {
            tracing::debug!(key = %tag.key, "tag deleted");
        }
        match self.tags.selected() {
            Some(row) => self.focus = row as i32 - self.tags.len() as i32,
            None => self.set_focus(KEY_FIELD),
        }
    }

    fn set_focus(&mut self, focus: i32) {
        let len = self.tags.len() as i32;
        self.focus = focus.clamp(-len, ACTION_SLOT);
        if self.focus < 0 {
            self.submit_armed = false;
            self.tags.select((len + self.focus) as usize);
        } else {
            self.tags.clear_selection();
        }
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            KEY_FIELD => Some(&mut self.key),
            VALUE_FIELD => Some(&mut self.value),
            _ => None,
        }
    }

    fn action_line(&self, theme: &Theme) -> Line<'static> {
        let on_slot = self.focus == ACTION_SLOT;
        let style = |armed: bool| {
            if on_slot && armed {
                theme.highlight()
            } else {
                theme.text()
            }
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[ Add ]", style(!self.submit_armed)),
            Span::raw("  "),
            Span::styled("[ Submit ]", style(self.submit_armed)),
        ])
    }
}

impl<C> Initialize<C> for KeyValueQuestion {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError> {
        let defaults = input
            .default_value
            .as_deref()
            .map(Tags::parse)
            .unwrap_or_default();

        Ok(Self {
            question: input.question,
            key: TextField::new(KEY_PLACEHOLDER),
            value: TextField::new(VALUE_PLACEHOLDER),
            tags: SelectableList::new(defaults.0),
            focus: KEY_FIELD,
            submit_armed: false,
            error: None,
        })
    }
}

impl Question for KeyValueQuestion {
    type Answer = Tags;

    fn tick(&mut self, key: KeyEvent) -> Tick {
        if is_cancel_key(&key) {
            self.error = Some(QuestionError::UserCancelled);
            return Tick::Cancel;
        }

        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.set_focus(self.focus - 1),
            KeyCode::Down | KeyCode::Tab => self.set_focus(self.focus + 1),
            KeyCode::Left if self.focus == ACTION_SLOT => self.submit_armed = false,
            KeyCode::Right if self.focus == ACTION_SLOT => self.submit_armed = true,
            KeyCode::Enter => match self.focus {
                ACTION_SLOT if self.submit_armed => {
                    tracing::debug!(tags = %self.tags_to_string(), "tags committed");
                    return Tick::Commit;
                }
                ACTION_SLOT => {
                    self.add_tag();
                }
                KEY_FIELD | VALUE_FIELD => self.set_focus(self.focus + 1),
                _ => {}
            },
            KeyCode::Backspace if self.focus < 0 => self.delete_selected(),
            _ => {
                if let Some(field) = self.focused_field() {
                    field.handle_key(key);
                }
            }
        }
        Tick::Continue
    }

    fn render(&self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![question_line(&self.question, theme)];

        if self.tags.is_empty() {
            lines.push(Line::from(Span::styled("  (no tags yet)", theme.dim())));
        } else {
            lines.extend(self.tags.lines(|_, tag, highlighted| {
                option_line(&format!("{} = {}", tag.key, tag.value), highlighted, theme)
            }));
        }
        lines.push(Line::default());

        let fields = [
            ("Key   ", &self.key, KEY_FIELD),
            ("Value ", &self.value, VALUE_FIELD),
        ];
        for (label, field, slot) in fields {
            let focused = self.focus == slot;
            let label_style = if focused { theme.prompt() } else { theme.dim() };
            let mut line = field.line(focused, theme);
            line.spans
                .insert(0, Span::styled(format!("  {}", label), label_style));
            lines.push(line);
        }

        lines.push(self.action_line(theme));
        lines.push(Line::default());
        lines.push(hint_line(
            &[
                ("↑↓", "Move"),
                ("←→", "Add/Submit"),
                ("Backspace", "Delete tag"),
                ("Esc", "Cancel"),
            ],
            theme,
        ));
        Text::from(lines)
    }

    fn last_error(&self) -> Option<&QuestionError> {
        self.error.as_ref()
    }

    fn into_answer(self) -> Self::Answer {
        Tags(self.tags.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::plain_lines;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(q: &mut KeyValueQuestion, s: &str) {
        for c in s.chars() {
            q.tick(key(KeyCode::Char(c)));
        }
    }

    fn editor(defaults: &str) -> KeyValueQuestion {
        let input: QuestionInput = QuestionInput::new("Tags?").default_value(defaults);
        KeyValueQuestion::initialize(input).expect("init")
    }

    #[test]
    fn test_parse_skips_malformed_pairs() {
        let tags = Tags::parse("env|prod, broken, a|b|c, |x, owner | team1");
        assert_eq!(tags.to_string(), "env|prod, owner|team1");
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(Tags::parse("").is_empty());
    }

    #[test]
    fn test_add_trims_fields() {
        let mut q = editor("");
        type_str(&mut q, "  env ");
        q.tick(key(KeyCode::Tab));
        type_str(&mut q, " prod");
        q.tick(key(KeyCode::Tab));
        assert_eq!(q.focus(), ACTION_SLOT);

        assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Continue);
        assert_eq!(q.tags(), &[Tag::new("env", "prod").expect("tag")]);
        assert_eq!(q.focus(), KEY_FIELD);
        assert!(q.key.is_empty() && q.value.is_empty());
    }

    #[test]
    fn test_add_with_blank_value_prompts_and_clears() {
        let mut q = editor("");
        type_str(&mut q, "env");
        q.set_focus(ACTION_SLOT);
        assert!(!q.add_tag());
        assert!(q.tags().is_empty());
        assert!(q.key.is_empty());
        assert_eq!(q.key.placeholder(), KEY_PLACEHOLDER);
        assert_eq!(q.value.placeholder(), VALUE_PROMPT);
    }

    #[test]
    fn test_add_rejects_separators_and_keeps_round_trip() {
        let mut q = editor("env|prod");
        type_str(&mut q, "team|a");
        q.tick(key(KeyCode::Tab));
        type_str(&mut q, "x, y");
        q.tick(key(KeyCode::Tab));

        assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Continue);
        assert_eq!(q.tags(), &[Tag::new("env", "prod").expect("tag")]);
        assert_eq!(q.key.placeholder(), KEY_SEPARATOR_PROMPT);
        assert_eq!(q.value.placeholder(), VALUE_SEPARATOR_PROMPT);

        q.tick(key(KeyCode::Right));
        assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
        let tags = q.into_answer();
        assert_eq!(Tags::parse(&tags.to_string()), tags);
    }

    #[test]
    fn test_tag_new_rejects_separators() {
        assert!(Tag::new("team|a", "x").is_none());
        assert!(Tag::new("team", "x, y").is_none());
        assert!(Tag::new("team", "a").is_some());
    }

    #[test]
    fn test_prompt_follows_the_missing_field() {
        let mut q = editor("");
        q.set_focus(ACTION_SLOT);
        assert!(!q.add_tag());
        assert_eq!(q.key.placeholder(), KEY_PROMPT);
        assert_eq!(q.value.placeholder(), VALUE_PROMPT);

        q.set_focus(KEY_FIELD);
        type_str(&mut q, "env");
        q.set_focus(ACTION_SLOT);
        assert!(!q.add_tag());
        assert_eq!(q.key.placeholder(), KEY_PLACEHOLDER);
        assert_eq!(q.value.placeholder(), VALUE_PROMPT);

        q.set_focus(VALUE_FIELD);
        type_str(&mut q, "prod");
        q.set_focus(ACTION_SLOT);
        assert!(!q.add_tag());
        assert_eq!(q.key.placeholder(), KEY_PROMPT);
        assert_eq!(q.value.placeholder(), VALUE_PLACEHOLDER);
    }

    #[test]
    fn test_focus_clamps_to_tag_count() {
        let mut q = editor("a|1, b|2");
        for _ in 0..10 {
            q.tick(key(KeyCode::Up));
        }
        assert_eq!(q.focus(), -2);
        assert_eq!(q.tags.selected(), Some(0));

        for _ in 0..10 {
            q.tick(key(KeyCode::Down));
        }
        assert_eq!(q.focus(), ACTION_SLOT);
        assert_eq!(q.tags.selected(), None);
    }

    #[test]
    fn test_arrows_arm_submit_only_on_action_slot() {
        let mut q = editor("");
        q.tick(key(KeyCode::Right));
        assert!(!q.submit_armed());

        q.set_focus(ACTION_SLOT);
        q.tick(key(KeyCode::Right));
        assert!(q.submit_armed());
        q.tick(key(KeyCode::Left));
        assert!(!q.submit_armed());
    }

    #[test]
    fn test_entering_tag_list_disarms_submit() {
        let mut q = editor("a|1");
        q.set_focus(ACTION_SLOT);
        q.tick(key(KeyCode::Right));
        for _ in 0..3 {
            q.tick(key(KeyCode::Up));
        }
        assert_eq!(q.focus(), -1);
        assert!(!q.submit_armed());
    }

    #[test]
    fn test_backspace_deletes_highlighted_tag() {
        let mut q = editor("a|1, b|2, c|3");
        q.tick(key(KeyCode::Up));
        assert_eq!(q.tags.selected(), Some(2));

        q.tick(key(KeyCode::Backspace));
        assert_eq!(q.tags_to_string(), "a|1, b|2");
        assert_eq!(q.tags.selected(), Some(1));
        assert_eq!(q.focus(), -1);

        q.tick(key(KeyCode::Up));
        q.tick(key(KeyCode::Backspace));
        assert_eq!(q.tags_to_string(), "b|2");
        assert_eq!(q.focus(), -1);

        q.tick(key(KeyCode::Backspace));
        assert!(q.tags().is_empty());
        assert_eq!(q.focus(), KEY_FIELD);
    }

    #[test]
    fn test_backspace_in_field_edits_text() {
        let mut q = editor("a|1");
        type_str(&mut q, "ab");
        q.tick(key(KeyCode::Backspace));
        assert_eq!(q.key.value(), "a");
        assert_eq!(q.tags().len(), 1);
    }

    #[test]
    fn test_submit_commits_tags() {
        let mut q = editor("env|prod, owner|team1");
        q.set_focus(ACTION_SLOT);
        q.tick(key(KeyCode::Right));
        assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
        assert_eq!(q.into_answer().to_string(), "env|prod, owner|team1");
    }

    #[test]
    fn test_render_shows_tags_and_fields() {
        let q = editor("env|prod");
        let lines = plain_lines(&q.render(Theme::default_theme()));
        assert_eq!(lines[1], "  env = prod");
        assert_eq!(lines[3], "  Key   key");
        assert_eq!(lines[4], "  Value value");
        assert_eq!(lines[5], "  [ Add ]  [ Submit ]");
    }
}
