//! # Question Engine
//!
//! Composable question widgets that collect one answer each from the user.
//!
//! ## Widgets
//!
//! | Widget | Answer | Module |
//! |--------|--------|--------|
//! | Single choice | `Option<String>` | [`single_select`] |
//! | Multiple choice | `Vec<String>` | [`multi_select`] |
//! | Free text | `String` | [`plain_text`] |
//! | Key/value tags | [`Tags`] | [`key_value`] |
//! | Confirmation | [`Confirmation`] | [`confirmation`] |
//!
//! Every widget is built from a [`QuestionInput`] through [`Initialize`] and then
//! fed key events through [`Question::tick`] until it reports
//! [`Tick::Commit`] or [`Tick::Cancel`]. The prompter in
//! [`crate::ui::prompter`] runs that loop against a real terminal.

pub mod confirmation;
pub mod error;
pub mod key_value;
pub mod list;
pub mod multi_select;
pub mod plain_text;
pub mod single_select;
pub mod table;
pub mod text_field;

pub use confirmation::{Confirmation, ConfirmationQuestion};
pub use error::QuestionError;
pub use key_value::{KeyValueQuestion, Tag, Tags};
pub use multi_select::MultiSelectQuestion;
pub use plain_text::PlainTextQuestion;
pub use single_select::SingleSelectQuestion;
pub use table::{render_table, AnswerMap, LineItem, RenderedTable};

use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Text;

/// What a widget wants the driver to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Commit,
    Cancel,
}

/// The contract shared by all question widgets.
pub trait Question {
    type Answer;

    /// Apply one key event.
    fn tick(&mut self, key: KeyEvent) -> Tick;

    /// Draw the current state. Called after every event.
    fn render(&self, theme: &Theme) -> Text<'static>;

    /// The most recent error or notice, if any.
    fn last_error(&self) -> Option<&QuestionError>;

    /// Consume the widget after [`Tick::Commit`] and hand back its answer.
    fn into_answer(self) -> Self::Answer;
}

/// Construction of a widget from caller configuration.
pub trait Initialize<C>: Sized {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError>;
}

/// Predicate deciding whether a candidate answer is acceptable.
///
/// The first argument is the caller's context handle, forwarded untouched.
pub type Validator<C> = Box<dyn Fn(&C, &str) -> bool>;

/// Caller-supplied configuration for one question.
///
/// Widgets read only the fields that apply to them.
pub struct QuestionInput<C = ()> {
    pub question: String,
    pub rows: Vec<Vec<String>>,
    pub headers: Vec<String>,
    /// One answer value per data row. Ignored unless its length matches `rows`.
    pub row_values: Vec<String>,
    pub default_value: Option<String>,
    pub default_values: Vec<String>,
    pub validators: Vec<Validator<C>>,
    pub context: Option<C>,
    /// Lets a confirmation move focus into its option table.
    pub allow_edit: bool,
}

impl<C> QuestionInput<C> {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            rows: Vec::new(),
            headers: Vec::new(),
            row_values: Vec::new(),
            default_value: None,
            default_values: Vec::new(),
            validators: Vec::new(),
            context: None,
            allow_edit: false,
        }
    }

    pub fn rows<R, S>(mut self, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self
    }

    pub fn headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn row_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.row_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn default_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.default_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn validator(mut self, validator: impl Fn(&C, &str) -> bool + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    pub fn allow_edit(mut self, allow: bool) -> Self {
        self.allow_edit = allow;
        self
    }

    /// Row index of `value` within `row_values`.
    pub(crate) fn row_of(&self, value: &str) -> Option<usize> {
        self.row_values.iter().position(|v| v == value)
    }
}

/// `Esc` or `Ctrl+C`.
pub fn is_cancel_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
