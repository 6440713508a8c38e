//! Free-text question with a validator chain.
//!
//! Submitting an empty field submits the placeholder instead. The candidate is
//! accepted when any validator accepts it; rejected input is shown back to the
//! user and the field is cleared for another try.

use crate::question::text_field::TextField;
use crate::question::{
    is_cancel_key, Initialize, Question, QuestionError, QuestionInput, Tick, Validator,
};
use crate::ui::render::{hint_line, notice_line, question_line};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};

pub struct PlainTextQuestion<C = ()> {
    question: String,
    field: TextField,
    validators: Vec<Validator<C>>,
    context: Option<C>,
    answer: String,
    error: Option<QuestionError>,
}

impl<C> PlainTextQuestion<C> {
    pub fn text(&self) -> &str {
        self.field.value()
    }

    /// Without validators or a context handle every candidate is accepted.
    pub fn accepts(&self, candidate: &str) -> bool {
        match &self.context {
            Some(context) if !self.validators.is_empty() => self
                .validators
                .iter()
                .any(|validator| validator(context, candidate)),
            _ => true,
        }
    }

    fn submit(&mut self) -> Tick {
        let candidate = if self.field.is_empty() {
            self.field.placeholder().to_string()
        } else {
            self.field.value().to_string()
        };

        if self.accepts(&candidate) {
            self.error = None;
            tracing::debug!(answer = %candidate, "plain text committed");
            self.answer = candidate;
            Tick::Commit
        } else {
            tracing::debug!(input = %candidate, "plain text rejected by validators");
            self.error = Some(QuestionError::ValidationRejected { input: candidate });
            self.field.clear();
            Tick::Continue
        }
    }
}

impl<C> Initialize<C> for PlainTextQuestion<C> {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError> {
        Ok(Self {
            question: input.question,
            field: TextField::new(input.default_value.unwrap_or_default()),
            validators: input.validators,
            context: input.context,
            answer: String::new(),
            error: None,
        })
    }
}

impl<C> Question for PlainTextQuestion<C> {
    type Answer = String;

    fn tick(&mut self, key: KeyEvent) -> Tick {
        if is_cancel_key(&key) {
            self.error = Some(QuestionError::UserCancelled);
            return Tick::Cancel;
        }

        if key.code == KeyCode::Enter {
            return self.submit();
        }
        self.field.handle_key(key);
        Tick::Continue
    }

    fn render(&self, theme: &Theme) -> Text<'static> {
        let mut field = self.field.line(true, theme);
        field.spans.insert(0, Span::styled("❯ ", theme.prompt()));

        let mut lines = vec![question_line(&self.question, theme), field, Line::default()];
        if let Some(error) = self.error.as_ref().filter(|e| !e.is_fatal()) {
            lines.push(notice_line(error, theme));
        }
        lines.push(hint_line(&[("Enter", "Submit"), ("Esc", "Cancel")], theme));
        Text::from(lines)
    }

    fn last_error(&self) -> Option<&QuestionError> {
        self.error.as_ref()
    }

    fn into_answer(self) -> Self::Answer {
        self.answer
    }
}
