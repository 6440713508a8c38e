//! # Confirmation
//!
//! Shows the collected configuration as a table above a Yes/No choice.
//!
//! Focus is one integer shared by both lists. `0` and `1` are the No and Yes
//! rows of the embedded single select; `-1` down to `-len` walk the
//! configuration table from its last row upwards. The table is only reachable
//! when editing is allowed, in which case Enter on a row asks to revisit the
//! answer behind it.

use crate::question::list::SelectableList;
use crate::question::single_select::SingleSelectQuestion;
use crate::question::table::{render_table, AnswerMap, LineItem};
use crate::question::{is_cancel_key, Initialize, Question, QuestionError, QuestionInput, Tick};
use crate::ui::render::{header_lines, hint_line, notice_line, option_line, question_line};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Text};

const YES: &str = "yes";
const NO: &str = "no";

/// Outcome of a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// The user picked a configuration row to change; carries its value.
    Reconfigure(String),
}

pub struct ConfirmationQuestion {
    question: String,
    header: Vec<String>,
    config: SelectableList<LineItem>,
    answers: AnswerMap,
    yes_no: SingleSelectQuestion,
    focus: i32,
    allow_edit: bool,
    answer: Option<Confirmation>,
    error: Option<QuestionError>,
}

impl ConfirmationQuestion {
    pub fn focus(&self) -> i32 {
        self.focus
    }

    /// Highlighted configuration row, if focus is in the table.
    pub fn config_cursor(&self) -> Option<usize> {
        self.config.selected()
    }

    fn up(&mut self, key: KeyEvent) {
        if self.focus > 0 {
            self.yes_no.tick(key);
            self.focus = self.yes_no.cursor() as i32;
        } else if self.focus == 0 {
            if self.allow_edit && !self.config.is_empty() {
                self.config.select_last();
                self.focus = -1;
            }
        } else if self.focus > -(self.config.len() as i32) {
            self.config.previous();
            self.focus -= 1;
        }
    }

    fn down(&mut self, key: KeyEvent) {
        if self.focus < 0 {
            self.focus += 1;
            if self.focus == 0 {
                self.config.clear_selection();
                self.yes_no.select(0);
            } else {
                self.config.next();
            }
        } else {
            self.yes_no.tick(key);
            self.focus = self.yes_no.cursor() as i32;
        }
    }

    fn commit_row(&mut self) -> Tick {
        let value = self
            .config
            .selected_item()
            .and_then(|item| self.answers.get(item));
        match value {
            Some(value) => {
                tracing::debug!(value = %value, "confirmation asks to reconfigure");
                self.answer = Some(Confirmation::Reconfigure(value.to_string()));
                Tick::Commit
            }
            None => {
                self.error = Some(QuestionError::UnmodifiableRow);
                Tick::Continue
            }
        }
    }

    fn commit_choice(&mut self) -> Tick {
        let answer = match self.yes_no.selected_value() {
            Some(YES) => Confirmation::Yes,
            _ => Confirmation::No,
        };
        tracing::debug!(answer = ?answer, "confirmation committed");
        self.answer = Some(answer);
        Tick::Commit
    }
}

impl<C> Initialize<C> for ConfirmationQuestion {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError> {
        let table = render_table(&input.rows, &input.headers, &input.row_values)?;
        let choices = render_table(
            &[vec!["No".to_string()], vec!["Yes".to_string()]],
            &[],
            &[NO.to_string(), YES.to_string()],
        )?;

        Ok(Self {
            question: input.question,
            header: table.header,
            config: SelectableList::new(table.items),
            answers: table.answers,
            yes_no: SingleSelectQuestion::from_table(String::new(), choices, 0),
            focus: 0,
            allow_edit: input.allow_edit,
            answer: None,
            error: None,
        })
    }
}

impl Question for ConfirmationQuestion {
    type Answer = Confirmation;

    fn tick(&mut self, key: KeyEvent) -> Tick {
        if is_cancel_key(&key) {
            self.error = Some(QuestionError::UserCancelled);
            return Tick::Cancel;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.error = None;
                self.up(key);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.error = None;
                self.down(key);
            }
            KeyCode::Enter if self.focus < 0 => return self.commit_row(),
            KeyCode::Enter => return self.commit_choice(),
            _ => {}
        }
        Tick::Continue
    }

    fn render(&self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![question_line(&self.question, theme)];
        lines.extend(header_lines(&self.header, theme));
        lines.extend(
            self.config
                .lines(|_, item, highlighted| option_line(&item.text, highlighted, theme)),
        );
        lines.push(Line::default());
        lines.extend(self.yes_no.option_lines(self.focus >= 0, theme));
        lines.push(Line::default());
        if let Some(error) = self.error.as_ref().filter(|e| !e.is_fatal()) {
            lines.push(notice_line(error, theme));
        }
        let hints: &[(&str, &str)] = if self.allow_edit {
            &[("↑↓", "Move"), ("Enter", "Confirm / edit row"), ("Esc", "Cancel")]
        } else {
            &[("↑↓", "Move"), ("Enter", "Confirm"), ("Esc", "Cancel")]
        };
        lines.push(hint_line(hints, theme));
        Text::from(lines)
    }

    fn last_error(&self) -> Option<&QuestionError> {
        self.error.as_ref()
    }

    fn into_answer(self) -> Self::Answer {
        self.answer.unwrap_or(Confirmation::No)
    }
}
