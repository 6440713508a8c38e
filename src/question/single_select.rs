//! Single choice from a table of options.

use crate::question::list::SelectableList;
use crate::question::table::{render_table, AnswerMap, LineItem, RenderedTable};
use crate::question::{is_cancel_key, Initialize, Question, QuestionError, QuestionInput, Tick};
use crate::ui::render::{header_lines, hint_line, option_line, question_line};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Text};

pub struct SingleSelectQuestion {
    question: String,
    header: Vec<String>,
    list: SelectableList<LineItem>,
    answers: AnswerMap,
    answer: Option<String>,
    error: Option<QuestionError>,
}

impl SingleSelectQuestion {
    /// Build from an already rendered table with the cursor on item `start`.
    pub(crate) fn from_table(question: String, table: RenderedTable, start: usize) -> Self {
        let mut list = SelectableList::new(table.items);
        list.select(start);
        Self {
            question,
            header: table.header,
            list,
            answers: table.answers,
            answer: None,
            error: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.list.selected().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub(crate) fn select(&mut self, index: usize) {
        self.list.select(index);
    }

    /// Answer value under the cursor, if that row carries one.
    pub fn selected_value(&self) -> Option<&str> {
        self.list
            .selected_item()
            .and_then(|item| self.answers.get(item))
    }

    pub(crate) fn option_lines(&self, focused: bool, theme: &Theme) -> Vec<Line<'static>> {
        self.list
            .lines(|_, item, highlighted| option_line(&item.text, focused && highlighted, theme))
    }
}

impl<C> Initialize<C> for SingleSelectQuestion {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError> {
        let table = render_table(&input.rows, &input.headers, &input.row_values)?;
        if table.items.is_empty() {
            return Err(QuestionError::RenderFailure(
                "no options to choose from".to_string(),
            ));
        }

        let start = input
            .default_value
            .as_deref()
            .and_then(|value| input.row_of(value))
            .and_then(|row| table.first_item_of_row(row))
            .unwrap_or(0);

        Ok(Self::from_table(input.question, table, start))
    }
}

impl Question for SingleSelectQuestion {
    type Answer = Option<String>;

    fn tick(&mut self, key: KeyEvent) -> Tick {
        if is_cancel_key(&key) {
            self.error = Some(QuestionError::UserCancelled);
            return Tick::Cancel;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.list.next(),
            KeyCode::Enter => {
                self.answer = self.selected_value().map(str::to_string);
                tracing::debug!(answer = ?self.answer, "single select committed");
                return Tick::Commit;
            }
            _ => {}
        }
        Tick::Continue
    }

    fn render(&self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![question_line(&self.question, theme)];
        lines.extend(header_lines(&self.header, theme));
        lines.extend(self.option_lines(true, theme));
        lines.push(Line::default());
        lines.push(hint_line(
            &[("↑↓", "Move"), ("Enter", "Select"), ("Esc", "Cancel")],
            theme,
        ));
        Text::from(lines)
    }

    fn last_error(&self) -> Option<&QuestionError> {
        self.error.as_ref()
    }

    fn into_answer(self) -> Self::Answer {
        self.answer
    }
}
