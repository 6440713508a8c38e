//! Multiple choice from a table of options.
//!
//! The list holds one entry per option line plus a trailing submit entry.
//! Enter or Space on an option toggles it; on the submit entry it commits,
//! provided at least one option is checked.

use crate::question::list::SelectableList;
use crate::question::table::{render_table, AnswerMap, LineItem};
use crate::question::{is_cancel_key, Initialize, Question, QuestionError, QuestionInput, Tick};
use crate::ui::render::{header_lines, hint_line, notice_line, option_line, question_line};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};
use std::collections::BTreeMap;

const SUBMIT_LABEL: &str = "Submit";
const CHECKED: &str = "[x] ";
const UNCHECKED: &str = "[ ] ";
const CONTINUATION: &str = "    ";

pub struct MultiSelectQuestion {
    question: String,
    header: Vec<String>,
    list: SelectableList<LineItem>,
    answers: AnswerMap,
    /// `0..len` are options, `len` is the submit entry.
    cursor: usize,
    /// Chosen item index to the value captured when it was checked.
    chosen: BTreeMap<usize, Option<String>>,
    error: Option<QuestionError>,
}

impl MultiSelectQuestion {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the synthetic submit entry.
    pub fn submit_index(&self) -> usize {
        self.list.len()
    }

    /// Chosen item indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.chosen.keys().copied().collect()
    }

    /// Values of the chosen rows in ascending row order. Rows without a
    /// value are left out.
    pub fn selected_values(&self) -> Vec<String> {
        self.chosen.values().flatten().cloned().collect()
    }

    /// Check or uncheck the row that item `index` belongs to.
    pub fn toggle(&mut self, index: usize) {
        let Some(item) = self.list.items().get(index) else {
            return;
        };
        let anchor = self.first_item_of_row(item.row);
        if self.chosen.remove(&anchor).is_none() {
            let value = self.answers.get(item).map(str::to_string);
            self.chosen.insert(anchor, value);
        }
        if matches!(self.error, Some(QuestionError::SelectionRequired)) {
            self.error = None;
        }
    }

    fn first_item_of_row(&self, row: usize) -> usize {
        self.list
            .items()
            .iter()
            .position(|item| item.row == row)
            .unwrap_or(0)
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.submit_index());
        if self.cursor < self.list.len() {
            self.list.select(self.cursor);
        } else {
            self.list.clear_selection();
        }
    }

    fn option_line(
        &self,
        index: usize,
        item: &LineItem,
        highlighted: bool,
        theme: &Theme,
    ) -> Line<'static> {
        let is_anchor = self.first_item_of_row(item.row) == index;
        let glyph = match (is_anchor, self.chosen.contains_key(&index)) {
            (false, _) => CONTINUATION,
            (true, true) => CHECKED,
            (true, false) => UNCHECKED,
        };
        let mut line = option_line(&format!("{}{}", glyph, item.text), highlighted, theme);
        if glyph == CHECKED && !highlighted {
            line = Line::from(vec![
                Span::raw("  "),
                Span::styled(CHECKED, theme.checked()),
                Span::styled(item.text.clone(), theme.text()),
            ]);
        }
        line
    }
}

impl<C> Initialize<C> for MultiSelectQuestion {
    fn initialize(input: QuestionInput<C>) -> Result<Self, QuestionError> {
        let table = render_table(&input.rows, &input.headers, &input.row_values)?;
        if table.items.is_empty() {
            return Err(QuestionError::RenderFailure(
                "no options to choose from".to_string(),
            ));
        }

        let defaults: Vec<usize> = input
            .default_values
            .iter()
            .filter_map(|value| {
                let index = input
                    .row_of(value)
                    .and_then(|row| table.first_item_of_row(row));
                if index.is_none() {
                    tracing::debug!(value = %value, "default value matches no option, skipped");
                }
                index
            })
            .collect();

        let mut question = Self {
            question: input.question,
            header: table.header,
            list: SelectableList::new(table.items),
            answers: table.answers,
            cursor: 0,
            chosen: BTreeMap::new(),
            error: None,
        };
        for index in defaults {
            if !question.chosen.contains_key(&index) {
                question.toggle(index);
            }
        }

        question.move_cursor(0);
        Ok(question)
    }
}

impl Question for MultiSelectQuestion {
    type Answer = Vec<String>;

    fn tick(&mut self, key: KeyEvent) -> Tick {
        if is_cancel_key(&key) {
            self.error = Some(QuestionError::UserCancelled);
            return Tick::Cancel;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(self.cursor + 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.cursor < self.submit_index() {
                    self.toggle(self.cursor);
                } else if self.chosen.is_empty() {
                    self.error = Some(QuestionError::SelectionRequired);
                } else {
                    tracing::debug!(selected = ?self.selected_indices(), "multi select committed");
                    return Tick::Commit;
                }
            }
            _ => {}
        }
        Tick::Continue
    }

    fn render(&self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![question_line(&self.question, theme)];
        let header: Vec<String> = self
            .header
            .iter()
            .map(|line| format!("{}{}", CONTINUATION, line))
            .collect();
        lines.extend(header_lines(&header, theme));
        lines.extend(
            self.list
                .lines(|i, item, highlighted| self.option_line(i, item, highlighted, theme)),
        );
        lines.push(option_line(
            SUBMIT_LABEL,
            self.cursor == self.submit_index(),
            theme,
        ));
        lines.push(Line::default());
        if let Some(error) = self.error.as_ref().filter(|e| !e.is_fatal()) {
            lines.push(notice_line(error, theme));
        }
        lines.push(hint_line(
            &[("↑↓", "Move"), ("Space", "Toggle"), ("Esc", "Cancel")],
            theme,
        ));
        Text::from(lines)
    }

    fn last_error(&self) -> Option<&QuestionError> {
        self.error.as_ref()
    }

    fn into_answer(self) -> Self::Answer {
        self.selected_values()
    }
}
