//! # Option Table Renderer
//!
//! Lays a grid of string cells out as aligned text and splits it into the
//! line items a list widget can highlight one at a time.
//!
//! ```text
//! Region     Name
//! ─────────  ─────────────
//! us-east-1  N. Virginia      <- line item 0 (row 0)
//! eu-west-1  Ireland          <- line item 1 (row 1)
//! ```
//!
//! Cells may contain newlines. Such a row renders as several line items that
//! all point back at the same row, so every fragment answers with the row's
//! value. Lines that are blank after layout are dropped.

use crate::question::QuestionError;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";
const RULE: char = '─';

/// One rendered display line and the table row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub text: String,
    pub row: usize,
}

/// Answer value behind each table row.
///
/// A row without a value cannot be committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    values: Vec<Option<String>>,
}

impl AnswerMap {
    /// Pair `values` with `row_count` rows. A length mismatch leaves every row
    /// without a value; an empty string leaves that single row without one.
    pub fn new(row_count: usize, values: &[String]) -> Self {
        if values.len() != row_count {
            if !values.is_empty() {
                tracing::debug!(
                    rows = row_count,
                    values = values.len(),
                    "row values do not match table rows, answers disabled"
                );
            }
            return Self {
                values: vec![None; row_count],
            };
        }

        Self {
            values: values
                .iter()
                .map(|v| (!v.is_empty()).then(|| v.clone()))
                .collect(),
        }
    }

    pub fn get(&self, item: &LineItem) -> Option<&str> {
        self.row_value(item.row)
    }

    pub fn row_value(&self, row: usize) -> Option<&str> {
        self.values.get(row).and_then(|v| v.as_deref())
    }
}

/// Output of [`render_table`].
#[derive(Debug, Clone, Default)]
pub struct RenderedTable {
    /// Header line and its underline. Empty when no headers were given.
    pub header: Vec<String>,
    pub items: Vec<LineItem>,
    pub answers: AnswerMap,
}

impl RenderedTable {
    /// Index of the first line item belonging to `row`.
    pub fn first_item_of_row(&self, row: usize) -> Option<usize> {
        self.items.iter().position(|item| item.row == row)
    }
}

/// Lay out `rows` under optional `headers` and map each line to its row value.
pub fn render_table(
    rows: &[Vec<String>],
    headers: &[String],
    row_values: &[String],
) -> Result<RenderedTable, QuestionError> {
    let columns = if headers.is_empty() {
        rows.first().map_or(0, Vec::len)
    } else {
        headers.len()
    };

    for (i, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(QuestionError::RenderFailure(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                columns
            )));
        }
    }

    let mut widths = vec![0usize; columns];
    for (col, header) in headers.iter().enumerate() {
        widths[col] = widths[col].max(header.width());
    }
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            for line in cell.lines() {
                widths[col] = widths[col].max(line.width());
            }
        }
    }

    let header = if headers.is_empty() {
        Vec::new()
    } else {
        let rule: Vec<String> = widths
            .iter()
            .map(|w| RULE.to_string().repeat(*w))
            .collect();
        vec![join_cells(headers, &widths), join_cells(&rule, &widths)]
    };

    let mut items = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        let split: Vec<Vec<&str>> = row.iter().map(|cell| cell.lines().collect()).collect();
        let height = split.iter().map(Vec::len).max().unwrap_or(0);

        for k in 0..height {
            let fragment: Vec<&str> = split
                .iter()
                .map(|lines| lines.get(k).copied().unwrap_or(""))
                .collect();
            let text = join_cells(&fragment, &widths);
            if text.trim().is_empty() {
                continue;
            }
            items.push(LineItem {
                text,
                row: row_index,
            });
        }
    }

    Ok(RenderedTable {
        header,
        items,
        answers: AnswerMap::new(rows.len(), row_values),
    })
}

fn join_cells<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = String::new();
    for (col, cell) in cells.iter().enumerate() {
        if col > 0 {
            line.push_str(COLUMN_GAP);
        }
        let cell = cell.as_ref();
        line.push_str(cell);
        let pad = widths[col].saturating_sub(cell.width());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    line.trim_end().to_string()
}
