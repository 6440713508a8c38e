//! Shared drawing pieces for question widgets.

use crate::question::QuestionError;
use crate::ui::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const POINTER: &str = "❯ ";
const NO_POINTER: &str = "  ";

/// Draw a rendered question in a bordered panel filling the frame.
pub fn draw_question(frame: &mut Frame, body: Text<'static>, theme: &Theme) {
    let panel = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(panel, frame.area());
}

pub fn question_line(question: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("? ", theme.checked()),
        Span::styled(question.to_string(), theme.prompt()),
    ])
}

pub fn header_lines(header: &[String], theme: &Theme) -> Vec<Line<'static>> {
    header
        .iter()
        .map(|line| Line::from(Span::styled(format!("{}{}", NO_POINTER, line), theme.dim())))
        .collect()
}

/// One selectable row with a pointer in front when highlighted.
pub fn option_line(text: &str, highlighted: bool, theme: &Theme) -> Line<'static> {
    if highlighted {
        Line::from(Span::styled(
            format!("{}{}", POINTER, text),
            theme.highlight(),
        ))
    } else {
        Line::from(Span::styled(format!("{}{}", NO_POINTER, text), theme.text()))
    }
}

pub fn notice_line(error: &QuestionError, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(format!("✗ {}", error), theme.notice()))
}

/// Key hints such as `[↑↓] Move  [Enter] Select`.
pub fn hint_line(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let text = hints
        .iter()
        .map(|(keys, action)| format!("[{}] {}", keys, action))
        .collect::<Vec<_>>()
        .join("  ");
    Line::from(Span::styled(text, theme.dim()))
}

/// Flatten styled text to its plain lines.
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect()
        })
        .collect()
}
