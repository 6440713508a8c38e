//! # Prompter
//!
//! Runs one question at a time to completion:
//!
//! 1. draw the question on the [`Screen`]
//! 2. block on the next event from the [`EventReader`]
//! 3. hand key presses to [`Question::tick`]
//! 4. stop on commit or cancel
//!
//! Both ends are traits so the loop can be driven by scripted events and a
//! recording screen in tests.

use crate::question::{Initialize, Question, QuestionError, QuestionInput, Tick};
use crate::ui::render::draw_question;
use crate::ui::theme::Theme;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, text::Text, Terminal};
use std::io::{self, Stdout};
use std::panic;

/// Source of terminal events (allows dependency injection for testing)
pub trait EventReader {
    /// Block until the next event arrives.
    fn read_event(&mut self) -> io::Result<Event>;
}

/// Production event reader backed by crossterm
pub struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Somewhere to put a rendered question.
pub trait Screen {
    fn draw(&mut self, body: Text<'static>, theme: &Theme) -> io::Result<()>;
}

/// The real terminal, in raw mode on the alternate screen.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalScreen {
    /// Switch the terminal into raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode for terminal")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self { terminal })
    }

    /// Restore the terminal to its normal state.
    pub fn leave(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn draw(&mut self, body: Text<'static>, theme: &Theme) -> io::Result<()> {
        self.terminal
            .draw(|frame| draw_question(frame, body, theme))?;
        Ok(())
    }
}

/// Make sure a panic leaves the terminal usable before the message prints.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Drives questions against a screen and an event source.
pub struct Prompter<S, R> {
    screen: S,
    events: R,
    theme: Theme,
}

impl<S: Screen, R: EventReader> Prompter<S, R> {
    pub fn new(screen: S, events: R, theme: Theme) -> Self {
        Self {
            screen,
            events,
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn into_screen(self) -> S {
        self.screen
    }

    /// Build question `Q` from `input` and run it.
    pub fn ask<Q, C>(&mut self, input: QuestionInput<C>) -> Result<Q::Answer, QuestionError>
    where
        Q: Question + Initialize<C>,
    {
        let span = tracing::info_span!("question", text = %input.question);
        let _entered = span.enter();

        let question = Q::initialize(input)?;
        self.run(question)
    }

    /// Feed events to `question` until it commits or is cancelled.
    ///
    /// Non-key events only trigger a redraw. Key releases and repeats are
    /// ignored so each physical press reaches the question once.
    pub fn run<Q: Question>(&mut self, mut question: Q) -> Result<Q::Answer, QuestionError> {
        loop {
            self.screen.draw(question.render(&self.theme), &self.theme)?;

            let Event::Key(key) = self.events.read_event()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match question.tick(key) {
                Tick::Continue => {}
                Tick::Commit => {
                    tracing::info!("question answered");
                    return Ok(question.into_answer());
                }
                Tick::Cancel => {
                    tracing::info!("question cancelled");
                    return Err(QuestionError::UserCancelled);
                }
            }
        }
    }
}
