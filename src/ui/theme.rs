//! # Theme
//!
//! Colors for the question widgets, passed explicitly into every
//! [`Question::render`](crate::question::Question::render) call.
//!
//! A [`Theme`] is an immutable value. The prompter owns one and hands out a
//! shared reference per frame, so two prompters can draw with different
//! themes side by side.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Latte** - light background
//! - **Dracula**
//! - **Nord**
//! - **Plain** - terminal default colors only

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Regular option and answer text.
    pub fg: Color,
    /// Placeholders, table rules, key hints.
    pub fg_dim: Color,
    /// Question prompt and focused border.
    pub accent: Color,
    /// Text of the highlighted row.
    pub highlight_fg: Color,
    /// Background of the highlighted row.
    pub highlight_bg: Color,
    /// Checked boxes and committed tags.
    pub success: Color,
    /// Inline notices such as rejected input.
    pub error: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    pub fn prompt(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn checked(&self) -> Style {
        Style::default().fg(self.success)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme().clone()
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    Theme {
        name: "Catppuccin Mocha",
        fg: Color::Rgb(205, 214, 244),          // text
        fg_dim: Color::Rgb(108, 112, 134),      // overlay0
        accent: Color::Rgb(137, 180, 250),      // blue
        highlight_fg: Color::Rgb(30, 30, 46),   // base
        highlight_bg: Color::Rgb(137, 180, 250), // blue
        success: Color::Rgb(166, 227, 161),     // green
        error: Color::Rgb(243, 139, 168),       // red
    },
    Theme {
        name: "Catppuccin Latte",
        fg: Color::Rgb(76, 79, 105),             // text
        fg_dim: Color::Rgb(156, 160, 176),       // overlay0
        accent: Color::Rgb(30, 102, 245),        // blue
        highlight_fg: Color::Rgb(239, 241, 245), // base
        highlight_bg: Color::Rgb(30, 102, 245),  // blue
        success: Color::Rgb(64, 160, 43),        // green
        error: Color::Rgb(210, 15, 57),          // red
    },
    Theme {
        name: "Dracula",
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(189, 147, 249), // purple
        highlight_fg: Color::Rgb(40, 42, 54),
        highlight_bg: Color::Rgb(139, 233, 253),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    },
    Theme {
        name: "Nord",
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208), // frost
        highlight_fg: Color::Rgb(46, 52, 64),
        highlight_bg: Color::Rgb(136, 192, 208),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    },
    Theme {
        name: "Plain",
        fg: Color::Reset,
        fg_dim: Color::DarkGray,
        accent: Color::Cyan,
        highlight_fg: Color::Black,
        highlight_bg: Color::Cyan,
        success: Color::Green,
        error: Color::Red,
    },
];
