//! # UI Module
//!
//! Terminal plumbing around the question widgets.
//!
//! ## Components
//!
//! - [`prompter`] - Event loop that runs one question to completion
//! - [`mod@render`] - Shared line builders and the framed panel
//! - [`theme`] - Built-in color themes
//! - [`config`] - Persisted user preferences
//!
//! ## Layout
//!
//! Every question draws into the same single panel:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │? Question                                       │
//! │  Header     Header                              │
//! │  ─────────  ──────                              │
//! │❯ option     value                               │
//! │  option     value                               │
//! │                                                 │
//! │✗ notice                                         │
//! │[↑↓] Move  [Enter] Select  [Esc] Cancel          │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod prompter;
pub mod render;
pub mod theme;

pub use config::Config;
pub use prompter::{EventReader, Prompter, Screen};
pub use theme::Theme;
