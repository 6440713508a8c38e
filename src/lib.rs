//! Stackwiz - interactive terminal questions for configuration wizards
//!
//! This library provides the question widgets (single and multi select, free
//! text, key/value tags, confirmation with jump-back) and the prompter that
//! drives them against a terminal.

pub mod question;
pub mod ui;
