//! # Question Errors
//!
//! Every outcome a question can report besides a committed answer.
//!
//! Only [`QuestionError::UserCancelled`], [`QuestionError::RenderFailure`] and
//! [`QuestionError::Terminal`] ever leave a widget. The remaining variants are
//! notices: the widget that raised them shows them inline and keeps running.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionError {
    /// The cancel key was pressed.
    #[error("cancelled by user")]
    UserCancelled,

    /// No validator accepted the submitted text.
    #[error("invalid input: {input:?}")]
    ValidationRejected { input: String },

    /// A multi-select was submitted with nothing chosen.
    #[error("please select at least one option")]
    SelectionRequired,

    /// The highlighted configuration row has no value to revisit.
    #[error("this configuration can't be modified")]
    UnmodifiableRow,

    /// The option table could not be laid out.
    #[error("failed to render options: {0}")]
    RenderFailure(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl QuestionError {
    /// Whether the error ends the question instead of being shown in place.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UserCancelled | Self::RenderFailure(_) | Self::Terminal(_)
        )
    }
}
