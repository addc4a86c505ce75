//! Lexer error types.

use serde::Serialize;
use thiserror::Error;

/// A malformed character, string, symbol, comment or delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at position {position} (line {line})")]
pub struct LexError {
    /// The error message.
    pub message: String,
    /// The offending text.
    pub ch: String,
    /// Character offset of the offending text.
    pub position: usize,
    /// Line of the offending text (1-based).
    pub line: u32,
}

impl LexError {
    /// Creates a new lex error.
    #[must_use]
    pub fn new(message: impl Into<String>, ch: impl Into<String>, position: usize, line: u32) -> Self {
        Self {
            message: message.into(),
            ch: ch.into(),
            position,
            line,
        }
    }
}
