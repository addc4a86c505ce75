//! Parser error types.

use serde::Serialize;
use thiserror::Error;

use crate::lexer::Token;

/// An unexpected keyword, bracket, dot or end of input.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message} at position {position}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The offending token, if any.
    pub token: Option<Token>,
    /// Character offset of the offending token.
    pub position: usize,
}

impl ParseError {
    /// Creates a new parse error located at `token`.
    #[must_use]
    pub fn new(message: impl Into<String>, token: Option<&Token>) -> Self {
        Self {
            message: message.into(),
            position: token.map_or(0, |t| t.span.start),
            token: token.cloned(),
        }
    }

    /// The raw text of the offending token.
    #[must_use]
    pub fn found(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.token.as_str())
    }
}
