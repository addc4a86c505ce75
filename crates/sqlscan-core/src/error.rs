//! Crate-level error type.

use serde::Serialize;
use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Any failure surfaced by the crate.
///
/// In non-strict mode lex and parse problems are collected instead of
/// returned; this type only carries them out of a strict pass.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// No registered context has this name.
    #[error("unknown context: {0}")]
    UnknownContext(String),
}

/// A lex or parse error viewed uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnostic<'a> {
    Lex(&'a LexError),
    Parse(&'a ParseError),
}

impl Diagnostic<'_> {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(e) => &e.message,
            Self::Parse(e) => &e.message,
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Lex(e) => e.position,
            Self::Parse(e) => e.position,
        }
    }

    /// The offending character or token text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Lex(e) => &e.ch,
            Self::Parse(e) => e.found().unwrap_or(""),
        }
    }
}

impl Error {
    /// Returns the diagnostic carried by a lex or parse error.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<Diagnostic<'_>> {
        match self {
            Self::Lex(e) => Some(Diagnostic::Lex(e)),
            Self::Parse(e) => Some(Diagnostic::Parse(e)),
            Self::UnknownContext(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: Error = LexError::new("Unexpected character.", "$", 22, 1).into();
        assert_eq!(err.to_string(), "Unexpected character. at position 22 (line 1)");
        let diag = err.diagnostic().unwrap();
        assert_eq!(diag.message(), "Unexpected character.");
        assert_eq!(diag.text(), "$");
        assert_eq!(diag.position(), 22);
    }

    #[test]
    fn test_unknown_context_has_no_diagnostic() {
        let err = Error::UnknownContext(String::from("Foo1"));
        assert_eq!(err.to_string(), "unknown context: Foo1");
        assert!(err.diagnostic().is_none());
    }
}
