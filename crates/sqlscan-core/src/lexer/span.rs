//! Source location tracking for tokens and diagnostics.

use serde::Serialize;

/// Represents a span in the source text.
///
/// Offsets count characters, not bytes, so a multi-byte sequence is
/// never split when slicing the source back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Line of the first character (1-based).
    pub line: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(5, 10, 2);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.line, 2);
    }

    #[test]
    fn test_span_default() {
        assert_eq!(Span::default(), Span::new(0, 0, 1));
    }

    #[test]
    fn test_span_counts_characters() {
        let ctx = crate::context::Context::default();
        let lexed = crate::lexer::Lexer::new("SELECT 'é'\n, x", &ctx).tokenize().unwrap();
        let spans: Vec<_> = lexed.list.tokens().iter().map(|t| t.span).collect();
        assert_eq!(spans[2], Span::new(7, 10, 1));
        assert_eq!(spans[6], Span::new(13, 14, 2));
    }
}
