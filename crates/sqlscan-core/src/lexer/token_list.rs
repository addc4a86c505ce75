//! A cursor over a lexed token buffer.

use std::ops::Range;
use std::rc::Rc;

use super::{Token, TokenFlags, TokenType};

/// An indexable token sequence with a movable cursor.
///
/// The buffer is shared, so parsers can hold the tokens while moving
/// the cursor. `idx` always points at the first token not yet consumed.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: Rc<[Token]>,
    /// The cursor.
    pub idx: usize,
}

impl TokenList {
    /// Creates a list positioned at the first token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
            idx: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens, regardless of the cursor.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// A handle on the token buffer that does not borrow the list.
    #[must_use]
    pub fn shared(&self) -> Rc<[Token]> {
        Rc::clone(&self.tokens)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    /// The token at `idx + offset`, whitespace included.
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&Token> {
        self.idx
            .checked_add_signed(offset)
            .and_then(|i| self.tokens.get(i))
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// Moves past whitespace and comments without consuming anything else.
    pub fn skip_insignificant(&mut self) {
        while self.tokens.get(self.idx).is_some_and(|t| !t.is_significant()) {
            self.idx += 1;
        }
    }

    /// Consumes and returns the next significant token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        self.next_where(|_| true)
    }

    /// Consumes tokens up to and including the next one of the given types.
    pub fn next_of_type(&mut self, kinds: &[TokenType]) -> Option<&Token> {
        self.next_where(|t| kinds.contains(&t.kind))
    }

    /// Consumes tokens up to and including the next one of `kind` carrying
    /// every flag in `flags`.
    pub fn next_of_type_and_flag(&mut self, kind: TokenType, flags: TokenFlags) -> Option<&Token> {
        self.next_where(|t| t.kind == kind && t.flags.contains(flags))
    }

    /// Consumes tokens up to and including the next one of `kind` whose
    /// canonical value is `value` (case-insensitive).
    pub fn next_of_type_and_value(&mut self, kind: TokenType, value: &str) -> Option<&Token> {
        self.next_where(|t| t.kind == kind && t.value_str().eq_ignore_ascii_case(value))
    }

    fn next_where(&mut self, pred: impl Fn(&Token) -> bool) -> Option<&Token> {
        let found = (self.idx..self.tokens.len())
            .find(|&i| self.tokens[i].is_significant() && pred(&self.tokens[i]));
        match found {
            Some(i) => {
                self.idx = i + 1;
                self.tokens.get(i)
            }
            None => {
                self.idx = self.tokens.len();
                None
            }
        }
    }

    /// Moves back to the previous significant token and returns it.
    ///
    /// The cursor is left on the returned token, so `next()` yields it again.
    pub fn previous(&mut self) -> Option<&Token> {
        self.previous_where(|_| true)
    }

    pub fn previous_of_type(&mut self, kinds: &[TokenType]) -> Option<&Token> {
        self.previous_where(|t| kinds.contains(&t.kind))
    }

    pub fn previous_of_type_and_flag(
        &mut self,
        kind: TokenType,
        flags: TokenFlags,
    ) -> Option<&Token> {
        self.previous_where(|t| t.kind == kind && t.flags.contains(flags))
    }

    pub fn previous_of_type_and_value(&mut self, kind: TokenType, value: &str) -> Option<&Token> {
        self.previous_where(|t| t.kind == kind && t.value_str().eq_ignore_ascii_case(value))
    }

    fn previous_where(&mut self, pred: impl Fn(&Token) -> bool) -> Option<&Token> {
        let end = self.idx.min(self.tokens.len());
        let i = (0..end)
            .rev()
            .find(|&i| self.tokens[i].is_significant() && pred(&self.tokens[i]))?;
        self.idx = i;
        self.tokens.get(i)
    }

    /// Moves the cursor back to the first token.
    pub fn rewind(&mut self) {
        self.idx = 0;
    }

    /// Rebuilds the full source text.
    #[must_use]
    pub fn build(&self) -> String {
        self.tokens.iter().map(|t| t.token.as_str()).collect()
    }

    /// Rebuilds the source text of a token range.
    #[must_use]
    pub fn build_range(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        self.tokens[start..end]
            .iter()
            .map(|t| t.token.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::{Lexer, Span};

    fn list() -> TokenList {
        let t = |raw: &str, kind| Token::new(raw, kind, TokenFlags::empty(), Span::default());
        TokenList::new(vec![
            t("SELECT", TokenType::Keyword),
            t(" ", TokenType::Whitespace),
            t("/* c */", TokenType::Comment),
            t("a", TokenType::None),
            t(" ", TokenType::Whitespace),
            t("FROM", TokenType::Keyword),
            t(" ", TokenType::Whitespace),
            t("b", TokenType::None),
        ])
    }

    #[test]
    fn test_next_skips_insignificant() {
        let mut list = list();
        assert_eq!(list.next().unwrap().token, "SELECT");
        assert_eq!(list.next().unwrap().token, "a");
        assert_eq!(list.idx, 4);
    }

    #[test]
    fn test_next_of_type_and_value() {
        let mut list = list();
        let from = list.next_of_type_and_value(TokenType::Keyword, "from");
        assert_eq!(from.unwrap().token, "FROM");
        assert_eq!(list.idx, 6);
        assert!(list.next_of_type(&[TokenType::Keyword]).is_none());
        assert!(list.at_end());
    }

    #[test]
    fn test_previous_leaves_cursor_on_token() {
        let mut list = list();
        list.idx = 5;
        assert_eq!(list.previous().unwrap().token, "a");
        assert_eq!(list.idx, 3);
        assert_eq!(list.next().unwrap().token, "a");
    }

    fn lexed(sql: &str) -> TokenList {
        let ctx = Context::default();
        Lexer::new(sql, &ctx).tokenize().unwrap().list
    }

    const QUERY: &str = "SELECT a, `b` FROM t WHERE x = 1";

    #[test]
    fn test_next_of_type_and_flag() {
        let mut list = lexed(QUERY);
        let b = list.next_of_type_and_flag(TokenType::Symbol, TokenFlags::SYMBOL_BACKTICK);
        assert_eq!(b.unwrap().token, "`b`");
        assert_eq!(list.idx, 6);

        let from = list.next_of_type_and_flag(TokenType::Keyword, TokenFlags::KEYWORD_RESERVED);
        assert_eq!(from.unwrap().token, "FROM");
        assert_eq!(list.idx, 8);

        assert!(list
            .next_of_type_and_flag(TokenType::Keyword, TokenFlags::KEYWORD_FUNCTION)
            .is_none());
        assert!(list.at_end());
    }

    #[test]
    fn test_previous_of_type() {
        let mut list = lexed(QUERY);
        list.idx = list.len();
        assert_eq!(list.previous_of_type(&[TokenType::Operator]).unwrap().token, "=");
        assert_eq!(list.idx, 15);
        assert_eq!(list.previous_of_type(&[TokenType::Symbol]).unwrap().token, "`b`");
        assert_eq!(list.idx, 5);

        // A miss leaves the cursor alone.
        assert!(list.previous_of_type(&[TokenType::Number]).is_none());
        assert_eq!(list.idx, 5);
    }

    #[test]
    fn test_previous_of_type_and_flag() {
        let mut list = lexed(QUERY);
        list.idx = list.len();
        let mut seen = Vec::new();
        while let Some(t) =
            list.previous_of_type_and_flag(TokenType::Keyword, TokenFlags::KEYWORD_RESERVED)
        {
            seen.push(t.token.clone());
        }
        assert_eq!(seen, ["WHERE", "FROM", "SELECT"]);
        assert_eq!(list.idx, 0);
    }

    #[test]
    fn test_previous_of_type_and_value() {
        let mut list = lexed(QUERY);
        list.idx = list.len();
        let from = list.previous_of_type_and_value(TokenType::Keyword, "from");
        assert_eq!(from.unwrap().token, "FROM");
        assert_eq!(list.idx, 7);
        assert_eq!(
            list.previous_of_type_and_value(TokenType::None, "A").unwrap().token,
            "a"
        );
        assert_eq!(list.idx, 2);
        assert!(list.previous_of_type_and_value(TokenType::None, "t").is_none());
    }

    #[test]
    fn test_peek_out_of_range() {
        let list = list();
        assert!(list.peek(-1).is_none());
        assert_eq!(list.peek(1).unwrap().token, " ");
        assert!(list.peek(100).is_none());
    }

    #[test]
    fn test_build() {
        let list = list();
        assert_eq!(list.build(), "SELECT /* c */a FROM b");
        assert_eq!(list.build_range(3..6), "a FROM");
        assert_eq!(list.build_range(6..100), " b");
    }
}
