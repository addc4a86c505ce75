//! SQL Tokenizer implementation.

use crate::context::{Context, SqlMode};

use super::{LexError, Span, Token, TokenFlags, TokenList, TokenType};

/// The output of a lexing pass.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// Every token, whitespace and comments included.
    pub list: TokenList,
    /// Diagnostics in the order they were raised.
    pub errors: Vec<LexError>,
}

/// A lexer that tokenizes SQL input.
///
/// Positions are counted in characters. Lexing is total: malformed input
/// yields diagnostics and best-effort tokens unless strict mode is on.
pub struct Lexer<'c> {
    context: &'c Context,
    /// The input, one entry per character.
    chars: Vec<char>,
    /// The current character position.
    pos: usize,
    /// The character position of the start of the current token.
    start: usize,
    /// The line of `start`.
    line: u32,
    delimiter: Vec<char>,
    strict: bool,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'c> Lexer<'c> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &str, context: &'c Context) -> Self {
        Self {
            context,
            chars: input.chars().collect(),
            pos: 0,
            start: 0,
            line: 1,
            delimiter: vec![';'],
            strict: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Sets the initial statement delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        if !delimiter.is_empty() {
            self.delimiter = delimiter.chars().collect();
        }
        self
    }

    /// Makes the first diagnostic fatal.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first diagnostic raised.
    pub fn tokenize(mut self) -> Result<Lexed, LexError> {
        while self.pos < self.chars.len() {
            self.scan();
            if self.strict {
                if let Some(err) = self.errors.first() {
                    return Err(err.clone());
                }
            }
        }
        tracing::debug!(
            context = self.context.name(),
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "lex finished"
        );
        Ok(Lexed {
            list: TokenList::new(self.tokens),
            errors: self.errors,
        })
    }

    fn char_at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        self.char_at(self.pos + 1)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Emits the text between `start` and `pos` as a token.
    fn push(&mut self, kind: TokenType, flags: TokenFlags) {
        let text = self.text(self.start, self.pos);
        let newlines = text.chars().filter(|&c| c == '\n').count();
        let span = Span::new(self.start, self.pos, self.line);

        if kind == TokenType::Operator
            && text == "."
            && self.tokens.last().is_some_and(|t| t.is_operator("."))
        {
            self.error("Unexpected dot.", ".", self.start);
        }

        self.tokens.push(Token::new(text, kind, flags, span));
        self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
        self.start = self.pos;
    }

    fn error(&mut self, message: impl Into<String>, ch: impl Into<String>, position: usize) {
        let err = LexError::new(message, ch, position, self.line);
        tracing::trace!(message = %err.message, position, "lex error");
        self.errors.push(err);
    }

    fn last_significant(&self) -> Option<&Token> {
        self.tokens.iter().rev().find(|t| t.is_significant())
    }

    fn at_statement_start(&self) -> bool {
        self.last_significant()
            .is_none_or(|t| t.kind == TokenType::Delimiter)
    }

    /// Returns true if the previous token can end an operand, in which
    /// case a following sign is an operator.
    fn follows_operand(&self) -> bool {
        self.last_significant().is_some_and(|t| match t.kind {
            TokenType::None
            | TokenType::Number
            | TokenType::String
            | TokenType::Symbol
            | TokenType::Bool => true,
            TokenType::Keyword => !t.flags.contains(TokenFlags::KEYWORD_RESERVED),
            TokenType::Operator => t.token == ")",
            _ => false,
        })
    }

    fn scan(&mut self) {
        self.start = self.pos;
        let Some(c) = self.peek() else { return };

        if self.at_delimiter(self.pos) {
            self.pos += self.delimiter.len();
            self.push(TokenType::Delimiter, TokenFlags::empty());
        } else if c.is_whitespace() {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            self.push(TokenType::Whitespace, TokenFlags::empty());
        } else if !(self.scan_comment(c)
            || self.scan_number(c)
            || self.scan_operator()
            || self.scan_string(c)
            || self.scan_symbol(c))
        {
            if is_word_start(c) {
                self.scan_word();
            } else {
                self.scan_unknown();
            }
        }
    }

    fn at_delimiter(&self, i: usize) -> bool {
        self.chars[i.min(self.chars.len())..].starts_with(&self.delimiter)
    }

    fn scan_comment(&mut self, c: char) -> bool {
        let next = self.peek_next();
        let sql_comment = c == '-'
            && next == Some('-')
            && self.char_at(self.pos + 2).is_none_or(char::is_whitespace);
        if c == '#' || sql_comment {
            let flags = if c == '#' {
                TokenFlags::COMMENT_BASH
            } else {
                TokenFlags::COMMENT_SQL
            };
            while self.peek().is_some_and(|c| c != '\n') {
                self.pos += 1;
            }
            self.push(TokenType::Comment, flags);
            return true;
        }
        if c != '/' || next != Some('*') {
            return false;
        }

        let mut flags = TokenFlags::COMMENT_C;
        if self.char_at(self.pos + 2) == Some('!') {
            flags |= TokenFlags::COMMENT_MYSQL_CMD;
        }
        self.pos += 2;
        loop {
            match self.peek() {
                Some('*') if self.peek_next() == Some('/') => {
                    self.pos += 2;
                    break;
                }
                Some(_) => self.pos += 1,
                None => {
                    self.error("Ending comment was expected.", "/*", self.start);
                    break;
                }
            }
        }
        self.push(TokenType::Comment, flags);
        true
    }

    fn scan_number(&mut self, c: char) -> bool {
        if matches!(c, 'x' | 'X' | 'b' | 'B') && self.peek_next() == Some('\'') {
            let flags = if matches!(c, 'x' | 'X') {
                TokenFlags::NUMBER_HEX
            } else {
                TokenFlags::NUMBER_BINARY
            };
            self.pos += 2;
            while self.peek().is_some_and(|c| c != '\'') {
                self.pos += 1;
            }
            if self.peek().is_some() {
                self.pos += 1;
            } else {
                self.error("Ending quote ' was expected.", "'", self.start);
            }
            self.push(TokenType::Number, flags);
            return true;
        }

        let mut i = self.pos;
        let mut flags = TokenFlags::empty();
        if matches!(c, '-' | '+') {
            if self.follows_operand() {
                return false;
            }
            while let Some(sign @ ('-' | '+')) = self.char_at(i) {
                if sign == '-' {
                    flags.toggle(TokenFlags::NUMBER_NEGATIVE);
                }
                i += 1;
            }
        }

        let is_digit = |i: usize| self.char_at(i).is_some_and(|c| c.is_ascii_digit());
        match (self.char_at(i), self.char_at(i + 1)) {
            (Some('0'), Some('x' | 'X'))
                if self.char_at(i + 2).is_some_and(|c| c.is_ascii_hexdigit()) =>
            {
                i += 2;
                while self.char_at(i).is_some_and(|c| c.is_ascii_hexdigit()) {
                    i += 1;
                }
                flags |= TokenFlags::NUMBER_HEX;
            }
            (Some('0'), Some('b' | 'B')) if matches!(self.char_at(i + 2), Some('0' | '1')) => {
                i += 2;
                while matches!(self.char_at(i), Some('0' | '1')) {
                    i += 1;
                }
                flags |= TokenFlags::NUMBER_BINARY;
            }
            (Some(d), _) if d.is_ascii_digit() || (d == '.' && is_digit(i + 1)) => {
                if d == '.' && self.follows_operand() {
                    return false;
                }
                while is_digit(i) {
                    i += 1;
                }
                if self.char_at(i) == Some('.') {
                    flags |= TokenFlags::NUMBER_FLOAT;
                    i += 1;
                    while is_digit(i) {
                        i += 1;
                    }
                }
                if matches!(self.char_at(i), Some('e' | 'E')) {
                    let sign = usize::from(matches!(self.char_at(i + 1), Some('-' | '+')));
                    if is_digit(i + 1 + sign) {
                        flags |= TokenFlags::NUMBER_APPROXIMATE;
                        i += 1 + sign;
                        while is_digit(i) {
                            i += 1;
                        }
                    }
                }
            }
            _ => return false,
        }

        // `1abc` and `0x1G` are identifiers.
        if self.char_at(i).is_some_and(is_word_char) && !self.at_delimiter(i) {
            return false;
        }
        self.pos = i;
        self.push(TokenType::Number, flags);
        true
    }

    fn scan_operator(&mut self) -> bool {
        for len in (1..=3).rev() {
            let end = self.pos + len;
            if end > self.chars.len() {
                continue;
            }
            let text = self.text(self.pos, end);
            if let Some(flags) = self.context.lookup_operator(&text) {
                self.pos = end;
                self.push(TokenType::Operator, flags);
                return true;
            }
        }
        false
    }

    /// Consumes a quoted run starting at `pos`, honoring doubled quotes
    /// and, unless `raw`, backslash escapes.
    fn scan_quoted(&mut self, quote: char, raw: bool) {
        self.pos += 1;
        loop {
            match self.peek() {
                Some('\\') if !raw => self.pos = (self.pos + 2).min(self.chars.len()),
                Some(c) if c == quote => {
                    self.pos += 1;
                    if self.peek() != Some(quote) {
                        return;
                    }
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
                None => {
                    self.error(
                        format!("Ending quote {quote} was expected."),
                        quote.to_string(),
                        self.start,
                    );
                    return;
                }
            }
        }
    }

    fn scan_string(&mut self, c: char) -> bool {
        let flags = match c {
            '\'' => TokenFlags::STRING_SINGLE_QUOTES,
            '"' if !self.context.has_mode(SqlMode::ANSI_QUOTES) => TokenFlags::STRING_DOUBLE_QUOTES,
            _ => return false,
        };
        self.scan_quoted(c, false);
        self.push(TokenType::String, flags);
        true
    }

    fn scan_symbol(&mut self, c: char) -> bool {
        let flags = match c {
            '`' => {
                self.scan_quoted('`', true);
                TokenFlags::SYMBOL_BACKTICK
            }
            '"' => {
                self.scan_quoted('"', true);
                TokenFlags::empty()
            }
            '?' => {
                self.pos += 1;
                TokenFlags::SYMBOL_PARAMETER
            }
            ':' if self.peek_next().is_some_and(is_word_start) => {
                self.pos += 1;
                self.pos = self.word_end(self.pos);
                TokenFlags::SYMBOL_PARAMETER
            }
            '@' => return self.scan_variable(),
            _ => return false,
        };
        self.push(TokenType::Symbol, flags);
        true
    }

    fn scan_variable(&mut self) -> bool {
        let mut flags = TokenFlags::SYMBOL_VARIABLE;
        self.pos += 1;
        if self.peek() == Some('@') {
            flags |= TokenFlags::SYMBOL_SYSTEM;
            self.pos += 1;
        }
        match self.peek() {
            Some(q @ ('\'' | '"' | '`')) => {
                flags |= TokenFlags::SYMBOL_USER;
                self.scan_quoted(q, q == '`');
            }
            Some(c) if is_word_char(c) => {
                while self
                    .peek()
                    .is_some_and(|c| is_word_char(c) || c == '.')
                {
                    self.pos += 1;
                }
            }
            _ => self.error("Variable name was expected.", "@", self.start),
        }
        self.push(TokenType::Symbol, flags);
        true
    }

    fn word_end(&self, mut i: usize) -> usize {
        while self.char_at(i).is_some_and(is_word_char) && !self.at_delimiter(i) {
            i += 1;
        }
        i
    }

    /// Returns true if a `(` follows `end`, spaces allowed under
    /// `IGNORE_SPACE`.
    fn opens_call(&self, mut end: usize) -> bool {
        if self.context.has_mode(SqlMode::IGNORE_SPACE) {
            while self.char_at(end).is_some_and(char::is_whitespace) {
                end += 1;
            }
        }
        self.char_at(end) == Some('(')
    }

    /// Finds the longest keyword starting at `pos`, looking at up to
    /// `keyword_max_words` whitespace separated words.
    fn match_keyword(&self, first_end: usize) -> Option<(usize, TokenFlags)> {
        let mut ends = vec![first_end];
        let mut j = first_end;
        while ends.len() < self.context.keyword_max_words() {
            let mut k = j;
            while self.char_at(k).is_some_and(char::is_whitespace) {
                k += 1;
            }
            if k == j || !self.char_at(k).is_some_and(is_word_start) {
                break;
            }
            j = self.word_end(k);
            ends.push(j);
        }

        ends.iter().rev().find_map(|&end| {
            self.context
                .lookup_keyword(&self.text(self.pos, end))
                .map(|flags| (end, flags))
        })
    }

    fn scan_word(&mut self) {
        let first_end = self.word_end(self.pos);

        if self.char_at(first_end) == Some(':')
            && self.char_at(first_end + 1) != Some('=')
            && self.at_statement_start()
        {
            self.pos = first_end + 1;
            self.push(TokenType::Label, TokenFlags::empty());
            return;
        }

        let after_dot = self.tokens.last().is_some_and(|t| t.is_operator("."));
        if !after_dot {
            let word = self.text(self.pos, first_end);
            if word.eq_ignore_ascii_case("TRUE") || word.eq_ignore_ascii_case("FALSE") {
                self.pos = first_end;
                self.push(TokenType::Bool, TokenFlags::empty());
                return;
            }

            if let Some((end, flags)) = self.match_keyword(first_end) {
                let function_only = flags == TokenFlags::KEYWORD_FUNCTION;
                if !function_only || self.opens_call(end) {
                    let statement_start = self.at_statement_start();
                    self.pos = end;
                    self.push(TokenType::Keyword, flags);
                    if statement_start && word.eq_ignore_ascii_case("DELIMITER") && end == first_end {
                        self.scan_delimiter_definition();
                    }
                    return;
                }
            }
        }

        self.pos = first_end;
        self.push(TokenType::None, TokenFlags::empty());
    }

    /// Reads the new delimiter after a `DELIMITER` keyword.
    fn scan_delimiter_definition(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
        if self.pos == self.start {
            self.error("Expected whitespace(s) before delimiter.", "", self.pos);
            return;
        }
        self.push(TokenType::Whitespace, TokenFlags::empty());

        while self.peek().is_some_and(|c| !c.is_whitespace()) {
            self.pos += 1;
        }
        if self.pos == self.start {
            self.error("Expected delimiter.", "", self.pos);
            return;
        }
        self.delimiter = self.chars[self.start..self.pos].to_vec();
        tracing::trace!(delimiter = %self.text(self.start, self.pos), "delimiter changed");
        self.push(TokenType::Delimiter, TokenFlags::empty());
    }

    fn scan_unknown(&mut self) {
        self.pos += 1;
        while self.peek().is_some_and(|c| !c.is_whitespace()) && !self.at_delimiter(self.pos) {
            self.pos += 1;
        }
        let text = self.text(self.start, self.pos);
        self.error("Unexpected character.", text, self.start);
        self.push(TokenType::None, TokenFlags::empty());
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_char(c: char) -> bool {
    is_word_start(c) || c == '$'
}
