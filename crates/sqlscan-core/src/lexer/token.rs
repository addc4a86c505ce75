//! Token types for the SQL lexer.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use super::Span;

/// The semantic type of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// Unclassified text: bare identifiers and unknown characters.
    None,
    /// A keyword of the active context, possibly spanning several words.
    Keyword,
    /// An operator, including brackets, commas and dots.
    Operator,
    /// A run of whitespace.
    Whitespace,
    /// A comment of any style.
    Comment,
    /// `TRUE` or `FALSE`.
    Bool,
    /// A numeric literal.
    Number,
    /// A quoted string literal.
    String,
    /// A variable, quoted identifier or placeholder.
    Symbol,
    /// The statement delimiter.
    Delimiter,
    /// A label such as `loop1:`.
    Label,
}

bitflags::bitflags! {
    /// Flags attached to a token.
    ///
    /// Each token type uses its own group; bits never overlap between
    /// groups so a set can be inspected without looking at the type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct TokenFlags: u32 {
        /// Reserved keyword.
        const KEYWORD_RESERVED = 1 << 0;
        /// Keyword made of several words, e.g. `PRIMARY KEY`.
        const KEYWORD_COMPOSED = 1 << 1;
        /// Keyword naming a data type.
        const KEYWORD_DATA_TYPE = 1 << 2;
        /// Keyword introducing a key definition.
        const KEYWORD_KEY = 1 << 3;
        /// Keyword naming a function.
        const KEYWORD_FUNCTION = 1 << 4;

        /// Hexadecimal number (`0x1F`, `x'1F'`).
        const NUMBER_HEX = 1 << 5;
        /// Number with a decimal point.
        const NUMBER_FLOAT = 1 << 6;
        /// Number with an exponent.
        const NUMBER_APPROXIMATE = 1 << 7;
        /// Number carrying its own minus sign.
        const NUMBER_NEGATIVE = 1 << 8;
        /// Binary number (`0b101`, `b'101'`).
        const NUMBER_BINARY = 1 << 9;

        /// String quoted with `'`.
        const STRING_SINGLE_QUOTES = 1 << 10;
        /// String quoted with `"`.
        const STRING_DOUBLE_QUOTES = 1 << 11;

        /// `# comment`
        const COMMENT_BASH = 1 << 12;
        /// `/* comment */`
        const COMMENT_C = 1 << 13;
        /// `-- comment`
        const COMMENT_SQL = 1 << 14;
        /// `/*! executable comment */`
        const COMMENT_MYSQL_CMD = 1 << 15;

        /// Arithmetic operator.
        const OPERATOR_ARITHMETIC = 1 << 16;
        /// Logical or comparison operator.
        const OPERATOR_LOGICAL = 1 << 17;
        /// Bitwise operator.
        const OPERATOR_BITWISE = 1 << 18;
        /// Assignment operator.
        const OPERATOR_ASSIGNMENT = 1 << 19;
        /// Structural operator: brackets, comma, dot.
        const OPERATOR_SQL = 1 << 20;

        /// `@variable`
        const SYMBOL_VARIABLE = 1 << 21;
        /// `` `identifier` ``
        const SYMBOL_BACKTICK = 1 << 22;
        /// `@'user'`
        const SYMBOL_USER = 1 << 23;
        /// `@@system_variable`
        const SYMBOL_SYSTEM = 1 << 24;
        /// `?` or `:name`
        const SYMBOL_PARAMETER = 1 << 25;
    }
}

/// The canonical value of a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Normalized text.
    Text(String),
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
}

impl TokenValue {
    /// Returns the text if this is a textual value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The raw source text.
    pub token: String,
    /// The canonical value derived from the raw text.
    pub value: TokenValue,
    /// The semantic type.
    pub kind: TokenType,
    /// Type-specific flags.
    pub flags: TokenFlags,
    /// The location in the source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token and derives its canonical value.
    #[must_use]
    pub fn new(token: impl Into<String>, kind: TokenType, flags: TokenFlags, span: Span) -> Self {
        let token = token.into();
        let value = extract(&token, kind, flags);
        Self {
            token,
            value,
            kind,
            flags,
            span,
        }
    }

    /// Returns the canonical value as text.
    #[must_use]
    pub fn value_str(&self) -> Cow<'_, str> {
        match &self.value {
            TokenValue::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Returns the normalized keyword if this is a keyword token.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        if self.kind == TokenType::Keyword {
            self.value.as_str()
        } else {
            None
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.keyword().is_some_and(|kw| kw == keyword)
    }

    /// Returns true if this token is a reserved keyword.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.kind == TokenType::Keyword && self.flags.contains(TokenFlags::KEYWORD_RESERVED)
    }

    /// Returns true if this token is the given operator.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenType::Operator && self.token == op
    }

    /// Returns false for whitespace and comments.
    #[must_use]
    pub const fn is_significant(&self) -> bool {
        !matches!(self.kind, TokenType::Whitespace | TokenType::Comment)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Derives the canonical value of a token.
///
/// Never fails: anything that cannot be interpreted degrades to the raw
/// text.
fn extract(token: &str, kind: TokenType, flags: TokenFlags) -> TokenValue {
    match kind {
        TokenType::Keyword => TokenValue::Text(
            token
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase(),
        ),
        TokenType::Whitespace => TokenValue::Text(String::from(" ")),
        TokenType::Bool => TokenValue::Bool(token.eq_ignore_ascii_case("TRUE")),
        TokenType::Number => extract_number(token, flags)
            .unwrap_or_else(|| TokenValue::Text(String::from(token))),
        TokenType::String => TokenValue::Text(unquote(token)),
        TokenType::Symbol => TokenValue::Text(extract_symbol(token, flags)),
        TokenType::Label => TokenValue::Text(String::from(token.trim_end_matches(':').trim())),
        _ => TokenValue::Text(String::from(token)),
    }
}

fn extract_number(token: &str, flags: TokenFlags) -> Option<TokenValue> {
    let body = token.trim_start_matches(['-', '+']);
    let negative = flags.contains(TokenFlags::NUMBER_NEGATIVE);

    let integer = if flags.contains(TokenFlags::NUMBER_HEX) {
        i64::from_str_radix(radix_digits(body, 'x')?, 16).ok()?
    } else if flags.contains(TokenFlags::NUMBER_BINARY) {
        i64::from_str_radix(radix_digits(body, 'b')?, 2).ok()?
    } else if flags.intersects(TokenFlags::NUMBER_FLOAT | TokenFlags::NUMBER_APPROXIMATE) {
        let value: f64 = body.parse().ok()?;
        return Some(TokenValue::Float(if negative { -value } else { value }));
    } else {
        match body.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let value: f64 = body.parse().ok()?;
                return Some(TokenValue::Float(if negative { -value } else { value }));
            }
        }
    };

    Some(TokenValue::Integer(if negative {
        integer.checked_neg()?
    } else {
        integer
    }))
}

/// Returns the digits of `0x1F` / `x'1F'` style literals (`marker` is
/// `x` or `b`).
fn radix_digits(body: &str, marker: char) -> Option<&str> {
    let mut chars = body.chars();
    match (chars.next()?, chars.next()?) {
        ('0', m) if m.eq_ignore_ascii_case(&marker) => body.get(2..),
        (m, '\'') if m.eq_ignore_ascii_case(&marker) => body.get(2..)?.strip_suffix('\''),
        _ => None,
    }
}

fn extract_symbol(token: &str, flags: TokenFlags) -> String {
    if flags.contains(TokenFlags::SYMBOL_VARIABLE) {
        let name = token.trim_start_matches('@');
        return if name.starts_with(['\'', '"', '`']) {
            unquote(name)
        } else {
            String::from(name)
        };
    }
    if flags.contains(TokenFlags::SYMBOL_PARAMETER) {
        return String::from(token.strip_prefix(':').unwrap_or(token));
    }
    if token.starts_with(['`', '"']) {
        return unquote(token);
    }
    String::from(token)
}

/// Strips the surrounding quotes and resolves escapes.
///
/// A doubled quote character stands for itself. Inside strings a
/// backslash escapes the following character; unrecognized escapes
/// yield the character unchanged.
pub(crate) fn unquote(token: &str) -> String {
    let mut chars = token.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let body: Vec<char> = chars.collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let c = body[i];
        if c == '\\' && quote != '`' && i + 1 < body.len() {
            out.push(match body[i + 1] {
                '0' => '\0',
                'b' => '\u{8}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'Z' => '\u{1a}',
                other => other,
            });
            i += 2;
            continue;
        }
        if c == quote {
            if body.get(i + 1) == Some(&quote) {
                out.push(quote);
                i += 2;
                continue;
            }
            break;
        }
        out.push(c);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str, kind: TokenType, flags: TokenFlags) -> Token {
        Token::new(raw, kind, flags, Span::default())
    }

    #[test]
    fn test_keyword_value_is_uppercased_and_collapsed() {
        let t = token(
            "primary \n\t key",
            TokenType::Keyword,
            TokenFlags::KEYWORD_RESERVED,
        );
        assert_eq!(t.value, TokenValue::Text(String::from("PRIMARY KEY")));
        assert!(t.is_keyword("PRIMARY KEY"));
        assert!(t.is_reserved());
    }

    #[test]
    fn test_whitespace_value_is_single_space() {
        let t = token(" \n\t ", TokenType::Whitespace, TokenFlags::empty());
        assert_eq!(t.value_str(), " ");
        assert_eq!(t.token, " \n\t ");
    }

    #[test]
    fn test_numbers() {
        let int = token("42", TokenType::Number, TokenFlags::empty());
        assert_eq!(int.value, TokenValue::Integer(42));

        let neg = token("-7", TokenType::Number, TokenFlags::NUMBER_NEGATIVE);
        assert_eq!(neg.value, TokenValue::Integer(-7));

        let hex = token("0x1F", TokenType::Number, TokenFlags::NUMBER_HEX);
        assert_eq!(hex.value, TokenValue::Integer(31));

        let hex_str = token("x'ff'", TokenType::Number, TokenFlags::NUMBER_HEX);
        assert_eq!(hex_str.value, TokenValue::Integer(255));

        let bin = token("b'101'", TokenType::Number, TokenFlags::NUMBER_BINARY);
        assert_eq!(bin.value, TokenValue::Integer(5));

        let float = token("2.5e-1", TokenType::Number, TokenFlags::NUMBER_APPROXIMATE);
        assert_eq!(float.value, TokenValue::Float(0.25));
    }

    #[test]
    fn test_malformed_number_degrades_to_raw() {
        let t = token("0x", TokenType::Number, TokenFlags::NUMBER_HEX);
        assert_eq!(t.value, TokenValue::Text(String::from("0x")));
    }

    #[test]
    fn test_string_unescaping() {
        let t = token(
            r"'it''s \n \q'",
            TokenType::String,
            TokenFlags::STRING_SINGLE_QUOTES,
        );
        assert_eq!(t.value_str(), "it's \n q");
    }

    #[test]
    fn test_unterminated_string_keeps_content() {
        let t = token("'abc", TokenType::String, TokenFlags::STRING_SINGLE_QUOTES);
        assert_eq!(t.value_str(), "abc");
    }

    #[test]
    fn test_symbols() {
        let backtick = token("`a``b`", TokenType::Symbol, TokenFlags::SYMBOL_BACKTICK);
        assert_eq!(backtick.value_str(), "a`b");

        let system = token(
            "@@session.sql_mode",
            TokenType::Symbol,
            TokenFlags::SYMBOL_VARIABLE | TokenFlags::SYMBOL_SYSTEM,
        );
        assert_eq!(system.value_str(), "session.sql_mode");

        let user = token(
            "@'root'",
            TokenType::Symbol,
            TokenFlags::SYMBOL_VARIABLE | TokenFlags::SYMBOL_USER,
        );
        assert_eq!(user.value_str(), "root");

        let param = token(":id", TokenType::Symbol, TokenFlags::SYMBOL_PARAMETER);
        assert_eq!(param.value_str(), "id");
    }

    #[test]
    fn test_bool() {
        assert_eq!(
            token("true", TokenType::Bool, TokenFlags::empty()).value,
            TokenValue::Bool(true)
        );
        assert_eq!(
            token("False", TokenType::Bool, TokenFlags::empty()).value,
            TokenValue::Bool(false)
        );
    }
}
