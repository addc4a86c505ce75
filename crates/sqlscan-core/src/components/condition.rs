//! `WHERE`, `HAVING` and `ON` conditions.

use std::fmt;

use serde::Serialize;

use crate::lexer::{TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

/// Logical operators separating conditions.
const DELIMITERS: &[&str] = &["&&", "||", "AND", "OR", "XOR"];

/// Reserved keywords that may appear inside a condition.
const ALLOWED_KEYWORDS: &[&str] = &[
    "ALL", "AND", "BETWEEN", "COLLATE", "EXISTS", "IF", "IN", "INTERVAL", "IS", "LIKE", "MATCH",
    "NOT", "NOT IN", "NOT NULL", "NULL", "OR", "REGEXP", "RLIKE", "SOUNDS", "XOR",
];

/// One fragment of a condition list: either a condition or the logical
/// operator between two conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Names referenced by the condition, in order of appearance.
    pub identifiers: Vec<String>,
    /// True for `AND`, `OR`, `XOR`, `&&` and `||` fragments.
    pub is_operator: bool,
    /// The condition text with whitespace runs collapsed.
    pub expr: String,
}

impl Condition {
    fn operator(op: &str) -> Self {
        Self {
            identifiers: Vec::new(),
            is_operator: true,
            expr: String::from(op),
        }
    }

    /// Parses conditions up to the first token that cannot belong to them.
    pub fn parse(_parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<Self> {
        let tokens = list.shared();
        let mut ret = Vec::new();
        let mut expr = Self::default();
        let mut brackets = 0usize;
        let mut between_pending = false;

        while let Some(token) = tokens.get(list.idx) {
            match token.kind {
                TokenType::Delimiter => break,
                TokenType::Comment => {
                    list.idx += 1;
                    continue;
                }
                TokenType::Whitespace => {
                    if !expr.expr.ends_with(' ') {
                        expr.expr.push(' ');
                    }
                    list.idx += 1;
                    continue;
                }
                _ => {}
            }

            let logical = matches!(token.kind, TokenType::Keyword | TokenType::Operator)
                && DELIMITERS.iter().any(|d| *d == token.value_str());
            if logical {
                if between_pending && token.is_keyword("AND") {
                    between_pending = false;
                } else {
                    expr.flush_into(&mut ret);
                    ret.push(Self::operator(&token.value_str()));
                    expr = Self::default();
                    list.idx += 1;
                    continue;
                }
            }

            if token.is_reserved() && !token.flags.contains(TokenFlags::KEYWORD_FUNCTION) {
                if token.is_keyword("BETWEEN") {
                    between_pending = true;
                }
                let allowed = token.keyword().is_some_and(|kw| ALLOWED_KEYWORDS.contains(&kw));
                if brackets == 0 && !allowed {
                    break;
                }
            }

            if token.is_operator("(") {
                brackets += 1;
            } else if token.is_operator(")") {
                if brackets == 0 {
                    break;
                }
                brackets -= 1;
            }

            expr.expr.push_str(&token.token);
            let names_something = match token.kind {
                TokenType::None | TokenType::String => true,
                TokenType::Keyword => !token.flags.contains(TokenFlags::KEYWORD_RESERVED),
                TokenType::Symbol => !token.flags.contains(TokenFlags::SYMBOL_PARAMETER),
                _ => false,
            };
            if names_something {
                let value = token.value_str();
                if !expr.identifiers.iter().any(|id| *id == value) {
                    expr.identifiers.push(value.into_owned());
                }
            }
            list.idx += 1;
        }

        expr.flush_into(&mut ret);
        ret
    }

    fn flush_into(mut self, ret: &mut Vec<Self>) {
        let trimmed = self.expr.trim();
        if trimmed.is_empty() {
            return;
        }
        self.expr = String::from(trimmed);
        ret.push(self);
    }

    /// Rebuilds a condition list.
    #[must_use]
    pub fn build_all(conditions: &[Self]) -> String {
        conditions
            .iter()
            .map(|c| c.expr.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}
