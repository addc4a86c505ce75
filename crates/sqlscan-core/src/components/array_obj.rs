//! Bracketed value lists, e.g. `(a, b, 'c')`.

use std::fmt;

use serde::Serialize;

use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

/// A bracketed, comma separated list.
///
/// `raw` keeps each element's source text; `values` holds canonical
/// values (unquoted strings and identifiers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArrayObj {
    pub raw: Vec<String>,
    pub values: Vec<String>,
}

impl ArrayObj {
    /// Parses `( ... )`.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let mut ret = Self::default();
        list.skip_insignificant();
        match list.get(list.idx) {
            Some(t) if t.is_operator("(") => list.idx += 1,
            other => {
                let at = other.cloned();
                parser.error("An opening bracket was expected.", at.as_ref());
                return ret;
            }
        }

        let mut raw = String::new();
        let mut value = String::new();
        let mut depth = 0usize;
        let mut space = false;

        loop {
            let Some(token) = list.get(list.idx) else {
                let last = list.tokens().last().cloned();
                parser.error("A closing bracket was expected.", last.as_ref());
                break;
            };
            match token.kind {
                TokenType::Whitespace => {
                    space = true;
                    list.idx += 1;
                    continue;
                }
                TokenType::Comment => {
                    list.idx += 1;
                    continue;
                }
                TokenType::Delimiter => {
                    let at = token.clone();
                    parser.error("A closing bracket was expected.", Some(&at));
                    break;
                }
                _ => {}
            }

            if depth == 0 && token.is_operator(")") {
                list.idx += 1;
                ret.push(&mut raw, &mut value);
                break;
            }
            if depth == 0 && token.is_operator(",") {
                ret.push(&mut raw, &mut value);
                space = false;
                list.idx += 1;
                continue;
            }
            if token.is_operator("(") {
                depth += 1;
            } else if token.is_operator(")") {
                depth -= 1;
            }

            if space && !raw.is_empty() {
                raw.push(' ');
                value.push(' ');
            }
            space = false;
            raw.push_str(&token.token);
            value.push_str(&token.value_str());
            list.idx += 1;
        }
        ret
    }

    fn push(&mut self, raw: &mut String, value: &mut String) {
        if raw.is_empty() {
            return;
        }
        self.raw.push(std::mem::take(raw));
        self.values.push(std::mem::take(value));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for ArrayObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.raw.join(", "))
    }
}
