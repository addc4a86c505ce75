//! `LIMIT` clauses.

use std::fmt;

use serde::Serialize;

use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

/// `LIMIT [offset,] row_count` or `LIMIT row_count OFFSET offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Limit {
    pub offset: Option<String>,
    pub row_count: String,
}

impl Limit {
    /// Parses the arguments following `LIMIT`.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();
        let mut offset_keyword = false;

        loop {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter
                || token.is_reserved()
                || token.is_operator(")")
            {
                break;
            }
            if token.is_keyword("OFFSET") {
                offset_keyword = true;
                list.idx += 1;
                continue;
            }
            if token.is_operator(",") {
                // The first argument was the offset.
                ret.offset = Some(std::mem::take(&mut ret.row_count));
                list.idx += 1;
                continue;
            }
            let value = token.token.clone();
            if offset_keyword {
                ret.offset = Some(value);
                offset_keyword = false;
            } else if ret.row_count.is_empty() {
                ret.row_count = value;
            } else {
                break;
            }
            list.idx += 1;
        }

        if ret.row_count.is_empty() {
            parser.error("A row count was expected.", tokens.get(list.idx));
        }
        if offset_keyword {
            let at = tokens.get(list.idx).or_else(|| tokens.last());
            parser.error("An offset was expected.", at);
        }
        ret
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.offset {
            Some(offset) => write!(f, "{offset}, {}", self.row_count),
            None => f.write_str(&self.row_count),
        }
    }
}
