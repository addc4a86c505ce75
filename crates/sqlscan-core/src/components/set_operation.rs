//! `column = value` assignments of `UPDATE ... SET` and `INSERT ... SET`.

use std::fmt;

use serde::Serialize;

use super::{Expression, ParseOptions};
use crate::lexer::TokenList;
use crate::parser::Parser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetOperation {
    pub column: String,
    pub value: Expression,
}

impl SetOperation {
    /// Parses a comma separated list of assignments.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<Self> {
        let tokens = list.shared();
        let field = ParseOptions {
            parse_field: true,
            no_alias: true,
            ..ParseOptions::default()
        };
        let value_options = ParseOptions {
            no_alias: true,
            ..ParseOptions::default()
        };
        let mut ret = Vec::new();

        loop {
            let Some(column) = Expression::parse(parser, list, &field) else {
                break;
            };
            list.skip_insignificant();
            match tokens.get(list.idx) {
                Some(t) if t.is_operator("=") || t.is_operator(":=") => list.idx += 1,
                other => {
                    parser.error("Missing assignment in SET operation.", other);
                    break;
                }
            }
            let Some(value) = Expression::parse(parser, list, &value_options) else {
                parser.error("An expression was expected.", tokens.get(list.idx));
                break;
            };
            ret.push(Self {
                column: column.expr,
                value,
            });

            list.skip_insignificant();
            match tokens.get(list.idx) {
                Some(t) if t.is_operator(",") => list.idx += 1,
                _ => break,
            }
            if parser.is_halted() {
                break;
            }
        }
        ret
    }

    /// Rebuilds a list of assignments.
    #[must_use]
    pub fn build_all(ops: &[Self]) -> String {
        ops.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}
