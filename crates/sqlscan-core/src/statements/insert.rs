//! `INSERT` and `REPLACE` statements.

use std::fmt;

use serde::Serialize;

use super::{unexpected, SelectStatement};
use crate::components::{push_part, ArrayObj, IntoKeyword, OptionSpec, OptionsArray, SetOperation};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("LOW_PRIORITY", 1),
    OptionSpec::flag("DELAYED", 1),
    OptionSpec::flag("HIGH_PRIORITY", 1),
    OptionSpec::flag("IGNORE", 2),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsertStatement {
    /// True for `REPLACE`.
    pub replace: bool,
    pub options: OptionsArray,
    /// The target table and its column list.
    pub into: Option<IntoKeyword>,
    pub partition: Option<ArrayObj>,
    pub values: Vec<ArrayObj>,
    pub set: Vec<SetOperation>,
    pub select: Option<Box<SelectStatement>>,
    pub on_duplicate: Vec<SetOperation>,
}

impl InsertStatement {
    pub const CLAUSES: &'static [&'static str] = &[
        "INSERT",
        "INTO",
        "PARTITION",
        "VALUES",
        "SET",
        "SELECT",
        "ON DUPLICATE KEY UPDATE",
    ];

    /// `INSERT` or `REPLACE`.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        if self.replace {
            "REPLACE"
        } else {
            "INSERT"
        }
    }

    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();

        list.skip_insignificant();
        ret.replace = tokens.get(list.idx).is_some_and(|t| t.is_keyword("REPLACE"));
        list.idx += 1;
        ret.options = OptionsArray::parse(parser, list, OPTIONS);

        list.skip_insignificant();
        if tokens.get(list.idx).is_some_and(|t| t.is_keyword("INTO")) {
            list.idx += 1;
        }
        ret.into = IntoKeyword::parse(parser, list);

        while !parser.is_halted() {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter {
                break;
            }
            match token.keyword() {
                Some("PARTITION") => {
                    list.idx += 1;
                    ret.partition = Some(ArrayObj::parse(parser, list));
                }
                Some("VALUES" | "VALUE") => {
                    list.idx += 1;
                    ret.values = parse_rows(parser, list);
                }
                Some("SET") => {
                    list.idx += 1;
                    ret.set = SetOperation::parse(parser, list);
                }
                Some("SELECT") => {
                    ret.select = Some(Box::new(SelectStatement::parse(parser, list)));
                }
                Some("ON DUPLICATE KEY UPDATE") => {
                    list.idx += 1;
                    ret.on_duplicate = SetOperation::parse(parser, list);
                }
                _ => {
                    if unexpected(parser, list) {
                        break;
                    }
                }
            }
        }
        ret
    }
}

fn parse_rows(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<ArrayObj> {
    let tokens = list.shared();
    let mut rows = Vec::new();
    loop {
        rows.push(ArrayObj::parse(parser, list));
        list.skip_insignificant();
        match tokens.get(list.idx) {
            Some(t) if t.is_operator(",") => list.idx += 1,
            _ => break,
        }
        if parser.is_halted() {
            break;
        }
    }
    rows
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from(self.keyword());
        push_part(&mut out, &self.options.to_string());
        if let Some(into) = &self.into {
            push_part(&mut out, &format!("INTO {into}"));
        }
        if let Some(partition) = &self.partition {
            push_part(&mut out, &format!("PARTITION {partition}"));
        }
        if !self.values.is_empty() {
            let rows: Vec<_> = self.values.iter().map(ToString::to_string).collect();
            push_part(&mut out, &format!("VALUES {}", rows.join(", ")));
        }
        if !self.set.is_empty() {
            push_part(&mut out, &format!("SET {}", SetOperation::build_all(&self.set)));
        }
        if let Some(select) = &self.select {
            push_part(&mut out, &select.to_string());
        }
        if !self.on_duplicate.is_empty() {
            push_part(
                &mut out,
                &format!(
                    "ON DUPLICATE KEY UPDATE {}",
                    SetOperation::build_all(&self.on_duplicate)
                ),
            );
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> InsertStatement {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let stmt = InsertStatement::parse(&mut parser, &mut list);
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        stmt
    }

    #[test]
    fn test_values() {
        let stmt = parse("INSERT IGNORE INTO t (a, b) VALUES (1, 'x'), (2, 'y')");
        assert_eq!(stmt.values.len(), 2);
        assert_eq!(
            stmt.to_string(),
            "INSERT IGNORE INTO t (a, b) VALUES (1, 'x'), (2, 'y')"
        );
    }

    #[test]
    fn test_replace_without_into() {
        let stmt = parse("REPLACE t SET a = 1");
        assert!(stmt.replace);
        assert_eq!(stmt.keyword(), "REPLACE");
        assert_eq!(stmt.to_string(), "REPLACE INTO t SET a = 1");
    }

    #[test]
    fn test_select_and_on_duplicate() {
        let stmt = parse("INSERT INTO t (a) SELECT b FROM u ON DUPLICATE KEY UPDATE a = a + 1");
        assert!(stmt.select.is_some());
        assert_eq!(stmt.on_duplicate.len(), 1);
        assert_eq!(
            stmt.to_string(),
            "INSERT INTO t (a) SELECT b FROM u ON DUPLICATE KEY UPDATE a = a + 1"
        );
    }
}
