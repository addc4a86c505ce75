//! `UPDATE` statements.

use std::fmt;

use serde::Serialize;

use super::unexpected;
use crate::components::{
    expect_body, push_part, Condition, ExpressionArray, JoinKeyword, JoinType, Limit,
    OptionSpec, OptionsArray, OrderKeyword, ParseOptions, SetOperation,
};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("LOW_PRIORITY", 1),
    OptionSpec::flag("IGNORE", 2),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateStatement {
    pub options: OptionsArray,
    pub tables: ExpressionArray,
    pub join: Vec<JoinKeyword>,
    pub set: Vec<SetOperation>,
    #[serde(rename = "where")]
    pub where_clause: Vec<Condition>,
    pub order: Vec<OrderKeyword>,
    pub limit: Option<Limit>,
}

impl UpdateStatement {
    pub const CLAUSES: &'static [&'static str] = &["UPDATE", "SET", "WHERE", "ORDER BY", "LIMIT"];

    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();

        list.skip_insignificant();
        list.idx += 1;
        ret.options = OptionsArray::parse(parser, list, OPTIONS);
        ret.tables = ExpressionArray::parse(parser, list, &ParseOptions::table());
        expect_body(parser, list, ret.tables.is_empty());

        while !parser.is_halted() {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter {
                break;
            }
            match token.keyword() {
                Some("SET") => {
                    list.idx += 1;
                    ret.set = SetOperation::parse(parser, list);
                }
                Some("WHERE") => {
                    list.idx += 1;
                    ret.where_clause = Condition::parse(parser, list);
                    expect_body(parser, list, ret.where_clause.is_empty());
                }
                Some("ORDER BY") => {
                    list.idx += 1;
                    ret.order = OrderKeyword::parse(parser, list);
                    expect_body(parser, list, ret.order.is_empty());
                }
                Some("LIMIT") => {
                    list.idx += 1;
                    ret.limit = Some(Limit::parse(parser, list));
                }
                Some(kw) if JoinType::from_keyword(kw).is_some() => {
                    ret.join.extend(JoinKeyword::parse(parser, list));
                }
                _ => {
                    if unexpected(parser, list) {
                        break;
                    }
                }
            }
        }

        if ret.set.is_empty() {
            parser.error("Missing assignment in SET operation.", tokens.get(list.idx));
        }
        ret
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("UPDATE");
        push_part(&mut out, &self.options.to_string());
        push_part(&mut out, &self.tables.to_string());
        push_part(&mut out, &JoinKeyword::build_all(&self.join));
        push_part(&mut out, &format!("SET {}", SetOperation::build_all(&self.set)));
        if !self.where_clause.is_empty() {
            push_part(&mut out, &format!("WHERE {}", Condition::build_all(&self.where_clause)));
        }
        if !self.order.is_empty() {
            push_part(&mut out, &format!("ORDER BY {}", OrderKeyword::build_all(&self.order)));
        }
        if let Some(limit) = &self.limit {
            push_part(&mut out, &format!("LIMIT {limit}"));
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (UpdateStatement, Vec<String>) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let stmt = UpdateStatement::parse(&mut parser, &mut list);
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (stmt, errors)
    }

    #[test]
    fn test_update() {
        let (stmt, errors) =
            parse("UPDATE LOW_PRIORITY t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(stmt.set.len(), 2);
        assert_eq!(
            stmt.to_string(),
            "UPDATE LOW_PRIORITY t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1"
        );
    }

    #[test]
    fn test_missing_set() {
        let (_, errors) = parse("UPDATE t WHERE id = 3");
        assert_eq!(errors, vec!["Missing assignment in SET operation."]);
    }
}
