//! `DELETE` statements, single and multi-table.

use std::fmt;

use serde::Serialize;

use super::unexpected;
use crate::components::{
    expect_body, push_part, ArrayObj, Condition, ExpressionArray, JoinKeyword, JoinType, Limit,
    OptionSpec, OptionsArray, OrderKeyword, ParseOptions,
};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("LOW_PRIORITY", 1),
    OptionSpec::flag("QUICK", 2),
    OptionSpec::flag("IGNORE", 3),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteStatement {
    pub options: OptionsArray,
    /// Tables named before `FROM` in the multi-table form.
    pub columns: ExpressionArray,
    pub from: ExpressionArray,
    pub partition: Option<ArrayObj>,
    pub using: ExpressionArray,
    pub join: Vec<JoinKeyword>,
    #[serde(rename = "where")]
    pub where_clause: Vec<Condition>,
    pub order: Vec<OrderKeyword>,
    pub limit: Option<Limit>,
}

impl DeleteStatement {
    pub const CLAUSES: &'static [&'static str] = &[
        "DELETE",
        "FROM",
        "PARTITION",
        "USING",
        "WHERE",
        "ORDER BY",
        "LIMIT",
    ];

    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();
        let tables = ParseOptions::table();

        list.skip_insignificant();
        list.idx += 1;
        ret.options = OptionsArray::parse(parser, list, OPTIONS);
        ret.columns = ExpressionArray::parse(parser, list, &tables);

        while !parser.is_halted() {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter {
                break;
            }
            match token.keyword() {
                Some("FROM") => {
                    list.idx += 1;
                    ret.from = ExpressionArray::parse(parser, list, &tables);
                    expect_body(parser, list, ret.from.is_empty());
                }
                Some("PARTITION") => {
                    list.idx += 1;
                    ret.partition = Some(ArrayObj::parse(parser, list));
                }
                Some("USING") => {
                    list.idx += 1;
                    ret.using = ExpressionArray::parse(parser, list, &tables);
                    expect_body(parser, list, ret.using.is_empty());
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
        ret
    }

    /// Returns true for the multi-table form.
    #[must_use]
    pub fn is_multi_table(&self) -> bool {
        !self.columns.is_empty() || !self.using.is_empty()
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("DELETE");
        push_part(&mut out, &self.options.to_string());
        push_part(&mut out, &self.columns.to_string());
        if !self.from.is_empty() {
            push_part(&mut out, &format!("FROM {}", self.from));
        }
        if let Some(partition) = &self.partition {
            push_part(&mut out, &format!("PARTITION {partition}"));
        }
        if !self.using.is_empty() {
            push_part(&mut out, &format!("USING {}", self.using));
        }
        push_part(&mut out, &JoinKeyword::build_all(&self.join));
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

    fn parse(sql: &str) -> DeleteStatement {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let stmt = DeleteStatement::parse(&mut parser, &mut list);
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        stmt
    }

    #[test]
    fn test_single_table() {
        let stmt = parse("DELETE QUICK FROM t WHERE a = 1 ORDER BY a LIMIT 5");
        assert!(!stmt.is_multi_table());
        assert!(stmt.options.has("QUICK"));
        assert_eq!(
            stmt.to_string(),
            "DELETE QUICK FROM t WHERE a = 1 ORDER BY a LIMIT 5"
        );
    }

    #[test]
    fn test_multi_table() {
        let stmt = parse("DELETE t1, t2 FROM t1 INNER JOIN t2 ON t1.id = t2.id");
        assert!(stmt.is_multi_table());
        assert_eq!(stmt.columns.0.len(), 2);
        assert_eq!(stmt.join.len(), 1);
    }
}
