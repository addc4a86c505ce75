//! `SELECT` statements.

use std::fmt;

use serde::Serialize;

use super::unexpected;
use crate::components::{
    bracketed, expect_body, push_part, ArrayObj, Condition, Expression, ExpressionArray,
    IntoKeyword, JoinKeyword, JoinType, Limit, OptionSpec, OptionsArray, OrderKeyword,
    ParseOptions,
};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("ALL", 1),
    OptionSpec::flag("DISTINCT", 1),
    OptionSpec::flag("DISTINCTROW", 1),
    OptionSpec::flag("HIGH_PRIORITY", 2),
    OptionSpec::var_eq("MAX_STATEMENT_TIME", 3),
    OptionSpec::flag("STRAIGHT_JOIN", 4),
    OptionSpec::flag("SQL_SMALL_RESULT", 5),
    OptionSpec::flag("SQL_BIG_RESULT", 6),
    OptionSpec::flag("SQL_BUFFER_RESULT", 7),
    OptionSpec::flag("SQL_CACHE", 8),
    OptionSpec::flag("SQL_NO_CACHE", 8),
    OptionSpec::flag("SQL_CALC_FOUND_ROWS", 9),
];

const END_OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("FOR UPDATE", 1),
    OptionSpec::flag("LOCK IN SHARE MODE", 1),
];

/// Keywords combining two selects.
const SET_OPERATORS: &[&str] = &[
    "UNION",
    "UNION ALL",
    "UNION DISTINCT",
    "EXCEPT",
    "INTERSECT",
];

/// A named window of the `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowDefinition {
    pub name: String,
    /// The bracketed window as written.
    pub spec: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub options: OptionsArray,
    pub expr: ExpressionArray,
    pub into: Option<IntoKeyword>,
    pub from: ExpressionArray,
    pub partition: Option<ArrayObj>,
    pub join: Vec<JoinKeyword>,
    #[serde(rename = "where")]
    pub where_clause: Vec<Condition>,
    pub group: Vec<OrderKeyword>,
    pub with_rollup: bool,
    pub having: Vec<Condition>,
    pub window: Vec<WindowDefinition>,
    pub order: Vec<OrderKeyword>,
    pub limit: Option<Limit>,
    pub procedure: Option<Expression>,
    pub end_options: OptionsArray,
    /// Selects combined with this one, with their set operator.
    pub union: Vec<(String, SelectStatement)>,
}

impl SelectStatement {
    pub const CLAUSES: &'static [&'static str] = &[
        "SELECT",
        "INTO",
        "FROM",
        "PARTITION",
        "JOIN",
        "WHERE",
        "GROUP BY",
        "HAVING",
        "WINDOW",
        "ORDER BY",
        "LIMIT",
        "PROCEDURE",
        "FOR UPDATE",
        "LOCK IN SHARE MODE",
    ];

    /// Parses a `SELECT` starting at its keyword.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();

        list.skip_insignificant();
        list.idx += 1;
        ret.options = OptionsArray::parse(parser, list, OPTIONS);
        ret.expr = ExpressionArray::parse(parser, list, &ParseOptions::default());
        expect_body(parser, list, ret.expr.is_empty());

        while !parser.is_halted() {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter || token.is_operator(")") {
                break;
            }
            let Some(keyword) = token.keyword() else {
                if unexpected(parser, list) {
                    break;
                }
                continue;
            };

            match keyword {
                "INTO" => {
                    list.idx += 1;
                    ret.into = IntoKeyword::parse(parser, list);
                }
                "FROM" => {
                    list.idx += 1;
                    ret.from = ExpressionArray::parse(parser, list, &ParseOptions::table());
                    expect_body(parser, list, ret.from.is_empty());
                }
                "PARTITION" => {
                    list.idx += 1;
                    ret.partition = Some(ArrayObj::parse(parser, list));
                }
                "WHERE" => {
                    list.idx += 1;
                    ret.where_clause = Condition::parse(parser, list);
                    expect_body(parser, list, ret.where_clause.is_empty());
                }
                "GROUP BY" => {
                    list.idx += 1;
                    ret.group = OrderKeyword::parse(parser, list);
                    expect_body(parser, list, ret.group.is_empty());
                }
                "WITH ROLLUP" => {
                    list.idx += 1;
                    ret.with_rollup = true;
                }
                "HAVING" => {
                    list.idx += 1;
                    ret.having = Condition::parse(parser, list);
                    expect_body(parser, list, ret.having.is_empty());
                }
                "WINDOW" => {
                    list.idx += 1;
                    ret.window = parse_windows(parser, list);
                }
                "ORDER BY" => {
                    list.idx += 1;
                    ret.order = OrderKeyword::parse(parser, list);
                    expect_body(parser, list, ret.order.is_empty());
                }
                "LIMIT" => {
                    list.idx += 1;
                    ret.limit = Some(Limit::parse(parser, list));
                }
                "PROCEDURE" => {
                    list.idx += 1;
                    ret.procedure = Expression::parse(parser, list, &ParseOptions::default());
                }
                "FOR UPDATE" | "LOCK IN SHARE MODE" => {
                    ret.end_options = OptionsArray::parse(parser, list, END_OPTIONS);
                }
                // Handled by the enclosing `INSERT`.
                "ON DUPLICATE KEY UPDATE" => break,
                kw if SET_OPERATORS.contains(&kw) => {
                    let operator = String::from(kw);
                    list.idx += 1;
                    list.skip_insignificant();
                    if tokens.get(list.idx).is_some_and(|t| t.is_keyword("SELECT")) {
                        let next = Self::parse(parser, list);
                        ret.union.push((operator, next));
                    } else {
                        parser.error("A SELECT statement was expected.", tokens.get(list.idx));
                    }
                }
                kw if JoinType::from_keyword(kw).is_some() => {
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
}

fn parse_windows(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<WindowDefinition> {
    let tokens = list.shared();
    let mut ret = Vec::new();

    loop {
        list.skip_insignificant();
        let Some(name) = tokens.get(list.idx).filter(|t| !t.is_reserved()) else {
            parser.error("A window name was expected.", tokens.get(list.idx));
            break;
        };
        list.idx += 1;
        list.skip_insignificant();
        if !tokens.get(list.idx).is_some_and(|t| t.is_keyword("AS")) {
            parser.error("An alias was expected.", tokens.get(list.idx));
            break;
        }
        list.idx += 1;
        list.skip_insignificant();
        ret.push(WindowDefinition {
            name: name.value_str().into_owned(),
            spec: bracketed(parser, list),
        });

        list.skip_insignificant();
        match tokens.get(list.idx) {
            Some(t) if t.is_operator(",") => list.idx += 1,
            _ => break,
        }
    }
    ret
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("SELECT");
        push_part(&mut out, &self.options.to_string());
        push_part(&mut out, &self.expr.to_string());
        if let Some(into) = &self.into {
            push_part(&mut out, &format!("INTO {into}"));
        }
        if !self.from.is_empty() {
            push_part(&mut out, &format!("FROM {}", self.from));
        }
        if let Some(partition) = &self.partition {
            push_part(&mut out, &format!("PARTITION {partition}"));
        }
        push_part(&mut out, &JoinKeyword::build_all(&self.join));
        if !self.where_clause.is_empty() {
            push_part(&mut out, &format!("WHERE {}", Condition::build_all(&self.where_clause)));
        }
        if !self.group.is_empty() {
            push_part(&mut out, &format!("GROUP BY {}", OrderKeyword::build_all(&self.group)));
        }
        if self.with_rollup {
            push_part(&mut out, "WITH ROLLUP");
        }
        if !self.having.is_empty() {
            push_part(&mut out, &format!("HAVING {}", Condition::build_all(&self.having)));
        }
        if !self.window.is_empty() {
            let windows: Vec<_> = self
                .window
                .iter()
                .map(|w| format!("{} AS {}", w.name, w.spec))
                .collect();
            push_part(&mut out, &format!("WINDOW {}", windows.join(", ")));
        }
        if !self.order.is_empty() {
            push_part(&mut out, &format!("ORDER BY {}", OrderKeyword::build_all(&self.order)));
        }
        if let Some(limit) = &self.limit {
            push_part(&mut out, &format!("LIMIT {limit}"));
        }
        if let Some(procedure) = &self.procedure {
            push_part(&mut out, &format!("PROCEDURE {procedure}"));
        }
        push_part(&mut out, &self.end_options.to_string());
        for (operator, select) in &self.union {
            push_part(&mut out, &format!("{operator} {select}"));
        }
        f.write_str(&out)
    }
}
