//! `JOIN` clauses.

use std::fmt;

use serde::Serialize;

use super::{expect_body, ArrayObj, Condition, Expression, ParseOptions};
use crate::lexer::{Token, TokenList};
use crate::parser::Parser;

/// The kind of a join, keyed by its keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    Cross,
    Full,
    Inner,
    Left,
    Right,
    Natural,
    NaturalLeft,
    NaturalRight,
    Straight,
}

impl JoinType {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("CROSS JOIN", Self::Cross),
        ("FULL JOIN", Self::Full),
        ("FULL OUTER JOIN", Self::Full),
        ("INNER JOIN", Self::Inner),
        ("JOIN", Self::Inner),
        ("LEFT JOIN", Self::Left),
        ("LEFT OUTER JOIN", Self::Left),
        ("RIGHT JOIN", Self::Right),
        ("RIGHT OUTER JOIN", Self::Right),
        ("NATURAL JOIN", Self::Natural),
        ("NATURAL LEFT JOIN", Self::NaturalLeft),
        ("NATURAL LEFT OUTER JOIN", Self::NaturalLeft),
        ("NATURAL RIGHT JOIN", Self::NaturalRight),
        ("NATURAL RIGHT OUTER JOIN", Self::NaturalRight),
        ("STRAIGHT_JOIN", Self::Straight),
    ];

    /// Looks up the join type of a keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(kw, _)| *kw == keyword)
            .map(|(_, ty)| *ty)
    }
}

/// One join: its type, the joined table and the join condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinKeyword {
    pub kind: JoinType,
    /// The join keyword as written, e.g. `LEFT OUTER JOIN`.
    pub keyword: String,
    pub expr: Option<Expression>,
    pub on: Vec<Condition>,
    pub using: Option<ArrayObj>,
}

impl JoinKeyword {
    /// Parses consecutive joins.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<Self> {
        let tokens = list.shared();
        let mut ret = Vec::new();

        loop {
            list.skip_insignificant();
            let Some(keyword) = tokens.get(list.idx).and_then(Token::keyword) else {
                break;
            };
            let Some(kind) = JoinType::from_keyword(keyword) else {
                break;
            };
            list.idx += 1;

            let mut join = Self {
                kind,
                keyword: keyword.to_owned(),
                expr: Expression::parse(parser, list, &ParseOptions::table()),
                on: Vec::new(),
                using: None,
            };
            if join.expr.is_none() {
                parser.error("A table was expected.", tokens.get(list.idx));
            }

            list.skip_insignificant();
            match tokens.get(list.idx).and_then(Token::keyword) {
                Some("ON") => {
                    list.idx += 1;
                    join.on = Condition::parse(parser, list);
                    expect_body(parser, list, join.on.is_empty());
                }
                Some("USING") => {
                    list.idx += 1;
                    join.using = Some(ArrayObj::parse(parser, list));
                }
                _ => {}
            }
            ret.push(join);
            if parser.is_halted() {
                break;
            }
        }
        ret
    }

    /// Rebuilds a list of joins.
    #[must_use]
    pub fn build_all(joins: &[Self]) -> String {
        joins
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for JoinKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword)?;
        if let Some(expr) = &self.expr {
            write!(f, " {expr}")?;
        }
        if !self.on.is_empty() {
            write!(f, " ON {}", Condition::build_all(&self.on))?;
        } else if let Some(using) = &self.using {
            write!(f, " USING {using}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> Vec<JoinKeyword> {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let joins = JoinKeyword::parse(&mut parser, &mut list);
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        joins
    }

    #[test]
    fn test_join_types() {
        assert_eq!(JoinType::from_keyword("LEFT OUTER JOIN"), Some(JoinType::Left));
        assert_eq!(JoinType::from_keyword("JOIN"), Some(JoinType::Inner));
        assert_eq!(JoinType::from_keyword("LEFT"), None);
    }

    #[test]
    fn test_consecutive_joins() {
        let joins = parse("LEFT OUTER JOIN b ON a.id = b.id AND b.x > 1 JOIN c USING (id) WHERE 1");
        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].kind, JoinType::Left);
        assert_eq!(joins[0].on.len(), 3);
        assert_eq!(joins[1].using.as_ref().unwrap().values, vec!["id"]);
        assert_eq!(
            JoinKeyword::build_all(&joins),
            "LEFT OUTER JOIN b ON a.id = b.id AND b.x > 1 JOIN c USING (id)"
        );
    }

    #[test]
    fn test_keyword_is_kept() {
        let joins = parse("inner join u USING (id) NATURAL LEFT OUTER JOIN v");
        assert_eq!(joins[0].kind, JoinType::Inner);
        assert_eq!(joins[1].kind, JoinType::NaturalLeft);
        assert_eq!(
            JoinKeyword::build_all(&joins),
            "INNER JOIN u USING (id) NATURAL LEFT OUTER JOIN v"
        );
    }

    #[test]
    fn test_empty_on_is_reported() {
        let ctx = Context::default();
        let mut list = Lexer::new("JOIN b ON WHERE 1", &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let joins = JoinKeyword::parse(&mut parser, &mut list);
        assert!(joins[0].on.is_empty());
        let errors: Vec<_> = parser.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(errors, ["An expression was expected."]);
        assert!(list.get(list.idx).unwrap().is_keyword("WHERE"));
    }
}
