//! `ORDER BY` and `GROUP BY` items.

use std::fmt;

use serde::Serialize;

use super::{Expression, ParseOptions};
use crate::lexer::TokenList;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// An expression with an optional sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderKeyword {
    pub expr: Expression,
    pub direction: Option<OrderDirection>,
}

impl OrderKeyword {
    /// Parses a comma separated list of sort items.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<Self> {
        let tokens = list.shared();
        let options = ParseOptions {
            no_alias: true,
            ..ParseOptions::default()
        };
        let mut ret = Vec::new();

        loop {
            let Some(expr) = Expression::parse(parser, list, &options) else {
                break;
            };
            list.skip_insignificant();
            let direction = match tokens.get(list.idx).and_then(|t| t.keyword()) {
                Some("ASC") => Some(OrderDirection::Asc),
                Some("DESC") => Some(OrderDirection::Desc),
                _ => None,
            };
            if direction.is_some() {
                list.idx += 1;
                list.skip_insignificant();
            }
            ret.push(Self { expr, direction });

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

    /// Rebuilds a list of sort items.
    #[must_use]
    pub fn build_all(items: &[Self]) -> String {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = self.direction {
            write!(f, " {direction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    #[test]
    fn test_order_items() {
        let ctx = Context::default();
        let mut list = Lexer::new("a DESC, b + 1, c ASC LIMIT 1", &ctx)
            .tokenize()
            .unwrap()
            .list;
        let mut parser = Parser::new(&ctx);
        let items = OrderKeyword::parse(&mut parser, &mut list);
        assert!(parser.errors().is_empty());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].direction, Some(OrderDirection::Desc));
        assert_eq!(items[1].direction, None);
        assert_eq!(OrderKeyword::build_all(&items), "a DESC, b + 1, c ASC");
        assert!(list.get(list.idx).unwrap().is_keyword("LIMIT"));
    }
}
