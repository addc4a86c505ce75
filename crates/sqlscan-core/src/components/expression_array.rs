//! Comma separated expression lists.

use std::fmt;

use serde::Serialize;

use super::{Expression, ParseOptions};
use crate::lexer::{TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

/// Reserved keywords that may start an expression in a list.
const LEADING_KEYWORDS: &[&str] = &[
    "BINARY", "CASE", "DEFAULT", "DUAL", "EXISTS", "INTERVAL", "NOT", "NULL",
];

/// A list of expressions such as a select list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpressionArray(pub Vec<Expression>);

impl ExpressionArray {
    /// Parses expressions separated by commas.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList, options: &ParseOptions) -> Self {
        let mut ret = Vec::new();
        let mut expecting = true;

        while let Some(token) = list.get(list.idx) {
            if !token.is_significant() {
                list.idx += 1;
                continue;
            }
            if token.kind == TokenType::Delimiter {
                break;
            }
            if token.is_reserved()
                && !token.flags.contains(TokenFlags::KEYWORD_FUNCTION)
                && !token
                    .keyword()
                    .is_some_and(|kw| LEADING_KEYWORDS.contains(&kw))
            {
                break;
            }

            if token.is_operator(",") {
                if expecting {
                    let token = token.clone();
                    parser.error("An expression was expected.", Some(&token));
                }
                expecting = true;
                list.idx += 1;
                continue;
            }
            if !expecting {
                break;
            }

            let Some(expr) = Expression::parse(parser, list, options) else {
                break;
            };
            ret.push(expr);
            expecting = false;
            if parser.is_halted() {
                break;
            }
        }

        if expecting && !ret.is_empty() {
            let at = list.get(list.idx).or_else(|| list.tokens().last()).cloned();
            parser.error("An expression was expected.", at.as_ref());
        }
        Self(ret)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expression> {
        self.0.iter()
    }
}

impl fmt::Display for ExpressionArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (ExpressionArray, Vec<String>) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let arr = ExpressionArray::parse(&mut parser, &mut list, &ParseOptions::default());
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (arr, errors)
    }

    #[test]
    fn test_select_list() {
        let (arr, errors) = parse("a, b AS c, COUNT(*) FROM t");
        assert!(errors.is_empty());
        assert_eq!(arr.0.len(), 3);
        assert_eq!(arr.to_string(), "a, b AS `c`, COUNT(*)");
    }

    #[test]
    fn test_trailing_comma() {
        let (arr, errors) = parse("a, FROM t");
        assert_eq!(arr.0.len(), 1);
        assert_eq!(errors, vec!["An expression was expected."]);
    }

    #[test]
    fn test_leading_keyword() {
        let (arr, errors) = parse("NULL, NOT a");
        assert!(errors.is_empty());
        assert_eq!(arr.0.len(), 2);
    }
}
