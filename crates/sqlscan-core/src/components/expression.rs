//! Field references and expressions.

use std::fmt;

use serde::Serialize;

use super::{next_significant, quote, FieldKind, ParseOptions};
use crate::lexer::{Token, TokenFlags, TokenList, TokenType};
use crate::parser::{is_statement_keyword, Parser};

/// Reserved keywords that may appear inside an expression.
const ALLOWED_KEYWORDS: &[&str] = &[
    "AND", "BETWEEN", "BINARY", "CASE", "COLLATE", "DEFAULT", "DIV", "DUAL", "ELSE", "EXISTS",
    "IN", "INTERVAL", "IS", "LIKE", "MOD", "NOT", "NOT IN", "NOT NULL", "NULL", "OR", "OVER",
    "REGEXP", "RLIKE", "THEN", "WHEN", "XOR",
];

/// Functions that may be called without brackets.
const NILADIC_FUNCTIONS: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "UTC_DATE",
    "UTC_TIME",
    "UTC_TIMESTAMP",
];

/// A reference to a database, table or column, or an arbitrary expression.
///
/// While only dotted names are seen the parts fill `database`, `table`
/// and `column`. The first operator, bracket or literal turns the whole
/// fragment into an expression; `expr` always holds the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expression {
    pub database: Option<String>,
    pub table: Option<String>,
    pub column: Option<String>,
    /// The source text with whitespace runs collapsed, alias excluded.
    pub expr: String,
    pub alias: Option<String>,
    /// The name of the first function called.
    pub function: Option<String>,
    /// The statement keyword of a bracketed subquery, e.g. `SELECT`.
    pub subquery: Option<String>,
}

impl Expression {
    /// Creates a reference from its parts.
    #[must_use]
    pub fn field(database: Option<&str>, table: Option<&str>, column: Option<&str>) -> Self {
        Self {
            database: database.map(String::from),
            table: table.map(String::from),
            column: column.map(String::from),
            ..Self::default()
        }
    }

    /// Parses one field or expression.
    ///
    /// Returns `None` if nothing could be read.
    #[allow(clippy::too_many_lines, clippy::cognitive_complexity)]
    pub fn parse(
        parser: &mut Parser<'_>,
        list: &mut TokenList,
        options: &ParseOptions,
    ) -> Option<Self> {
        let tokens = list.shared();
        let mut ret = Self::default();
        let mut brackets = 0usize;
        let mut case_depth = 0usize;
        let mut expecting_alias = false;
        let mut dot = false;
        let mut is_expr = false;
        let mut interval = false;
        let mut space = false;
        let mut prev: Option<&Token> = None;

        while let Some(token) = tokens.get(list.idx) {
            match token.kind {
                TokenType::Delimiter => break,
                TokenType::Whitespace => {
                    space = true;
                    list.idx += 1;
                    continue;
                }
                TokenType::Comment => {
                    list.idx += 1;
                    continue;
                }
                _ => {}
            }
            let nested = brackets > 0 || case_depth > 0;

            if expecting_alias {
                if !is_name(token) {
                    break;
                }
                ret.alias = Some(token.value_str().into_owned());
                expecting_alias = false;
                prev = Some(token);
                list.idx += 1;
                continue;
            }

            let mut name = is_name(token);
            if let Some(kw) = token.keyword() {
                if nested {
                    if brackets > 0 && ret.subquery.is_none() && is_statement_keyword(token) {
                        ret.subquery = Some(kw.to_owned());
                    }
                    track_case(kw, &mut case_depth);
                    name = false;
                } else if kw == "AS" {
                    if options.break_on_alias || options.no_alias {
                        break;
                    }
                    if ret.alias.is_some() {
                        parser.error("An alias was previously found.", Some(token));
                        break;
                    }
                    expecting_alias = true;
                    prev = Some(token);
                    list.idx += 1;
                    continue;
                } else if is_call(&tokens, list.idx, token) {
                    if options.parse_field {
                        break;
                    }
                    is_expr = true;
                    name = false;
                } else if token.is_reserved() {
                    // Table references never continue into an operator keyword.
                    let table = options.field == FieldKind::Table && kw != "DUAL";
                    if table || !ALLOWED_KEYWORDS.contains(&kw) {
                        break;
                    }
                    track_case(kw, &mut case_depth);
                    interval = kw == "INTERVAL";
                    is_expr = true;
                    name = false;
                } else if interval {
                    // The unit of an `INTERVAL` expression.
                    interval = false;
                    name = false;
                } else if ret.alias.is_some() && !dot {
                    break;
                }
            }

            let trigger = match token.kind {
                TokenType::Number | TokenType::Bool => true,
                TokenType::Symbol => token
                    .flags
                    .intersects(TokenFlags::SYMBOL_VARIABLE | TokenFlags::SYMBOL_PARAMETER),
                TokenType::Operator => !token.is_operator("."),
                _ => false,
            };
            if trigger && !nested {
                if options.parse_field {
                    break;
                }
                is_expr = true;
            }

            if token.kind == TokenType::Operator {
                if options.break_on_parentheses && (token.is_operator("(") || token.is_operator(")"))
                {
                    break;
                }
                if token.is_operator("(") {
                    if ret.function.is_none() {
                        if let Some(p) = prev.filter(|p| is_function_name(p)) {
                            ret.function = Some(p.value_str().into_owned());
                        }
                    }
                    brackets += 1;
                } else if token.is_operator(")") {
                    if brackets == 0 {
                        if case_depth == 0 && !options.in_brackets {
                            parser.error("Unexpected bracket.", Some(token));
                        }
                        break;
                    }
                    brackets -= 1;
                } else if token.is_operator(",") && !nested {
                    break;
                } else if token.is_operator(".") && !nested && !is_expr {
                    if dot {
                        parser.error("Unexpected dot.", Some(token));
                    }
                    match options.field {
                        FieldKind::Column => {
                            ret.database = ret.table.take();
                            ret.table = ret.column.take();
                        }
                        FieldKind::Table => ret.database = ret.table.take(),
                    }
                    dot = true;
                }
            }

            if name && !nested {
                let literal = token.kind == TokenType::String;
                let slot_free = match options.field {
                    FieldKind::Column => ret.column.is_none(),
                    FieldKind::Table => ret.table.is_none(),
                };
                let after_operator = prev.is_some_and(|p| {
                    (p.kind == TokenType::Operator && !p.is_operator(")")) || p.is_reserved()
                });

                if literal && (ret.expr.is_empty() || after_operator) {
                    is_expr = true;
                } else if is_expr && after_operator {
                    // An operand, e.g. `b` in `a + b`.
                } else if !is_expr && !literal && (dot || slot_free) {
                    let value = Some(token.value_str().into_owned());
                    match options.field {
                        FieldKind::Column => ret.column = value,
                        FieldKind::Table => ret.table = value,
                    }
                    dot = false;
                } else {
                    if options.break_on_alias || options.no_alias {
                        break;
                    }
                    if ret.alias.is_some() {
                        parser.error("An alias was previously found.", Some(token));
                        break;
                    }
                    ret.alias = Some(token.value_str().into_owned());
                    prev = Some(token);
                    list.idx += 1;
                    continue;
                }
            }

            if space && !ret.expr.is_empty() {
                ret.expr.push(' ');
            }
            space = false;
            ret.expr.push_str(&token.token);
            prev = Some(token);
            list.idx += 1;
        }

        if expecting_alias {
            let at = tokens.get(list.idx).or(prev);
            parser.error("An alias was expected.", at);
        }

        if ret.expr.is_empty() {
            return None;
        }
        if is_expr {
            // Names read before the first operator were operands.
            ret.database = None;
            ret.table = None;
            ret.column = None;
        }
        Some(ret)
    }

    /// Returns true if this is a plain reference rather than an expression.
    #[must_use]
    pub fn is_field(&self) -> bool {
        self.column.is_some() || self.table.is_some()
    }
}

/// Tokens that can name a column, table or alias.
fn is_name(token: &Token) -> bool {
    match token.kind {
        TokenType::None | TokenType::String => true,
        TokenType::Symbol => !token
            .flags
            .intersects(TokenFlags::SYMBOL_VARIABLE | TokenFlags::SYMBOL_PARAMETER),
        TokenType::Keyword => !token.is_reserved(),
        _ => false,
    }
}

fn is_function_name(token: &Token) -> bool {
    match token.kind {
        TokenType::None | TokenType::Symbol => true,
        TokenType::Keyword => token.flags.contains(TokenFlags::KEYWORD_FUNCTION),
        _ => false,
    }
}

/// Returns true if the function keyword at `idx` is being called.
fn is_call(tokens: &[Token], idx: usize, token: &Token) -> bool {
    if !token.flags.contains(TokenFlags::KEYWORD_FUNCTION) {
        return false;
    }
    next_significant(tokens, idx + 1).is_some_and(|t| t.is_operator("("))
        || token.keyword().is_some_and(|kw| NILADIC_FUNCTIONS.contains(&kw))
}

fn track_case(kw: &str, depth: &mut usize) {
    match kw {
        "CASE" => *depth += 1,
        "END" => *depth = depth.saturating_sub(1),
        _ => {}
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expr.is_empty() {
            let parts: Vec<_> = [&self.database, &self.table, &self.column]
                .into_iter()
                .flatten()
                .map(|part| quote(part))
                .collect();
            f.write_str(&parts.join("."))?;
        } else {
            f.write_str(&self.expr)?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", quote(alias))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse_with(sql: &str, options: &ParseOptions) -> (Option<Expression>, Vec<String>, usize) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let expr = Expression::parse(&mut parser, &mut list, options);
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (expr, errors, list.idx)
    }

    fn parse(sql: &str) -> Expression {
        let (expr, errors, _) = parse_with(sql, &ParseOptions::default());
        assert!(errors.is_empty(), "{errors:?}");
        expr.unwrap()
    }

    #[test]
    fn test_qualified_column() {
        let e = parse("db.tbl.col");
        assert_eq!(e.database.as_deref(), Some("db"));
        assert_eq!(e.table.as_deref(), Some("tbl"));
        assert_eq!(e.column.as_deref(), Some("col"));
        assert_eq!(e.expr, "db.tbl.col");
        assert!(e.is_field());
    }

    #[test]
    fn test_qualified_table() {
        let (e, _, _) = parse_with("`db`.`tbl` AS t", &ParseOptions::table());
        let e = e.unwrap();
        assert_eq!(e.database.as_deref(), Some("db"));
        assert_eq!(e.table.as_deref(), Some("tbl"));
        assert_eq!(e.column, None);
        assert_eq!(e.alias.as_deref(), Some("t"));
        assert_eq!(e.to_string(), "`db`.`tbl` AS `t`");
    }

    #[test]
    fn test_expression_with_adjacent_alias() {
        let e = parse("1 + 2   total");
        assert_eq!(e.expr, "1 + 2");
        assert_eq!(e.alias.as_deref(), Some("total"));
    }

    #[test]
    fn test_function_call() {
        let e = parse("COUNT(DISTINCT a) AS c");
        assert_eq!(e.expr, "COUNT(DISTINCT a)");
        assert_eq!(e.function.as_deref(), Some("COUNT"));
        assert_eq!(e.alias.as_deref(), Some("c"));
    }

    #[test]
    fn test_subquery() {
        let e = parse("(SELECT 1) x");
        assert_eq!(e.subquery.as_deref(), Some("SELECT"));
        assert_eq!(e.expr, "(SELECT 1)");
        assert_eq!(e.alias.as_deref(), Some("x"));
    }

    #[test]
    fn test_case_expression() {
        let e = parse("CASE WHEN a THEN 1 ELSE 2 END AS v");
        assert_eq!(e.expr, "CASE WHEN a THEN 1 ELSE 2 END");
        assert_eq!(e.alias.as_deref(), Some("v"));
    }

    #[test]
    fn test_interval_unit() {
        let e = parse("NOW() + INTERVAL 1 DAY");
        assert_eq!(e.expr, "NOW() + INTERVAL 1 DAY");
        assert_eq!(e.alias, None);
    }

    #[test]
    fn test_stops_at_comma_and_keyword() {
        let (e, _, idx) = parse_with("a, b", &ParseOptions::default());
        assert_eq!(e.unwrap().expr, "a");
        assert_eq!(idx, 1);
        let (e, _, idx) = parse_with("t WHERE", &ParseOptions::table());
        assert_eq!(e.unwrap().table.as_deref(), Some("t"));
        assert_eq!(idx, 2);
    }

    #[test]
    fn test_unexpected_bracket() {
        let (e, errors, idx) = parse_with("(1))", &ParseOptions::default());
        assert_eq!(e.unwrap().expr, "(1)");
        assert_eq!(errors, vec!["Unexpected bracket."]);
        assert_eq!(idx, 3);
    }

    #[test]
    fn test_bracket_inside_brackets_is_quiet() {
        let options = ParseOptions {
            in_brackets: true,
            ..ParseOptions::default()
        };
        let (_, errors, _) = parse_with("1)", &options);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_alias() {
        let (_, errors, _) = parse_with("a AS", &ParseOptions::default());
        assert_eq!(errors, vec!["An alias was expected."]);
    }

    #[test]
    fn test_parse_field_stops_at_expression() {
        let options = ParseOptions {
            parse_field: true,
            ..ParseOptions::default()
        };
        let (e, _, _) = parse_with("a + 1", &options);
        assert_eq!(e.unwrap().column.as_deref(), Some("a"));
    }

    #[test]
    fn test_string_literal_and_star() {
        assert_eq!(parse("'abc'").expr, "'abc'");
        let e = parse("t.*");
        assert_eq!(e.expr, "t.*");
        assert_eq!(e.table, None);
        assert!(!e.is_field());
    }

    #[test]
    fn test_expression_has_no_field_parts() {
        let e = parse("a + 1");
        assert_eq!(e.expr, "a + 1");
        assert_eq!(e.column, None);
        assert!(!e.is_field());

        let e = parse("t.a * 2 AS doubled");
        assert_eq!(e.expr, "t.a * 2");
        assert_eq!(e.table, None);
        assert_eq!(e.column, None);
        assert_eq!(e.alias.as_deref(), Some("doubled"));

        let e = parse("UPPER(name)");
        assert_eq!(e.function.as_deref(), Some("UPPER"));
        assert!(!e.is_field());
    }

    #[test]
    fn test_build_from_parts() {
        let e = Expression::field(None, Some("t"), Some("order"));
        assert_eq!(e.to_string(), "`t`.`order`");
    }
}
