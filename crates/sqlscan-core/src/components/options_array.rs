//! Keyword options such as `DISTINCT`, `ENGINE=InnoDB` or `COMMENT 'x'`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::next_significant;
use crate::lexer::{Token, TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

/// How an option is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionKind {
    /// The name alone, e.g. `DISTINCT`.
    Flag,
    /// The name and one value, e.g. `COMMENT 'x'`.
    Var,
    /// Like [`OptionKind::Var`], printed with `=`.
    VarEq,
    /// The name and an expression, e.g. `DEFAULT (NOW())`.
    Expr,
}

/// An option a grammar accepts.
///
/// Options sharing an ordinal are mutually exclusive; the last one wins.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub ordinal: u32,
    pub kind: OptionKind,
}

impl OptionSpec {
    #[must_use]
    pub const fn flag(name: &'static str, ordinal: u32) -> Self {
        Self {
            name,
            ordinal,
            kind: OptionKind::Flag,
        }
    }

    #[must_use]
    pub const fn var(name: &'static str, ordinal: u32) -> Self {
        Self {
            name,
            ordinal,
            kind: OptionKind::Var,
        }
    }

    #[must_use]
    pub const fn var_eq(name: &'static str, ordinal: u32) -> Self {
        Self {
            name,
            ordinal,
            kind: OptionKind::VarEq,
        }
    }

    #[must_use]
    pub const fn expr(name: &'static str, ordinal: u32) -> Self {
        Self {
            name,
            ordinal,
            kind: OptionKind::Expr,
        }
    }
}

/// One parsed option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlOption {
    Bare {
        ordinal: u32,
        name: String,
    },
    Valued {
        ordinal: u32,
        name: String,
        /// The canonical value, e.g. an unquoted string.
        value: String,
        /// The value as written.
        expr: String,
        equals: bool,
    },
}

impl SqlOption {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bare { name, .. } | Self::Valued { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        match self {
            Self::Bare { ordinal, .. } | Self::Valued { ordinal, .. } => *ordinal,
        }
    }
}

impl fmt::Display for SqlOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare { name, .. } => f.write_str(name),
            Self::Valued {
                name, expr, equals, ..
            } => {
                if *equals {
                    write!(f, "{name}={expr}")
                } else {
                    write!(f, "{name} {expr}")
                }
            }
        }
    }
}

/// A set of options ordered by ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionsArray {
    options: BTreeMap<u32, SqlOption>,
}

impl OptionsArray {
    /// Parses options from `specs` until a token matches none of them.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList, specs: &[OptionSpec]) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();

        loop {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.is_operator(",")
                && next_significant(&tokens, list.idx + 1).is_some_and(|t| find(specs, t).is_some())
            {
                list.idx += 1;
                continue;
            }
            let Some(spec) = find(specs, token) else {
                break;
            };
            list.idx += 1;

            let option = match spec.kind {
                OptionKind::Flag => SqlOption::Bare {
                    ordinal: spec.ordinal,
                    name: String::from(spec.name),
                },
                kind => {
                    list.skip_insignificant();
                    let equals = tokens.get(list.idx).is_some_and(|t| t.is_operator("="));
                    if equals {
                        list.idx += 1;
                        list.skip_insignificant();
                    }
                    let Some((value, expr)) = take_value(list, kind == OptionKind::Expr) else {
                        parser.error(
                            format!("Value/Expression for the option {} was expected.", spec.name),
                            tokens.get(list.idx).or(Some(token)),
                        );
                        continue;
                    };
                    SqlOption::Valued {
                        ordinal: spec.ordinal,
                        name: String::from(spec.name),
                        value,
                        expr,
                        equals: equals || kind == OptionKind::VarEq,
                    }
                }
            };
            ret.options.insert(spec.ordinal, option);
            if parser.is_halted() {
                break;
            }
        }
        ret
    }

    /// Returns true if an option named `name` is set.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlOption> {
        self.options
            .values()
            .find(|o| o.name().eq_ignore_ascii_case(name))
    }

    /// The canonical value of a valued option.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            SqlOption::Valued { value, .. } => Some(value),
            SqlOption::Bare { .. } => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<SqlOption> {
        let ordinal = self.get(name)?.ordinal();
        self.options.remove(&ordinal)
    }

    /// Adds every option of `other`, replacing options with the same ordinal.
    pub fn merge(&mut self, other: Self) {
        self.options.extend(other.options);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SqlOption> {
        self.options.values()
    }
}

fn find<'s>(specs: &'s [OptionSpec], token: &Token) -> Option<&'s OptionSpec> {
    let name = match token.kind {
        TokenType::Keyword => token.value_str().into_owned(),
        TokenType::None => token.token.to_uppercase(),
        _ => return None,
    };
    specs.iter().find(|s| s.name == name)
}

/// Consumes an option value: one token, a call such as `NOW()`, or a
/// bracketed expression when `bracketed` allows it.
fn take_value(list: &mut TokenList, bracketed: bool) -> Option<(String, String)> {
    let tokens = list.shared();
    let first = tokens.get(list.idx)?;
    let open = bracketed && first.is_operator("(");
    if first.kind == TokenType::Delimiter
        || (first.kind == TokenType::Operator && !open)
        || (first.is_reserved()
            && !first.is_keyword("NULL")
            && !first.flags.contains(TokenFlags::KEYWORD_FUNCTION))
    {
        return None;
    }

    let start = list.idx;
    let call = !open && next_significant(&tokens, start + 1).is_some_and(|t| t.is_operator("("));
    if !(open || call) {
        list.idx += 1;
        return Some((first.value_str().into_owned(), first.token.clone()));
    }

    let mut depth = 0usize;
    while let Some(token) = tokens.get(list.idx) {
        if token.kind == TokenType::Delimiter {
            break;
        }
        list.idx += 1;
        if token.is_operator("(") {
            depth += 1;
        } else if token.is_operator(")") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                break;
            }
        }
    }
    let text = list.build_range(start..list.idx);
    Some((text.clone(), text))
}

impl fmt::Display for OptionsArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, option) in self.options.values().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    const SPECS: &[OptionSpec] = &[
        OptionSpec::flag("ALL", 1),
        OptionSpec::flag("DISTINCT", 1),
        OptionSpec::flag("SQL_NO_CACHE", 2),
        OptionSpec::var_eq("ENGINE", 3),
        OptionSpec::var("COMMENT", 4),
        OptionSpec::expr("DEFAULT", 5),
    ];

    fn parse(sql: &str) -> (OptionsArray, Vec<String>, usize) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let options = OptionsArray::parse(&mut parser, &mut list, SPECS);
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (options, errors, list.idx)
    }

    #[test]
    fn test_flags_stop_at_unknown() {
        let (options, errors, idx) = parse("sql_no_cache DISTINCT a");
        assert!(errors.is_empty());
        assert!(options.has("DISTINCT"));
        assert!(options.has("SQL_NO_CACHE"));
        assert_eq!(options.to_string(), "DISTINCT SQL_NO_CACHE");
        assert_eq!(idx, 4);
    }

    #[test]
    fn test_exclusive_ordinal() {
        let (options, _, _) = parse("ALL DISTINCT");
        assert!(!options.has("ALL"));
        assert!(options.has("DISTINCT"));
    }

    #[test]
    fn test_values() {
        let (options, errors, _) = parse("ENGINE InnoDB, COMMENT = 'hi', DEFAULT (NOW())");
        assert!(errors.is_empty());
        assert_eq!(options.value("ENGINE"), Some("InnoDB"));
        assert_eq!(options.value("COMMENT"), Some("hi"));
        assert_eq!(options.value("DEFAULT"), Some("(NOW())"));
        assert_eq!(
            options.to_string(),
            "ENGINE=InnoDB COMMENT='hi' DEFAULT (NOW())"
        );
    }

    #[test]
    fn test_missing_value() {
        let (options, errors, _) = parse("COMMENT");
        assert!(options.is_empty());
        assert_eq!(
            errors,
            vec!["Value/Expression for the option COMMENT was expected."]
        );
    }

    #[test]
    fn test_remove_and_merge() {
        let (mut options, _, _) = parse("DISTINCT COMMENT 'x'");
        assert!(options.remove("comment").is_some());
        let (other, _, _) = parse("SQL_NO_CACHE");
        options.merge(other);
        assert_eq!(options.to_string(), "DISTINCT SQL_NO_CACHE");
    }
}
