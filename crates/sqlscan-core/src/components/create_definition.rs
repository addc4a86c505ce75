//! Column, key and check definitions of `CREATE TABLE`.

use std::fmt;

use serde::Serialize;

use super::{bracketed, quote, DataType, Key, OptionSpec, OptionsArray};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const COLUMN_OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("NOT NULL", 1),
    OptionSpec::flag("NULL", 1),
    OptionSpec::expr("DEFAULT", 2),
    OptionSpec::flag("AUTO_INCREMENT", 3),
    OptionSpec::flag("PRIMARY KEY", 4),
    OptionSpec::flag("UNIQUE KEY", 5),
    OptionSpec::flag("UNIQUE", 5),
    OptionSpec::var("COMMENT", 6),
    OptionSpec::var("COLUMN_FORMAT", 7),
    OptionSpec::expr("ON UPDATE", 8),
    OptionSpec::var("STORAGE", 9),
    OptionSpec::var("COLLATE", 10),
    OptionSpec::flag("VISIBLE", 11),
    OptionSpec::flag("INVISIBLE", 11),
    OptionSpec::expr("AS", 12),
    OptionSpec::flag("VIRTUAL", 13),
    OptionSpec::flag("STORED", 13),
];

/// One entry of a `CREATE TABLE` definition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CreateDefinition {
    Column {
        name: String,
        data_type: Option<DataType>,
        options: OptionsArray,
    },
    Key {
        constraint: Option<String>,
        key: Key,
    },
    Check {
        constraint: Option<String>,
        /// The bracketed condition as written.
        expr: String,
    },
}

impl CreateDefinition {
    /// Parses a bracketed definition list.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<Self> {
        let tokens = list.shared();
        let mut ret = Vec::new();

        list.skip_insignificant();
        match tokens.get(list.idx) {
            Some(t) if t.is_operator("(") => list.idx += 1,
            other => {
                parser.error("An opening bracket was expected.", other);
                return ret;
            }
        }

        loop {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                parser.error("A closing bracket was expected.", tokens.last());
                break;
            };
            if token.is_operator(")") {
                list.idx += 1;
                break;
            }
            if token.kind == TokenType::Delimiter {
                parser.error("A closing bracket was expected.", Some(token));
                break;
            }

            if let Some(definition) = Self::parse_one(parser, list) {
                ret.push(definition);
            }
            if parser.is_halted() {
                break;
            }

            list.skip_insignificant();
            match tokens.get(list.idx) {
                Some(t) if t.is_operator(",") => list.idx += 1,
                Some(t) if t.is_operator(")") => {}
                other => {
                    parser.error("A comma or a closing bracket was expected.", other);
                    skip_definition(list);
                    if tokens.get(list.idx).is_some_and(|t| t.is_operator(",")) {
                        list.idx += 1;
                    }
                }
            }
        }
        ret
    }

    fn parse_one(parser: &mut Parser<'_>, list: &mut TokenList) -> Option<Self> {
        let tokens = list.shared();
        let mut token = tokens.get(list.idx)?;

        let mut constraint = None;
        if token.is_keyword("CONSTRAINT") {
            list.idx += 1;
            list.skip_insignificant();
            let next = tokens.get(list.idx)?;
            if !Key::starts_at(next) && !next.is_keyword("CHECK") {
                constraint = Some(next.value_str().into_owned());
                list.idx += 1;
                list.skip_insignificant();
            }
            token = tokens.get(list.idx)?;
        }

        if Key::starts_at(token) {
            return Some(Self::Key {
                constraint,
                key: Key::parse(parser, list),
            });
        }
        if token.is_keyword("CHECK") {
            list.idx += 1;
            list.skip_insignificant();
            return Some(Self::Check {
                constraint,
                expr: bracketed(parser, list),
            });
        }
        if constraint.is_some() {
            parser.error("A key or check definition was expected.", Some(token));
            return None;
        }

        let name = token.value_str().into_owned();
        list.idx += 1;
        let data_type = DataType::parse(parser, list);
        let options = OptionsArray::parse(parser, list, COLUMN_OPTIONS);
        Some(Self::Column {
            name,
            data_type,
            options,
        })
    }
}

/// Skips to the next `,` or `)` outside brackets.
fn skip_definition(list: &mut TokenList) {
    let tokens = list.shared();
    let mut depth = 0usize;
    while let Some(token) = tokens.get(list.idx) {
        if token.kind == TokenType::Delimiter {
            return;
        }
        if depth == 0 && (token.is_operator(",") || token.is_operator(")")) {
            return;
        }
        if token.is_operator("(") {
            depth += 1;
        } else if token.is_operator(")") {
            depth -= 1;
        }
        list.idx += 1;
    }
}

impl fmt::Display for CreateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column {
                name,
                data_type,
                options,
            } => {
                f.write_str(&quote(name))?;
                if let Some(data_type) = data_type {
                    write!(f, " {data_type}")?;
                }
                if !options.is_empty() {
                    write!(f, " {options}")?;
                }
                Ok(())
            }
            Self::Key { constraint, key } => {
                if let Some(name) = constraint {
                    write!(f, "CONSTRAINT {} ", quote(name))?;
                }
                write!(f, "{key}")
            }
            Self::Check { constraint, expr } => {
                if let Some(name) = constraint {
                    write!(f, "CONSTRAINT {} ", quote(name))?;
                }
                write!(f, "CHECK {expr}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (Vec<CreateDefinition>, Vec<String>) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let defs = CreateDefinition::parse(&mut parser, &mut list);
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (defs, errors)
    }

    #[test]
    fn test_columns_and_keys() {
        let (defs, errors) = parse(
            "(id INT(11) NOT NULL AUTO_INCREMENT, name VARCHAR(64) DEFAULT 'x' COMMENT 'n', \
             PRIMARY KEY (id), CONSTRAINT fk FOREIGN KEY (a) REFERENCES b (id))",
        );
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(defs.len(), 4);
        assert_eq!(
            defs[0].to_string(),
            "`id` INT(11) NOT NULL AUTO_INCREMENT"
        );
        assert_eq!(
            defs[1].to_string(),
            "`name` VARCHAR(64) DEFAULT 'x' COMMENT 'n'"
        );
        assert_eq!(defs[2].to_string(), "PRIMARY KEY (`id`)");
        assert_eq!(
            defs[3].to_string(),
            "CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `b` (`id`)"
        );
    }

    #[test]
    fn test_check() {
        let (defs, errors) = parse("(a INT, CHECK (a > 0))");
        assert!(errors.is_empty());
        assert_eq!(defs[1].to_string(), "CHECK (a > 0)");
    }

    #[test]
    fn test_garbage_recovers_at_comma() {
        let (defs, errors) = parse("(a INT 1 2, b INT)");
        assert_eq!(defs.len(), 2);
        assert_eq!(errors, vec!["A comma or a closing bracket was expected."]);
    }
}
