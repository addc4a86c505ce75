//! `INTO` targets: export files, variables and tables.

use std::fmt;

use serde::Serialize;

use super::{ArrayObj, Expression, ParseOptions};
use crate::lexer::{TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

/// A `FIELDS` or `LINES` export option, e.g. `TERMINATED BY ','`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOption {
    /// The words before the value, e.g. `OPTIONALLY ENCLOSED BY`.
    pub name: String,
    /// The value as written.
    pub value: String,
}

impl fmt::Display for ExportOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntoTarget {
    Outfile {
        /// The file name as written, quotes included.
        file: String,
        charset: Option<String>,
        fields: Vec<ExportOption>,
        lines: Vec<ExportOption>,
    },
    Dumpfile {
        file: String,
    },
    Variables(Vec<String>),
    Table {
        table: Expression,
        columns: Option<ArrayObj>,
    },
}

/// The target of `SELECT ... INTO` or `INSERT INTO`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntoKeyword {
    pub target: IntoTarget,
}

impl IntoKeyword {
    /// Parses the target following `INTO`.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Option<Self> {
        let tokens = list.shared();
        list.skip_insignificant();
        let token = tokens.get(list.idx)?;

        let target = match token.keyword() {
            Some("OUTFILE") => {
                list.idx += 1;
                let file = read_file(parser, list)?;
                let mut charset = None;
                let mut fields = Vec::new();
                let mut lines = Vec::new();
                loop {
                    list.skip_insignificant();
                    match tokens.get(list.idx).and_then(|t| t.keyword()) {
                        Some("CHARACTER SET" | "CHARSET") => {
                            list.idx += 1;
                            charset = list.next().map(|t| t.value_str().into_owned());
                        }
                        Some("FIELDS" | "COLUMNS") => {
                            list.idx += 1;
                            fields = parse_export_options(parser, list);
                        }
                        Some("LINES") => {
                            list.idx += 1;
                            lines = parse_export_options(parser, list);
                        }
                        _ => break,
                    }
                }
                IntoTarget::Outfile {
                    file,
                    charset,
                    fields,
                    lines,
                }
            }
            Some("DUMPFILE") => {
                list.idx += 1;
                IntoTarget::Dumpfile {
                    file: read_file(parser, list)?,
                }
            }
            _ if token.flags.contains(TokenFlags::SYMBOL_VARIABLE) => {
                let mut vars = Vec::new();
                while let Some(t) = tokens.get(list.idx) {
                    if t.kind == TokenType::Symbol && t.flags.contains(TokenFlags::SYMBOL_VARIABLE) {
                        vars.push(t.token.clone());
                    } else if !t.is_operator(",") && t.is_significant() {
                        break;
                    }
                    list.idx += 1;
                }
                IntoTarget::Variables(vars)
            }
            _ => {
                let options = ParseOptions {
                    break_on_parentheses: true,
                    no_alias: true,
                    ..ParseOptions::table()
                };
                let Some(table) = Expression::parse(parser, list, &options) else {
                    parser.error("A table was expected.", Some(token));
                    return None;
                };
                list.skip_insignificant();
                let columns = tokens
                    .get(list.idx)
                    .is_some_and(|t| t.is_operator("("))
                    .then(|| ArrayObj::parse(parser, list));
                IntoTarget::Table { table, columns }
            }
        };
        Some(Self { target })
    }

    /// Returns true for `OUTFILE` and `DUMPFILE` targets.
    #[must_use]
    pub const fn is_export(&self) -> bool {
        matches!(
            self.target,
            IntoTarget::Outfile { .. } | IntoTarget::Dumpfile { .. }
        )
    }
}

fn read_file(parser: &mut Parser<'_>, list: &mut TokenList) -> Option<String> {
    list.skip_insignificant();
    match list.get(list.idx) {
        Some(t) if t.kind == TokenType::String => {
            let file = t.token.clone();
            list.idx += 1;
            Some(file)
        }
        other => {
            let at = other.cloned();
            parser.error("A file name was expected.", at.as_ref());
            None
        }
    }
}

fn parse_export_options(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<ExportOption> {
    let tokens = list.shared();
    let mut ret = Vec::new();
    let mut name = String::new();

    loop {
        list.skip_insignificant();
        let Some(token) = tokens.get(list.idx) else {
            break;
        };
        match token.keyword() {
            Some(kw @ ("TERMINATED" | "OPTIONALLY" | "ENCLOSED" | "ESCAPED" | "STARTING")) => {
                super::push_part(&mut name, kw);
                list.idx += 1;
            }
            Some("BY") if !name.is_empty() => {
                list.idx += 1;
                list.skip_insignificant();
                match tokens.get(list.idx) {
                    Some(value) if value.kind == TokenType::String => {
                        ret.push(ExportOption {
                            name: format!("{} BY", std::mem::take(&mut name)),
                            value: value.token.clone(),
                        });
                        list.idx += 1;
                    }
                    other => {
                        parser.error("A string was expected.", other);
                        break;
                    }
                }
            }
            _ => break,
        }
    }
    ret
}

impl fmt::Display for IntoKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |opts: &[ExportOption]| {
            opts.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        match &self.target {
            IntoTarget::Outfile {
                file,
                charset,
                fields,
                lines,
            } => {
                write!(f, "OUTFILE {file}")?;
                if let Some(charset) = charset {
                    write!(f, " CHARACTER SET {charset}")?;
                }
                if !fields.is_empty() {
                    write!(f, " FIELDS {}", join(fields))?;
                }
                if !lines.is_empty() {
                    write!(f, " LINES {}", join(lines))?;
                }
                Ok(())
            }
            IntoTarget::Dumpfile { file } => write!(f, "DUMPFILE {file}"),
            IntoTarget::Variables(vars) => f.write_str(&vars.join(", ")),
            IntoTarget::Table { table, columns } => {
                write!(f, "{table}")?;
                if let Some(columns) = columns {
                    write!(f, " {columns}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> IntoKeyword {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let into = IntoKeyword::parse(&mut parser, &mut list).unwrap();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        into
    }

    #[test]
    fn test_outfile() {
        let into = parse(
            "OUTFILE '/tmp/out.csv' FIELDS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' LINES TERMINATED BY '\\n'",
        );
        assert!(into.is_export());
        let IntoTarget::Outfile { fields, lines, .. } = &into.target else {
            panic!("expected an outfile");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name, "OPTIONALLY ENCLOSED BY");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_variables() {
        let into = parse("@a, @b FROM t");
        assert_eq!(
            into.target,
            IntoTarget::Variables(vec![String::from("@a"), String::from("@b")])
        );
    }

    #[test]
    fn test_table_with_columns() {
        let into = parse("db.t (a, b) VALUES (1, 2)");
        assert_eq!(into.to_string(), "db.t (a, b)");
        assert!(!into.is_export());
    }
}
